//! Chamber clearance and the solvent bonus table.
//!
//! Every chamber wall keeps a base clearance of 50 mm. Some solvents need a
//! wider margin; for those the [`SolventPolicy`] table adds a per-axis bonus
//! to the clearance and a bonus to the width/depth spacing between parts.
//!
//! The canonical table has a single row:
//!
//! | Solvent | Width | Depth | Height | Spacing |
//! |---------|-------|-------|--------|---------|
//! | PURE    | +50   | +50   | +50    | +10     |

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::packing::Dimensions;

/// Base clearance on every axis (mm).
pub const BASE_CLEARANCE: f64 = 50.0;

/// Extra margins applied for a particular solvent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolventBonus {
    /// Added to the width clearance (mm).
    #[serde(default)]
    pub width: f64,

    /// Added to the depth clearance (mm).
    #[serde(default)]
    pub depth: f64,

    /// Added to the height clearance (mm).
    #[serde(default)]
    pub height: f64,

    /// Added to the width and depth spacing between parts (mm).
    #[serde(default)]
    pub spacing: f64,
}

impl SolventBonus {
    /// Creates a new bonus row.
    #[must_use]
    pub const fn new(width: f64, depth: f64, height: f64, spacing: f64) -> Self {
        Self {
            width,
            depth,
            height,
            spacing,
        }
    }

    /// Clearance part of the bonus as a dimension triple.
    #[must_use]
    pub const fn clearance(&self) -> Dimensions {
        Dimensions::new(self.width, self.depth, self.height)
    }

    /// Spacing part of the bonus. Height spacing is never increased.
    #[must_use]
    pub const fn spacing(&self) -> Dimensions {
        Dimensions::new(self.spacing, self.spacing, 0.0)
    }
}

/// Ordered table mapping solvent names to their bonuses.
///
/// Names are matched ignoring case and surrounding whitespace. An empty or
/// unlisted solvent gets no bonus.
#[derive(Debug, Clone, PartialEq)]
pub struct SolventPolicy {
    rows: IndexMap<String, SolventBonus>,
}

impl SolventPolicy {
    /// Builds a table from `(name, bonus)` rows, keeping their order.
    ///
    /// A later row with the same normalised name replaces an earlier one.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, SolventBonus)>,
        S: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|(name, bonus)| (normalise(name.as_ref()), bonus))
                .collect(),
        }
    }

    /// Looks up the bonus for a solvent.
    #[must_use]
    pub fn bonus_for(&self, solvent: &str) -> Option<&SolventBonus> {
        let key = normalise(solvent);
        if key.is_empty() {
            return None;
        }
        self.rows.get(&key)
    }

    /// Iterates the rows in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SolventBonus)> {
        self.rows.iter().map(|(name, bonus)| (name.as_str(), bonus))
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for SolventPolicy {
    fn default() -> Self {
        Self::from_rows([("PURE", SolventBonus::new(50.0, 50.0, 50.0, 10.0))])
    }
}

fn normalise(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Resolved clearance for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearanceProfile {
    /// Margin removed from each chamber axis (mm).
    pub margins: Dimensions,

    /// Extra spacing added between parts (mm).
    pub spacing_bonus: Dimensions,
}

impl ClearanceProfile {
    /// Clearance with no solvent bonus applied.
    #[must_use]
    pub const fn base(base: Dimensions) -> Self {
        Self {
            margins: base,
            spacing_bonus: Dimensions::new(0.0, 0.0, 0.0),
        }
    }

    /// Resolves the clearance for `solvent` against the bonus table.
    #[must_use]
    pub fn resolve(base: Dimensions, policy: &SolventPolicy, solvent: &str) -> Self {
        policy.bonus_for(solvent).map_or_else(
            || Self::base(base),
            |bonus| Self {
                margins: base + bonus.clearance(),
                spacing_bonus: bonus.spacing(),
            },
        )
    }
}

impl Default for ClearanceProfile {
    fn default() -> Self {
        Self::base(Dimensions::uniform(BASE_CLEARANCE))
    }
}
