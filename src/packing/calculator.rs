//! The packing calculator.
//!
//! # Calculation
//!
//! For each axis:
//!
//! - Effective chamber = chamber size − clearance
//! - Pitch = part size + spacing (spacing includes any solvent bonus)
//! - Parts along axis = ⌊effective / pitch⌋, clamped to ≥ 0
//!
//! The height count is additionally capped at the shelf count (5 racks by
//! default), and the total is the product of the three per-axis counts.
//!
//! An optional extended computation repeats the count with the effective
//! depth increased by 300 mm, for what-if comparison against a deeper chamber.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PackingError;
use crate::packing::chamber::{ChamberProfile, MachineType};
use crate::packing::clearance::{ClearanceProfile, SolventPolicy, BASE_CLEARANCE};
use crate::packing::layout::Layout;
use crate::packing::Dimensions;

/// Number of shelf levels in the rack; the height count never exceeds this.
pub const DEFAULT_SHELF_CAP: u32 = 5;

/// Extra effective depth used by the extended computation (mm).
pub const DEFAULT_EXTENDED_DEPTH_BONUS: f64 = 300.0;

/// Size and spacing of the part being packed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartSpec {
    /// Part size (mm).
    pub size: Dimensions,

    /// Gap kept between neighbouring parts on each axis (mm).
    pub spacing: Dimensions,
}

impl PartSpec {
    /// Creates a part spec with no spacing.
    #[must_use]
    pub const fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            size: Dimensions::new(width, depth, height),
            spacing: Dimensions::new(0.0, 0.0, 0.0),
        }
    }

    /// Sets the per-axis spacing.
    #[must_use]
    pub const fn with_spacing(self, width: f64, depth: f64, height: f64) -> Self {
        Self {
            spacing: Dimensions::new(width, depth, height),
            ..self
        }
    }

    /// Checks that every value is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`PackingError::InvalidDimension`] naming the first bad field.
    pub fn validate(&self) -> Result<(), PackingError> {
        let fields = [
            ("part_width", self.size.width),
            ("part_depth", self.size.depth),
            ("part_height", self.size.height),
            ("spacing_width", self.spacing.width),
            ("spacing_depth", self.spacing.depth),
            ("spacing_height", self.spacing.height),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(PackingError::dimension(field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(PackingError::dimension(
                    field,
                    format!("must not be negative (got {value})"),
                ));
            }
        }
        Ok(())
    }
}

/// Part counts along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackingCounts {
    /// Parts along the width axis.
    pub width: u32,
    /// Parts along the depth axis.
    pub depth: u32,
    /// Parts along the height axis (at most the shelf cap).
    pub height: u32,
    /// Product of the three per-axis counts.
    pub total: u64,
}

impl PackingCounts {
    /// Returns `true` if no part fits.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Packing rules: base clearance, solvent table, shelf cap, extended depth.
#[derive(Debug, Clone, PartialEq)]
pub struct PackingPolicy {
    /// Clearance kept from every chamber wall before any solvent bonus (mm).
    pub base_clearance: Dimensions,

    /// Per-solvent clearance and spacing bonuses.
    pub solvents: SolventPolicy,

    /// Maximum number of parts stacked along the height axis.
    pub shelf_cap: u32,

    /// Depth added to the effective chamber for the extended computation (mm).
    pub extended_depth_bonus: f64,
}

impl Default for PackingPolicy {
    fn default() -> Self {
        Self {
            base_clearance: Dimensions::uniform(BASE_CLEARANCE),
            solvents: SolventPolicy::default(),
            shelf_cap: DEFAULT_SHELF_CAP,
            extended_depth_bonus: DEFAULT_EXTENDED_DEPTH_BONUS,
        }
    }
}

/// Input to one packing computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PackingRequest {
    /// Machine identifier ("SF50" or "SF100").
    pub machine_type: String,

    /// Solvent name; empty for none.
    pub solvent: String,

    /// Part size and spacing.
    pub part: PartSpec,

    /// Also compute the extended-depth capacity.
    pub extended: bool,
}

impl PackingRequest {
    /// Creates a request with no solvent and no extended computation.
    pub fn new(machine_type: impl Into<String>, part: PartSpec) -> Self {
        Self {
            machine_type: machine_type.into(),
            solvent: String::new(),
            part,
            extended: false,
        }
    }

    /// Sets the solvent.
    #[must_use]
    pub fn with_solvent(mut self, solvent: impl Into<String>) -> Self {
        self.solvent = solvent.into();
        self
    }

    /// Enables or disables the extended-depth computation.
    #[must_use]
    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }
}

/// Outcome of a packing computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingResult {
    /// Machine model the parts were packed into.
    pub machine: MachineType,

    /// Solvent the clearance was resolved for (trimmed; empty for none).
    pub solvent: String,

    /// Chamber profile of the machine.
    pub chamber: ChamberProfile,

    /// Resolved clearance, including any solvent bonus.
    pub clearance: ClearanceProfile,

    /// Chamber size after clearance; may be zero or negative.
    pub effective_chamber: Dimensions,

    /// Part spec as supplied.
    pub part: PartSpec,

    /// Spacing actually used (supplied spacing plus solvent bonus).
    pub spacing: Dimensions,

    /// Repeating unit along each axis: part size plus spacing.
    pub pitch: Dimensions,

    /// Part counts for the chamber as built.
    pub counts: PackingCounts,

    /// Part counts with the extended effective depth, if requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended: Option<PackingCounts>,
}

impl PackingResult {
    /// Returns `true` if the clearance consumed an entire chamber axis.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.effective_chamber.has_non_positive_axis()
    }

    /// Lazily enumerates the packed part boxes.
    #[must_use]
    pub const fn layout(&self) -> Layout<'_> {
        Layout::new(self)
    }
}

/// Computes chamber packings under a [`PackingPolicy`].
#[derive(Debug, Clone, Default)]
pub struct PackingCalculator {
    policy: PackingPolicy,
}

impl PackingCalculator {
    /// Creates a calculator with the canonical policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator with a custom policy.
    #[must_use]
    pub const fn with_policy(policy: PackingPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &PackingPolicy {
        &self.policy
    }

    /// Computes how many parts fit.
    ///
    /// # Errors
    ///
    /// - [`PackingError::InvalidMachineType`] if the machine is unknown
    /// - [`PackingError::InvalidDimension`] if a part value is negative or not
    ///   finite, a pitch is not positive, or the count does not fit in a `u64`
    pub fn compute(&self, request: &PackingRequest) -> Result<PackingResult, PackingError> {
        let machine = MachineType::parse(&request.machine_type)?;
        let chamber = machine.profile();
        request.part.validate()?;

        let solvent = request.solvent.trim().to_string();
        let clearance =
            ClearanceProfile::resolve(self.policy.base_clearance, &self.policy.solvents, &solvent);
        debug!(
            machine = %machine,
            solvent = %solvent,
            clearance = ?clearance.margins,
            spacing_bonus = ?clearance.spacing_bonus,
            "Resolved clearance"
        );

        let effective_chamber = chamber.size - clearance.margins;
        let spacing = request.part.spacing + clearance.spacing_bonus;
        let pitch = request.part.size + spacing;
        check_pitch(pitch)?;

        if effective_chamber.has_non_positive_axis() {
            warn!(
                machine = %machine,
                effective = ?effective_chamber,
                "Clearance leaves no usable chamber space on at least one axis"
            );
        }

        let counts = self.counts_for(effective_chamber, pitch)?;

        let extended = if request.extended {
            let mut deeper = effective_chamber;
            deeper.depth += self.policy.extended_depth_bonus;
            Some(self.counts_for(deeper, pitch)?)
        } else {
            None
        };

        debug!(
            width = counts.width,
            depth = counts.depth,
            height = counts.height,
            total = counts.total,
            extended_total = extended.map(|c| c.total),
            "Computed packing"
        );

        Ok(PackingResult {
            machine,
            solvent,
            chamber,
            clearance,
            effective_chamber,
            part: request.part,
            spacing,
            pitch,
            counts,
            extended,
        })
    }

    fn counts_for(
        &self,
        effective: Dimensions,
        pitch: Dimensions,
    ) -> Result<PackingCounts, PackingError> {
        let width = parts_along(effective.width, pitch.width, "pitch_width")?;
        let depth = parts_along(effective.depth, pitch.depth, "pitch_depth")?;
        let height = parts_along_capped(effective.height, pitch.height, self.policy.shelf_cap);

        let total = u64::from(width)
            .checked_mul(u64::from(depth))
            .and_then(|n| n.checked_mul(u64::from(height)))
            .ok_or_else(|| PackingError::dimension("pitch", "too small: part count overflows"))?;

        Ok(PackingCounts {
            width,
            depth,
            height,
            total,
        })
    }
}

/// Computes a packing with the canonical policy and no extended depth.
///
/// # Errors
///
/// See [`PackingCalculator::compute`].
pub fn compute(
    machine_type: &str,
    solvent: &str,
    part: &PartSpec,
) -> Result<PackingResult, PackingError> {
    PackingCalculator::new()
        .compute(&PackingRequest::new(machine_type, *part).with_solvent(solvent))
}

fn check_pitch(pitch: Dimensions) -> Result<(), PackingError> {
    let axes = [
        ("pitch_width", pitch.width),
        ("pitch_depth", pitch.depth),
        ("pitch_height", pitch.height),
    ];
    for (field, value) in axes {
        if value <= 0.0 {
            return Err(PackingError::dimension(
                field,
                "part size plus spacing must be greater than zero",
            ));
        }
    }
    Ok(())
}

/// Whole parts that fit along one axis; zero when the axis has no room.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parts_along(effective: f64, pitch: f64, field: &str) -> Result<u32, PackingError> {
    let quotient = (effective / pitch).floor();
    if quotient <= 0.0 {
        return Ok(0);
    }
    if quotient > f64::from(u32::MAX) {
        return Err(PackingError::dimension(field, "too small: part count overflows"));
    }
    Ok(quotient as u32)
}

/// Whole parts that fit along one axis, never more than `cap`.
///
/// The quotient is capped before the cast, so a vanishingly small pitch
/// still yields `cap` instead of an overflow.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parts_along_capped(effective: f64, pitch: f64, cap: u32) -> u32 {
    let quotient = (effective / pitch).floor();
    if quotient <= 0.0 {
        return 0;
    }
    quotient.min(f64::from(cap)) as u32
}
