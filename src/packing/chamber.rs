//! Machine models and their chamber profiles.
//!
//! Two machine models are supported:
//!
//! - **SF50**: 400 × 300 × 400 mm chamber
//! - **SF100**: 400 × 600 × 400 mm chamber (double depth)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PackingError;
use crate::packing::Dimensions;

/// Machine model, which fixes the chamber size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineType {
    /// SF50: 400 × 300 × 400 mm.
    #[serde(rename = "SF50")]
    Sf50,

    /// SF100: 400 × 600 × 400 mm.
    #[serde(rename = "SF100")]
    Sf100,
}

impl MachineType {
    /// All known machine models, in catalogue order.
    pub const ALL: [Self; 2] = [Self::Sf50, Self::Sf100];

    /// Parses a machine type from a string.
    ///
    /// Accepts "SF50" and "SF100", ignoring surrounding whitespace and case.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SF50" => Some(Self::Sf50),
            "SF100" => Some(Self::Sf100),
            _ => None,
        }
    }

    /// Parses a machine type, failing with [`PackingError::InvalidMachineType`].
    ///
    /// # Errors
    ///
    /// Returns an error if `s` names neither SF50 nor SF100.
    pub fn parse(s: &str) -> Result<Self, PackingError> {
        Self::from_str_loose(s).ok_or_else(|| PackingError::InvalidMachineType {
            value: s.to_string(),
        })
    }

    /// Returns the model name as printed on the machine.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sf50 => "SF50",
            Self::Sf100 => "SF100",
        }
    }

    /// Returns the chamber profile for this model.
    #[must_use]
    pub const fn profile(&self) -> ChamberProfile {
        match self {
            Self::Sf50 => ChamberProfile::new(*self, Dimensions::new(400.0, 300.0, 400.0)),
            Self::Sf100 => ChamberProfile::new(*self, Dimensions::new(400.0, 600.0, 400.0)),
        }
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed chamber size of a machine model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChamberProfile {
    /// Machine model this chamber belongs to.
    pub machine: MachineType,

    /// Inner chamber size (mm).
    pub size: Dimensions,
}

impl ChamberProfile {
    const fn new(machine: MachineType, size: Dimensions) -> Self {
        Self { machine, size }
    }

    /// Chamber volume in litres.
    #[must_use]
    pub fn volume_litres(&self) -> f64 {
        self.size.width * self.size.depth * self.size.height / 1_000_000.0
    }
}
