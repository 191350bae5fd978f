//! Chamber packing calculations.
//!
//! Given a machine model, a solvent and a uniform part size, this module works
//! out how many parts fit into the machine's chamber on an axis-aligned grid.
//! The computation is closed-form: clearance is removed from each chamber wall,
//! every axis is tiled by the part pitch (part size plus spacing), and the
//! height axis is capped at the shelf count.
//!
//! # Example
//!
//! ```
//! use chamber_packer::packing::{compute, PartSpec};
//!
//! let part = PartSpec::new(50.0, 50.0, 100.0).with_spacing(10.0, 10.0, 30.0);
//! let result = compute("SF50", "", &part).unwrap();
//!
//! assert_eq!(result.counts.width, 5);
//! assert_eq!(result.counts.depth, 4);
//! assert_eq!(result.counts.height, 2);
//! assert_eq!(result.counts.total, 40);
//! ```

pub mod calculator;
pub mod chamber;
pub mod clearance;
pub mod layout;
pub mod request;

pub use calculator::{
    compute, PackingCalculator, PackingCounts, PackingPolicy, PackingRequest, PackingResult,
    PartSpec, DEFAULT_EXTENDED_DEPTH_BONUS, DEFAULT_SHELF_CAP,
};
pub use chamber::{ChamberProfile, MachineType};
pub use clearance::{ClearanceProfile, SolventBonus, SolventPolicy, BASE_CLEARANCE};
pub use layout::{Layout, PartBox};
pub use request::RawPackingRequest;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A width/depth/height triple in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    /// Extent along the width (X) axis.
    pub width: f64,
    /// Extent along the depth (Y) axis.
    pub depth: f64,
    /// Extent along the height (Z) axis.
    pub height: f64,
}

impl Dimensions {
    /// Creates a new dimension triple.
    #[must_use]
    pub const fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// Creates a triple with the same value on every axis.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Returns `true` if any axis is zero or negative.
    #[must_use]
    pub fn has_non_positive_axis(&self) -> bool {
        self.width <= 0.0 || self.depth <= 0.0 || self.height <= 0.0
    }
}

impl Add for Dimensions {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.width + other.width,
            self.depth + other.depth,
            self.height + other.height,
        )
    }
}

impl Sub for Dimensions {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.width - other.width,
            self.depth - other.depth,
            self.height - other.height,
        )
    }
}

/// A 3D point in chamber coordinates (mm). The origin is the chamber's
/// front-left-bottom corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate (width axis).
    pub x: f64,
    /// Y coordinate (depth axis).
    pub y: f64,
    /// Z coordinate (height axis).
    pub z: f64,
}

impl Point3 {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
