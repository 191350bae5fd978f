//! Loose request parsing.
//!
//! Requests arrive as a flat JSON object from forms or files:
//!
//! ```json
//! {
//!     "machine_type": "SF50",
//!     "solvent": "",
//!     "part_width": 50, "part_depth": 50, "part_height": "100",
//!     "spacing_width": 10, "spacing_depth": 10, "spacing_height": 30
//! }
//! ```
//!
//! Numeric fields accept numbers or numeric strings. Missing and non-numeric
//! fields become [`PackingError::InvalidDimension`] rather than parse errors,
//! so the caller can report exactly which field to fix.

use serde::Deserialize;

use crate::error::PackingError;
use crate::packing::calculator::{PackingRequest, PartSpec};

/// A numeric field as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A JSON number.
    Number(f64),
    /// A string expected to hold a number.
    Text(String),
}

impl RawNumber {
    fn parse(&self, field: &str) -> Result<f64, PackingError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                PackingError::dimension(field, format!("must be numeric (got '{s}')"))
            }),
        }
    }
}

/// Unvalidated request fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPackingRequest {
    /// Machine identifier.
    #[serde(default)]
    pub machine_type: String,

    /// Solvent name.
    #[serde(default)]
    pub solvent: String,

    /// Part width.
    #[serde(default)]
    pub part_width: Option<RawNumber>,

    /// Part depth.
    #[serde(default)]
    pub part_depth: Option<RawNumber>,

    /// Part height.
    #[serde(default)]
    pub part_height: Option<RawNumber>,

    /// Spacing along the width axis.
    #[serde(default)]
    pub spacing_width: Option<RawNumber>,

    /// Spacing along the depth axis.
    #[serde(default)]
    pub spacing_depth: Option<RawNumber>,

    /// Spacing along the height axis.
    #[serde(default)]
    pub spacing_height: Option<RawNumber>,

    /// Also compute the extended-depth capacity.
    #[serde(default)]
    pub extended: bool,
}

impl RawPackingRequest {
    /// Parses a request from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is not an object of the expected shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Converts into a typed request.
    ///
    /// The machine type is not checked here; the calculator does that.
    ///
    /// # Errors
    ///
    /// Returns [`PackingError::InvalidDimension`] for the first missing or
    /// non-numeric field.
    pub fn into_request(self) -> Result<PackingRequest, PackingError> {
        let part = PartSpec::new(
            required(self.part_width.as_ref(), "part_width")?,
            required(self.part_depth.as_ref(), "part_depth")?,
            required(self.part_height.as_ref(), "part_height")?,
        )
        .with_spacing(
            required(self.spacing_width.as_ref(), "spacing_width")?,
            required(self.spacing_depth.as_ref(), "spacing_depth")?,
            required(self.spacing_height.as_ref(), "spacing_height")?,
        );

        Ok(PackingRequest::new(self.machine_type, part)
            .with_solvent(self.solvent)
            .with_extended(self.extended))
    }
}

fn required(value: Option<&RawNumber>, field: &str) -> Result<f64, PackingError> {
    value
        .ok_or_else(|| PackingError::dimension(field, "is required"))?
        .parse(field)
}
