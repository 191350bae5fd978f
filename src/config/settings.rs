//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::packing::{
    Dimensions, PackingPolicy, SolventBonus, SolventPolicy, BASE_CLEARANCE,
    DEFAULT_EXTENDED_DEPTH_BONUS, DEFAULT_SHELF_CAP,
};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Base chamber clearance.
    #[serde(default)]
    pub clearance: ClearanceConfig,

    /// Solvent bonus table, keyed by solvent name.
    #[serde(default = "default_solvents")]
    pub solvents: IndexMap<String, SolventBonus>,

    /// Packing limits.
    #[serde(default)]
    pub packing: PackingConfig,

    /// Report cosmetics.
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            _schema: None,
            _comment: None,
            clearance: ClearanceConfig::default(),
            solvents: default_solvents(),
            packing: PackingConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.clearance;
        check_length("clearance.width", c.width)?;
        check_length("clearance.depth", c.depth)?;
        check_length("clearance.height", c.height)?;

        for (name, bonus) in &self.solvents {
            if name.trim().is_empty() {
                return Err(invalid("Solvent names must not be empty".to_string()));
            }
            check_length(&format!("solvents.{name}.width"), bonus.width)?;
            check_length(&format!("solvents.{name}.depth"), bonus.depth)?;
            check_length(&format!("solvents.{name}.height"), bonus.height)?;
            check_length(&format!("solvents.{name}.spacing"), bonus.spacing)?;
        }

        if !(1..=DEFAULT_SHELF_CAP).contains(&self.packing.shelf_cap) {
            return Err(invalid(format!(
                "packing.shelf_cap must be between 1 and {DEFAULT_SHELF_CAP}, got {}",
                self.packing.shelf_cap
            )));
        }
        check_length("packing.extended_depth_bonus", self.packing.extended_depth_bonus)?;

        if !(self.report.px_per_mm.is_finite() && self.report.px_per_mm > 0.0) {
            return Err(invalid(format!(
                "report.px_per_mm must be positive, got {}",
                self.report.px_per_mm
            )));
        }

        Ok(())
    }

    /// Builds the packing policy described by this configuration.
    #[must_use]
    pub fn packing_policy(&self) -> PackingPolicy {
        PackingPolicy {
            base_clearance: Dimensions::new(
                self.clearance.width,
                self.clearance.depth,
                self.clearance.height,
            ),
            solvents: SolventPolicy::from_rows(
                self.solvents.iter().map(|(name, bonus)| (name.as_str(), *bonus)),
            ),
            shelf_cap: self.packing.shelf_cap,
            extended_depth_bonus: self.packing.extended_depth_bonus,
        }
    }
}

fn check_length(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!(
            "{field} must be a non-negative length in mm, got {value}"
        )))
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError { message }
}

fn default_solvents() -> IndexMap<String, SolventBonus> {
    SolventPolicy::default()
        .iter()
        .map(|(name, bonus)| (name.to_string(), *bonus))
        .collect()
}

/// Base clearance from each chamber wall, in mm.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClearanceConfig {
    /// Width clearance.
    #[serde(default = "default_clearance")]
    pub width: f64,

    /// Depth clearance.
    #[serde(default = "default_clearance")]
    pub depth: f64,

    /// Height clearance.
    #[serde(default = "default_clearance")]
    pub height: f64,
}

impl Default for ClearanceConfig {
    fn default() -> Self {
        Self {
            width: default_clearance(),
            depth: default_clearance(),
            height: default_clearance(),
        }
    }
}

const fn default_clearance() -> f64 {
    BASE_CLEARANCE
}

/// Packing limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackingConfig {
    /// Number of rack shelves; caps the height count.
    #[serde(default = "default_shelf_cap")]
    pub shelf_cap: u32,

    /// Depth added for the extended-capacity comparison (mm).
    #[serde(default = "default_extended_depth_bonus")]
    pub extended_depth_bonus: f64,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            shelf_cap: default_shelf_cap(),
            extended_depth_bonus: default_extended_depth_bonus(),
        }
    }
}

const fn default_shelf_cap() -> u32 {
    DEFAULT_SHELF_CAP
}

const fn default_extended_depth_bonus() -> f64 {
    DEFAULT_EXTENDED_DEPTH_BONUS
}

/// Report and rendering cosmetics.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Report title, also used as the SVG caption.
    #[serde(default = "default_title")]
    pub title: String,

    /// Fill colour of part rectangles (any SVG colour).
    #[serde(default = "default_part_colour")]
    pub part_colour: String,

    /// Stroke colour of the chamber outline and part edges.
    #[serde(default = "default_outline_colour")]
    pub outline_colour: String,

    /// Rendering scale in pixels per millimetre.
    #[serde(default = "default_px_per_mm")]
    pub px_per_mm: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            part_colour: default_part_colour(),
            outline_colour: default_outline_colour(),
            px_per_mm: default_px_per_mm(),
        }
    }
}

fn default_title() -> String {
    "Chamber Loading Report".to_string()
}

fn default_part_colour() -> String {
    "green".to_string()
}

fn default_outline_colour() -> String {
    "black".to_string()
}

const fn default_px_per_mm() -> f64 {
    1.5
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
