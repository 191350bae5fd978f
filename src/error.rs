//! Error types for chamber-packer.
//!
//! Packing errors are input-validation failures: they are fatal to the call
//! that produced them, and the caller is expected to re-prompt. Degenerate
//! geometry (a chamber swallowed by its clearance) is not an error; the
//! affected counts clamp to zero instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors raised by the packing calculator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackingError {
    /// The machine identifier is not one of the known chamber models.
    #[error("invalid machine type '{value}': must be 'SF50' or 'SF100'")]
    InvalidMachineType {
        /// The rejected identifier, as supplied.
        value: String,
    },

    /// A dimension is missing, non-numeric, negative, or yields an unusable pitch.
    #[error("invalid dimension '{field}': {message}")]
    InvalidDimension {
        /// Name of the offending field (e.g. `part_width`, `pitch_depth`).
        field: String,
        /// Description of what's wrong.
        message: String,
    },
}

impl PackingError {
    /// Shorthand for an [`PackingError::InvalidDimension`].
    pub(crate) fn dimension(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDimension {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while exporting reports and renderings.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Output file could not be written.
    #[error("failed to write report file: {path}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Report could not be serialised.
    #[error("failed to serialise report")]
    Serialize(#[from] serde_json::Error),
}
