//! chamber-packer: how many uniform parts fit into a machine chamber
//!
//! This library computes the grid packing of one rectangular part size into
//! the fixed chamber of an SF50 or SF100 machine, enumerates the resulting
//! part positions, and exports reports and SVG views.
//!
//! # Architecture
//!
//! The packing calculator is a pure function of its inputs. Everything else
//! consumes its result:
//!
//! - **Calculator**: chamber lookup, clearance, pitch, per-axis counts, shelf cap
//! - **Layout**: lazy enumeration of part boxes for rendering
//! - **Report**: JSON summary and SVG front/top views
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`packing`] — Packing calculator and layout
//! - [`report`] — Report and SVG export

pub mod config;
pub mod error;
pub mod packing;
pub mod report;
