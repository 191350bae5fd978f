//! Report export.
//!
//! A [`Report`] is the serialisable summary of one packing computation: the
//! inputs, the resolved clearance, and the part counts. It is written as JSON,
//! alongside optional SVG views produced by [`svg`].
//!
//! Report cosmetics (title, colours, scale) come from [`ReportConfig`]; they
//! have no effect on the numbers.

pub mod svg;

pub use svg::{render_front_view_svg, render_top_view_svg, render_view, write_svg, View};

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::packing::{
    ClearanceProfile, Dimensions, MachineType, PackingCounts, PackingResult, PartSpec,
};

/// Serialisable summary of a packing computation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report title.
    pub title: String,

    /// When the report was generated.
    pub generated_at: DateTime<Utc>,

    /// Machine model.
    pub machine: MachineType,

    /// Solvent (empty for none).
    pub solvent: String,

    /// Chamber size (mm).
    pub chamber: Dimensions,

    /// Clearance used (mm).
    pub clearance: ClearanceProfile,

    /// Chamber size after clearance (mm).
    pub effective_chamber: Dimensions,

    /// Part size and spacing as entered.
    pub part: PartSpec,

    /// Pitch along each axis (mm).
    pub pitch: Dimensions,

    /// Part counts.
    pub counts: PackingCounts,

    /// Part counts with extended depth, when computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<PackingCounts>,

    /// Set when clearance left no usable space on some axis.
    pub degenerate: bool,
}

impl Report {
    /// Builds a report stamped with the current time.
    #[must_use]
    pub fn new(result: &PackingResult, config: &ReportConfig) -> Self {
        Self::at(result, config, Utc::now())
    }

    /// Builds a report with an explicit timestamp.
    #[must_use]
    pub fn at(result: &PackingResult, config: &ReportConfig, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: config.title.clone(),
            generated_at,
            machine: result.machine,
            solvent: result.solvent.clone(),
            chamber: result.chamber.size,
            clearance: result.clearance,
            effective_chamber: result.effective_chamber,
            part: result.part,
            pitch: result.pitch,
            counts: result.counts,
            extended: result.extended,
            degenerate: result.is_degenerate(),
        }
    }

    /// Serialises the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialize`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the write fails.
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| ReportError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!(path = %path.display(), total = self.counts.total, "Wrote report");
        Ok(())
    }

    /// One-paragraph plain-text summary for terminals.
    #[must_use]
    pub fn summary(&self) -> String {
        let c = &self.counts;
        let mut s = format!(
            "{title}\n\
             Machine: {machine}  Solvent: {solvent}\n\
             Chamber: {cw} x {cd} x {ch} mm  Effective: {ew} x {ed} x {eh} mm\n\
             Pitch: {pw} x {pd} x {ph} mm\n\
             Parts: {w} x {d} x {h} = {total}",
            title = self.title,
            machine = self.machine,
            solvent = if self.solvent.is_empty() { "-" } else { self.solvent.as_str() },
            cw = self.chamber.width,
            cd = self.chamber.depth,
            ch = self.chamber.height,
            ew = self.effective_chamber.width,
            ed = self.effective_chamber.depth,
            eh = self.effective_chamber.height,
            pw = self.pitch.width,
            pd = self.pitch.depth,
            ph = self.pitch.height,
            w = c.width,
            d = c.depth,
            h = c.height,
            total = c.total,
        );
        if let Some(ext) = &self.extended {
            s.push_str(&format!(
                "\nExtended depth: {} x {} x {} = {}",
                ext.width, ext.depth, ext.height, ext.total
            ));
        }
        if self.degenerate {
            s.push_str("\nWarning: clearance leaves no usable space on at least one axis");
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::{PackingCalculator, PackingRequest};
    use chrono::TimeZone;

    fn scenario() -> PackingResult {
        let part = PartSpec::new(50.0, 50.0, 100.0).with_spacing(10.0, 10.0, 30.0);
        PackingCalculator::new()
            .compute(&PackingRequest::new("SF50", part).with_extended(true))
            .unwrap()
    }

    #[test]
    fn report_json_fields() {
        let stamp = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let report = Report::at(&scenario(), &ReportConfig::default(), stamp);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["title"], "Chamber Loading Report");
        assert_eq!(value["machine"], "SF50");
        assert_eq!(value["generated_at"], "2026-01-02T03:04:05Z");
        assert_eq!(value["counts"]["total"], 40);
        assert_eq!(value["extended"]["total"], 90);
        assert_eq!(value["degenerate"], false);
        assert_eq!(value["effective_chamber"]["depth"], 250.0);
    }

    #[test]
    fn extended_is_omitted_when_not_computed() {
        let part = PartSpec::new(50.0, 50.0, 100.0);
        let result = crate::packing::compute("SF100", "", &part).unwrap();
        let json = Report::new(&result, &ReportConfig::default()).to_json().unwrap();
        assert!(!json.contains("\"extended\""));
    }

    #[test]
    fn summary_mentions_counts() {
        let report = Report::new(&scenario(), &ReportConfig::default());
        let summary = report.summary();
        assert!(summary.contains("Parts: 5 x 4 x 2 = 40"));
        assert!(summary.contains("Extended depth: 5 x 9 x 2 = 90"));
        assert!(summary.contains("Solvent: -"));
    }
}
