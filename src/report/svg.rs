//! SVG renderings of a packing layout.
//!
//! Two orthographic views are available, matching the plots operators are
//! used to: the front view (width × height, first depth row) and the top view
//! (width × depth, bottom shelf). Chamber coordinates are millimetres with the
//! origin at the front-left-bottom corner; SVG space is y-down, so the vertical
//! axis is flipped when drawing.

use std::path::Path;

use tracing::debug;

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::packing::{PackingResult, PartBox};

/// Blank border around the chamber drawing, for title and labels (mm).
const MARGIN_MM: f64 = 30.0;

/// Which orthographic projection to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Looking into the chamber: width across, height up.
    Front,
    /// Looking down: width across, depth up.
    Top,
}

impl View {
    const fn title(self) -> &'static str {
        match self {
            Self::Front => "Front View",
            Self::Top => "Top View",
        }
    }

    const fn vertical_label(self) -> &'static str {
        match self {
            Self::Front => "Height (mm)",
            Self::Top => "Depth (mm)",
        }
    }

    /// Chamber extent `(horizontal, vertical)` in this view.
    const fn chamber_extent(self, result: &PackingResult) -> (f64, f64) {
        let size = result.chamber.size;
        match self {
            Self::Front => (size.width, size.height),
            Self::Top => (size.width, size.depth),
        }
    }

    /// Effective (post-clearance) extent `(horizontal, vertical)`.
    const fn effective_extent(self, result: &PackingResult) -> (f64, f64) {
        let eff = result.effective_chamber;
        match self {
            Self::Front => (eff.width, eff.height),
            Self::Top => (eff.width, eff.depth),
        }
    }

    /// Projects a box to `(x, y, w, h)` in view millimetres.
    const fn project(self, b: &PartBox) -> (f64, f64, f64, f64) {
        match self {
            Self::Front => (b.origin.x, b.origin.z, b.size.width, b.size.height),
            Self::Top => (b.origin.x, b.origin.y, b.size.width, b.size.depth),
        }
    }
}

/// Renders the front view (width × height) as SVG text.
#[must_use]
pub fn render_front_view_svg(result: &PackingResult, config: &ReportConfig) -> String {
    render_view(result, config, View::Front)
}

/// Renders the top view (width × depth) as SVG text.
#[must_use]
pub fn render_top_view_svg(result: &PackingResult, config: &ReportConfig) -> String {
    render_view(result, config, View::Top)
}

/// Renders one view of the layout as SVG text.
#[must_use]
pub fn render_view(result: &PackingResult, config: &ReportConfig, view: View) -> String {
    let scale = config.px_per_mm;
    let (chamber_w, chamber_h) = view.chamber_extent(result);
    let total_w_mm = MARGIN_MM.mul_add(2.0, chamber_w);
    let total_h_mm = MARGIN_MM.mul_add(2.0, chamber_h);
    let w_px = total_w_mm * scale;
    let h_px = total_h_mm * scale;

    // Rectangle with bottom-left corner (x, y) in chamber mm, to SVG px.
    let rect_px = |x: f64, y: f64, w: f64, h: f64| {
        (
            (MARGIN_MM + x) * scale,
            (MARGIN_MM + chamber_h - y - h) * scale,
            w * scale,
            h * scale,
        )
    };

    let stroke = svg_escape(&config.outline_colour);
    let fill = svg_escape(&config.part_colour);

    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    s.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w_px:.0}\" height=\"{h_px:.0}\" viewBox=\"0 0 {w_px:.2} {h_px:.2}\" font-family=\"sans-serif\" font-size=\"{:.1}\">\n",
        6.0 * scale
    ));
    s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    s.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{:.1}\">{} - {} ({})</text>\n",
        w_px / 2.0,
        MARGIN_MM * 0.5 * scale,
        8.0 * scale,
        svg_escape(&config.title),
        view.title(),
        result.machine,
    ));

    // Chamber outline
    let (x, y, w, h) = rect_px(0.0, 0.0, chamber_w, chamber_h);
    s.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"2\"/>\n"
    ));

    // Usable region after clearance
    let (eff_w, eff_h) = view.effective_extent(result);
    if eff_w > 0.0 && eff_h > 0.0 {
        let (x, y, w, h) = rect_px(
            (chamber_w - eff_w) / 2.0,
            (chamber_h - eff_h) / 2.0,
            eff_w,
            eff_h,
        );
        s.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"1\" stroke-dasharray=\"6 4\"/>\n"
        ));
    }

    let layout = result.layout();
    let boxes = match view {
        View::Front => layout.front_view(),
        View::Top => layout.top_view(),
    };
    let drawn = boxes.len();
    for b in boxes {
        let (bx, by, bw, bh) = view.project(&b);
        let (x, y, w, h) = rect_px(bx, by, bw, bh);
        s.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"{fill}\" fill-opacity=\"0.6\" stroke=\"{stroke}\" stroke-width=\"1\"/>\n"
        ));
    }

    // Axis labels
    s.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\">Width (mm)</text>\n",
        w_px / 2.0,
        h_px - MARGIN_MM * 0.3 * scale,
    ));
    s.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" transform=\"rotate(-90 {x:.2} {y:.2})\">{}</text>\n",
        view.vertical_label(),
        x = MARGIN_MM * 0.5 * scale,
        y = h_px / 2.0,
    ));

    s.push_str("</svg>\n");

    debug!(view = view.title(), parts = drawn, "Rendered SVG view");
    s
}

/// Writes SVG text to a file.
///
/// # Errors
///
/// Returns [`ReportError::Write`] if the file cannot be written.
pub fn write_svg(path: &Path, svg: &str) -> Result<(), ReportError> {
    std::fs::write(path, svg).map_err(|e| ReportError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::{compute, PartSpec};

    fn scenario() -> PackingResult {
        let part = PartSpec::new(50.0, 50.0, 100.0).with_spacing(10.0, 10.0, 30.0);
        compute("SF50", "", &part).unwrap()
    }

    fn part_rects(svg: &str) -> usize {
        svg.matches("fill-opacity=\"0.6\"").count()
    }

    #[test]
    fn front_view_draws_width_by_height() {
        let svg = render_front_view_svg(&scenario(), &ReportConfig::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(part_rects(&svg), 5 * 2);
        assert!(svg.contains("Front View"));
        assert!(svg.contains("Height (mm)"));
    }

    #[test]
    fn top_view_draws_width_by_depth() {
        let svg = render_top_view_svg(&scenario(), &ReportConfig::default());
        assert_eq!(part_rects(&svg), 5 * 4);
        assert!(svg.contains("Depth (mm)"));
    }

    #[test]
    fn colours_and_title_come_from_config() {
        let config = ReportConfig {
            title: "Batch <7>".to_string(),
            part_colour: "#2a9d8f".to_string(),
            ..ReportConfig::default()
        };
        let svg = render_front_view_svg(&scenario(), &config);
        assert!(svg.contains("fill=\"#2a9d8f\""));
        assert!(svg.contains("Batch &lt;7&gt;"));
    }

    #[test]
    fn first_part_is_placed_at_layout_offset() {
        let config = ReportConfig {
            px_per_mm: 1.0,
            ..ReportConfig::default()
        };
        let svg = render_front_view_svg(&scenario(), &config);
        // Offset (50, _, 70); part 50 × 100; chamber height 400.
        // SVG y = 30 + 400 - 70 - 100 = 260.
        assert!(svg.contains("<rect x=\"80.00\" y=\"260.00\" width=\"50.00\" height=\"100.00\""));
    }

    #[test]
    fn empty_layout_draws_only_chamber() {
        let result = compute("SF50", "", &PartSpec::new(500.0, 50.0, 50.0)).unwrap();
        let svg = render_top_view_svg(&result, &ReportConfig::default());
        assert_eq!(part_rects(&svg), 0);
        assert!(svg.contains("stroke-width=\"2\""));
    }
}
