//! Pie chart of mean drought percentage by state.

use std::{f64::consts::PI, io::Write, path::Path};

use anyhow::{bail, Result};

use crate::{config::RenderOptions, types::StateSummaries};
use super::{
    escape_xml, golden_angle_color, write_svg_footer, write_svg_header, write_svg_styles, write_svg_title,
    write_svg_file, SvgStringWriter,
};

/// First wedge starts here, measured counter-clockwise from the positive x axis.
const START_ANGLE_DEG: f64 = 140.0;

const TITLE_HEIGHT: f64 = 30.0;

/// One wedge per state, sized by its share of the summed mean percentages and
/// laid out counter-clockwise. Each wedge shows its share with one decimal inside
/// and the state name outside.
pub(crate) fn render_pie<W: Write>(writer: &mut W, summaries: &StateSummaries, options: &RenderOptions) -> Result<()> {
    if let Some(bad) = summaries.iter().find(|s| s.mean_drought_percentage < 0.0) {
        bail!("[io::svg::pie] wedge sizes must be non-negative; {} has {}", bad.state, bad.mean_drought_percentage);
    }
    let total: f64 = summaries.iter().map(|s| s.mean_drought_percentage).sum();

    let width = options.width;
    let height = width * 0.8 + TITLE_HEIGHT;
    let (cx, cy) = (width / 2.0, TITLE_HEIGHT + width * 0.4);
    let r = width * 0.28;

    // Math angle (degrees, CCW, y up) -> SVG point.
    let at = |deg: f64, radius: f64| -> (f64, f64) {
        let rad = deg * PI / 180.0;
        (cx + radius * rad.cos(), cy - radius * rad.sin())
    };

    write_svg_header(writer, width, height)?;
    write_svg_styles(writer)?;
    write_svg_title(writer, width / 2.0, TITLE_HEIGHT * 0.7, &options.pie_title)?;

    if total > 0.0 {
        let mut theta = START_ANGLE_DEG;
        for (i, summary) in summaries.iter().enumerate() {
            let frac = summary.mean_drought_percentage / total;
            let sweep = 360.0 * frac;
            let color = golden_angle_color(i);

            if frac >= 1.0 - 1e-12 {
                writeln!(writer, r#"<circle class="slice" cx="{cx:.3}" cy="{cy:.3}" r="{r:.3}" style="fill:{color}"/>"#)?;
            } else if frac > 0.0 {
                let (x1, y1) = at(theta, r);
                let (x2, y2) = at(theta + sweep, r);
                let large_arc = if sweep > 180.0 { 1 } else { 0 };
                // sweep-flag 0 draws counter-clockwise on screen.
                writeln!(
                    writer,
                    r#"<path class="slice" d="M{cx:.3},{cy:.3} L{x1:.3},{y1:.3} A{r:.3},{r:.3} 0 {large_arc} 0 {x2:.3},{y2:.3} Z" style="fill:{color}"/>"#,
                )?;
            }

            let mid = theta + sweep / 2.0;
            let (px, py) = at(mid, r * 0.6);
            writeln!(
                writer,
                r#"<text class="slice-label" x="{px:.3}" y="{py:.3}" text-anchor="middle">{:.1}%</text>"#,
                frac * 100.0,
            )?;
            let (lx, ly) = at(mid, r * 1.1);
            let anchor = if mid.to_radians().cos() >= 0.0 { "start" } else { "end" };
            writeln!(
                writer,
                r#"<text class="slice-label" x="{lx:.3}" y="{ly:.3}" text-anchor="{anchor}">{}</text>"#,
                escape_xml(&summary.state),
            )?;

            theta += sweep;
        }
    }

    write_svg_footer(writer)?;
    Ok(())
}

/// Write the pie chart to an SVG file. Nothing is created if rendering fails.
pub(crate) fn write_pie_svg(path: &Path, summaries: &StateSummaries, options: &RenderOptions) -> Result<()> {
    write_svg_file(path, &pie_svg_string(summaries, options)?)
}

/// Render the pie chart to an SVG string.
pub(crate) fn pie_svg_string(summaries: &StateSummaries, options: &RenderOptions) -> Result<String> {
    let mut writer = SvgStringWriter::new();
    render_pie(&mut writer, summaries, options)?;
    writer.into_string()
}
