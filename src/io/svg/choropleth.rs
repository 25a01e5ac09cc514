//! Choropleth map of combined records.

use std::{io::Write, path::Path};

use anyhow::{anyhow, Result};

use crate::{config::RenderOptions, types::CombinedRecord};
use super::{
    choropleth_colors, escape_xml, fit_projection, multipolygon_to_path, union_bounds,
    write_svg_footer, write_svg_header, write_svg_styles, write_svg_title, write_svg_file, Projection, SvgStringWriter,
};

/// Pixels reserved above the map for the title.
const TITLE_HEIGHT: f64 = 30.0;

/// Draw every region shaded by its drought percentage, then label matched regions
/// with their name and percentage at the centroid.
pub(crate) fn render_choropleth<W: Write>(writer: &mut W, records: &[CombinedRecord], options: &RenderOptions) -> Result<()> {
    let bounds = union_bounds(records.iter().map(|r| r.bounds()))
        .ok_or_else(|| anyhow!("[io::svg::choropleth] Could not determine bounds; nothing to draw."))?;

    let (project, height) = fit_projection(bounds, options.width, options.margin, TITLE_HEIGHT);

    write_svg_header(writer, options.width, height)?;
    write_svg_styles(writer)?;
    write_svg_title(writer, options.width / 2.0, TITLE_HEIGHT * 0.7, &options.map_title)?;

    let values = records.iter().map(|r| r.mean_drought_percentage).collect::<Vec<_>>();
    let colors = choropleth_colors(&values);

    for (record, color) in records.iter().zip(&colors) {
        if record.geometry.0.is_empty() { continue }
        writeln!(
            writer,
            r#"<path class="region" data-name="{}" d="{}" style="fill:{}"/>"#,
            escape_xml(&record.region_name),
            multipolygon_to_path(&record.geometry, &*project),
            color,
        )?;
    }

    draw_labels(writer, records, &*project)?;

    write_svg_footer(writer)?;
    Ok(())
}

/// Name above and percentage below each centroid; unmatched regions get no label.
fn draw_labels<W: Write>(writer: &mut W, records: &[CombinedRecord], project: &Projection) -> Result<()> {
    for record in records {
        let (Some(label), Some(centroid)) = (record.percentage_label(), record.centroid()) else { continue };
        let (x, y) = project(&centroid.0);
        writeln!(writer, r#"<text class="label" x="{:.3}" y="{:.3}">{}</text>"#, x + 3.0, y - 3.0, escape_xml(&record.region_name))?;
        writeln!(writer, r#"<text class="label" x="{:.3}" y="{:.3}">{}</text>"#, x + 3.0, y + 12.0, escape_xml(&label))?;
    }
    Ok(())
}

/// Write the choropleth to an SVG file. Nothing is created if rendering fails.
pub(crate) fn write_choropleth_svg(path: &Path, records: &[CombinedRecord], options: &RenderOptions) -> Result<()> {
    write_svg_file(path, &choropleth_svg_string(records, options)?)
}

/// Render the choropleth to an SVG string.
pub(crate) fn choropleth_svg_string(records: &[CombinedRecord], options: &RenderOptions) -> Result<String> {
    let mut writer = SvgStringWriter::new();
    render_choropleth(&mut writer, records, options)?;
    writer.into_string()
}
