//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{Column, CsvWriter}};

use crate::types::StateSummaries;

/// Display headers of the summary table.
pub(crate) const SUMMARY_HEADERS: [&str; 3] = ["States", "Drought Percentage", "Affected Crop by Drought"];

/// Build the presentation table: one row per state.
pub(crate) fn summary_dataframe(summaries: &StateSummaries) -> Result<DataFrame> {
    let (states, (means, crops)): (Vec<&str>, (Vec<f64>, Vec<&str>)) = summaries.iter()
        .map(|s| (s.state.as_str(), (s.mean_drought_percentage, s.dominant_crop_type.as_str())))
        .unzip();

    Ok(DataFrame::new(vec![
        Column::new(SUMMARY_HEADERS[0].into(), states),
        Column::new(SUMMARY_HEADERS[1].into(), means),
        Column::new(SUMMARY_HEADERS[2].into(), crops),
    ])?)
}

/// Write the summary table to a CSV file.
pub(crate) fn write_summary_csv(summaries: &StateSummaries, path: &Path) -> Result<()> {
    let mut df = summary_dataframe(summaries)?;
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(&mut df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Write the summary table to a CSV string.
pub(crate) fn write_summary_string(summaries: &StateSummaries) -> Result<String> {
    let mut df = summary_dataframe(summaries)?;
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(&mut df)
        .context("[io::csv::write] Failed to write CSV to string")?;
    String::from_utf8(buffer)
        .context("[io::csv::write] CSV output is not valid UTF-8")
}

/// Render the summary table as aligned plain text for the terminal.
pub(crate) fn format_summary_table(summaries: &StateSummaries) -> String {
    let rows = summaries.iter()
        .map(|s| [s.state.clone(), format!("{:.2}", s.mean_drought_percentage), s.dominant_crop_type.clone()])
        .collect::<Vec<_>>();

    let mut widths = SUMMARY_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 3]| {
        let line = cells.iter().zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_row(SUMMARY_HEADERS);
    for row in &rows {
        push_row([row[0].as_str(), row[1].as_str(), row[2].as_str()]);
    }
    out
}
