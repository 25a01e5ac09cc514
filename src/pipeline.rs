//! One run of the dashboard pipeline: read, aggregate, join.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    aggregate::aggregate,
    config::{PipelineConfig, RenderOptions},
    error::{DroughtError, DroughtResult},
    io,
    join::{join, JoinReport, Joined},
    types::{CombinedRecord, Observation, RegionPolygon, StateSummaries},
};

/// Everything the presentation layer needs, derived from the two inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub summaries: StateSummaries,
    pub records: Vec<CombinedRecord>,
    pub report: JoinReport,
}

impl Dashboard {
    /// Summary table as CSV with the display headers.
    pub fn summary_csv(&self) -> Result<String> { io::csv::write_summary_string(&self.summaries) }

    /// Summary table as aligned text.
    pub fn summary_table(&self) -> String { io::csv::format_summary_table(&self.summaries) }

    pub fn write_summary_csv(&self, path: &Path) -> Result<()> { io::csv::write_summary_csv(&self.summaries, path) }

    /// Combined records as a GeoJSON FeatureCollection.
    pub fn geojson(&self) -> serde_json::Value { io::geojson::to_geojson(&self.records) }

    pub fn write_geojson(&self, path: &Path) -> Result<()> { io::geojson::write_geojson(&self.records, path) }

    pub fn choropleth_svg(&self, options: &RenderOptions) -> Result<String> {
        io::svg::choropleth_svg_string(&self.records, options)
    }

    pub fn write_choropleth_svg(&self, path: &Path, options: &RenderOptions) -> Result<()> {
        io::svg::write_choropleth_svg(path, &self.records, options)
    }

    pub fn pie_svg(&self, options: &RenderOptions) -> Result<String> {
        io::svg::pie_svg_string(&self.summaries, options)
    }

    pub fn write_pie_svg(&self, path: &Path, options: &RenderOptions) -> Result<()> {
        io::svg::write_pie_svg(path, &self.summaries, options)
    }
}

/// Runs the pipeline for a fixed configuration. Each run rereads both inputs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self { Self { config } }

    pub fn config(&self) -> &PipelineConfig { &self.config }

    /// Read the observation file.
    pub fn load_observations(&self) -> DroughtResult<Vec<Observation>> {
        let delimiter = self.config.delimiter_byte()
            .map_err(|e| DroughtError::data_source(&self.config.observations, e.to_string()))?;
        io::csv::read_observations(&self.config.observations, delimiter)
    }

    /// Read the boundary dataset.
    pub fn load_polygons(&self) -> DroughtResult<Vec<RegionPolygon>> {
        io::shp::read_polygons(&self.config.boundaries, &self.config.name_field)
    }

    /// Aggregate only; the boundary data is not touched.
    pub fn summarize(&self) -> DroughtResult<StateSummaries> {
        let observations = self.load_observations()?;
        info!("[pipeline] read {} observations from {}", observations.len(), self.config.observations.display());
        aggregate(&observations)
    }

    /// Read both inputs, aggregate and join.
    pub fn run(&self) -> DroughtResult<Dashboard> {
        let summaries = self.summarize()?;
        let polygons = self.load_polygons()?;
        info!("[pipeline] read {} regions from {}", polygons.len(), self.config.boundaries.display());

        let Joined { records, report } = join(polygons, &summaries, self.config.normalization);
        check_report(&report, self.config.strict_join)?;

        info!(
            "[pipeline] {} states, {} regions, {} matched",
            summaries.len(),
            records.len(),
            records.iter().filter(|r| r.is_matched()).count(),
        );
        Ok(Dashboard { summaries, records, report })
    }
}

/// Log unmatched keys; under `strict` they fail the run.
fn check_report(report: &JoinReport, strict: bool) -> DroughtResult<()> {
    if report.is_clean() { return Ok(()) }

    if !report.unmatched_regions.is_empty() {
        warn!("[pipeline] regions without drought data: {}", report.unmatched_regions.join(", "));
    }
    if !report.unmatched_states.is_empty() {
        warn!("[pipeline] states without a boundary: {}", report.unmatched_states.join(", "));
    }
    if strict {
        return Err(DroughtError::JoinMismatch { report: report.clone() });
    }
    Ok(())
}

/// Aggregate observations held in memory as delimited text.
pub fn summarize_str(csv: &str, delimiter: u8) -> DroughtResult<StateSummaries> {
    aggregate(&io::csv::read_observations_string(csv, delimiter)?)
}
