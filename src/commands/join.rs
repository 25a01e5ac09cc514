use anyhow::Result;

use crate::{cli::{Cli, JoinCommandArgs}, common, pipeline::Pipeline};

pub fn run(cli: &Cli, args: &JoinCommandArgs) -> Result<()> {
    let config = super::resolve_config(cli, &args.input, Some(&args.join))?;
    common::prepare_output(&args.output, args.force)?;

    let dashboard = Pipeline::new(config).run()?;
    dashboard.write_geojson(&args.output)?;

    println!(
        "Joined {} states onto {} regions ({} without data) -> {}",
        dashboard.summaries.len(),
        dashboard.records.len(),
        dashboard.report.unmatched_regions.len(),
        args.output.display(),
    );
    Ok(())
}
