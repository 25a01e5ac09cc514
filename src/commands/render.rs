use anyhow::{Context, Result};
use tracing::info;

use crate::{cli::{Cli, RenderArgs}, common, pipeline::Pipeline};

pub const SUMMARY_FILE: &str = "summary.csv";
pub const GEOJSON_FILE: &str = "combined.geojson";
pub const MAP_FILE: &str = "map.svg";
pub const PIE_FILE: &str = "pie.svg";

pub fn run(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let mut config = super::resolve_config(cli, &args.input, Some(&args.join))?;
    if let Some(width) = args.width { config.render.width = width }
    config.render.validate()?;

    let pipeline = Pipeline::new(config);
    let dashboard = pipeline.run()?;
    let options = &pipeline.config().render;

    // Render everything before touching the output directory.
    let geojson = serde_json::to_string(&dashboard.geojson())
        .context("[render] Failed to serialize GeoJSON")?;
    let outputs = [
        (args.out_dir.join(SUMMARY_FILE), dashboard.summary_csv()?),
        (args.out_dir.join(GEOJSON_FILE), geojson),
        (args.out_dir.join(MAP_FILE), dashboard.choropleth_svg(options)?),
        (args.out_dir.join(PIE_FILE), dashboard.pie_svg(options)?),
    ];

    common::ensure_dir_exists(&args.out_dir)?;
    common::write_outputs(&outputs, args.force)?;
    info!("[render] wrote {} files to {}", outputs.len(), args.out_dir.display());

    print!("{}", dashboard.summary_table());
    println!("Rendered dashboard -> {}", args.out_dir.display());
    Ok(())
}
