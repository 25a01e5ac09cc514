use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::join::KeyNormalization;

/// Drought dashboard builder
#[derive(Parser, Debug)]
#[command(name = "droughtmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON settings file; flags given here override it
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate observations into one row per state and print the table
    Summarize(SummarizeArgs),

    /// Join the state summaries onto boundary polygons and write GeoJSON
    Join(JoinCommandArgs),

    /// Write the table, GeoJSON, choropleth map and pie chart into a directory
    Render(RenderArgs),
}

#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Observation CSV with State, Drought_Percentage and Crop_Type columns
    #[arg(value_hint = ValueHint::FilePath)]
    pub observations: Option<PathBuf>,

    /// Field delimiter of the observation file
    #[arg(long)]
    pub delimiter: Option<char>,
}

#[derive(Args, Debug, Default)]
pub struct JoinArgs {
    /// Boundary shapefile or a directory containing one
    #[arg(value_hint = ValueHint::AnyPath)]
    pub boundaries: Option<PathBuf>,

    /// Attribute holding the region name in the boundary data
    #[arg(long)]
    pub name_field: Option<String>,

    /// How region and state names are compared
    #[arg(long, value_enum)]
    pub normalize: Option<KeyNormalization>,

    /// Fail when any region or state is left unmatched
    #[arg(long)]
    pub strict_join: bool,
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also write the table as CSV to this file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct JoinCommandArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub join: JoinArgs,

    /// Output GeoJSON file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub join: JoinArgs,

    /// Output directory for summary.csv, combined.geojson, map.svg and pie.svg
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub out_dir: PathBuf,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<f64>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};
    use crate::join::KeyNormalization;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_flags() {
        let cli = Cli::try_parse_from([
            "droughtmap", "-vv", "render", "drought.csv", "data/", "--out-dir", "out",
            "--normalize", "case-insensitive", "--strict-join", "--width", "900",
        ]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Render(args) = cli.command else { panic!("expected render") };
        assert_eq!(args.input.observations.as_deref(), Some(std::path::Path::new("drought.csv")));
        assert_eq!(args.join.boundaries.as_deref(), Some(std::path::Path::new("data/")));
        assert_eq!(args.join.normalize, Some(KeyNormalization::CaseInsensitive));
        assert!(args.join.strict_join);
        assert_eq!(args.width, Some(900.0));
    }

    #[test]
    fn summarize_needs_no_boundaries() {
        let cli = Cli::try_parse_from(["droughtmap", "summarize", "drought.csv"]).unwrap();
        assert!(matches!(cli.command, Commands::Summarize(_)));
    }
}
