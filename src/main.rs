use anyhow::Result;
use clap::Parser;

use droughtmap::cli::{Cli, Commands};
use droughtmap::commands::{join, render, summarize};
use droughtmap::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Summarize(args) => summarize::run(&cli, args),
        Commands::Join(args) => join::run(&cli, args),
        Commands::Render(args) => render::run(&cli, args),
    }
}
