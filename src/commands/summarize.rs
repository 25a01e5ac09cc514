use anyhow::Result;
use tracing::info;

use crate::{cli::{Cli, SummarizeArgs}, common, io, pipeline::Pipeline};

pub fn run(cli: &Cli, args: &SummarizeArgs) -> Result<()> {
    let config = super::resolve_config(cli, &args.input, None)?;
    if let Some(output) = &args.output { common::prepare_output(output, args.force)? }

    let summaries = Pipeline::new(config).summarize()?;
    print!("{}", io::csv::format_summary_table(&summaries));

    if let Some(output) = &args.output {
        io::csv::write_summary_csv(&summaries, output)?;
        info!("[summarize] wrote {} states -> {}", summaries.len(), output.display());
    }
    Ok(())
}
