//! Subcommand entry points.

pub mod join;
pub mod render;
pub mod summarize;

use anyhow::Result;

use crate::{cli::{Cli, InputArgs, JoinArgs}, config::PipelineConfig};

/// Settings file (if any) with command-line flags applied on top.
pub(crate) fn resolve_config(cli: &Cli, input: &InputArgs, join: Option<&JoinArgs>) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(path) = &input.observations { config.observations = path.clone() }
    if let Some(delimiter) = input.delimiter { config.delimiter = delimiter }

    if let Some(join) = join {
        if let Some(path) = &join.boundaries { config.boundaries = path.clone() }
        if let Some(field) = &join.name_field { config.name_field = field.clone() }
        if let Some(normalization) = join.normalize { config.normalization = normalization }
        config.strict_join |= join.strict_join;
    }

    config.validate()?;
    Ok(config)
}
