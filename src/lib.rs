#![doc = "Drought dashboard: per-state aggregation joined onto boundary polygons"]
mod aggregate;
mod common;
mod config;
mod error;
mod io;
mod join;
mod pipeline;
mod types;

pub mod cli;
pub mod commands;
pub mod logging;

#[doc(inline)]
pub use aggregate::aggregate;

#[doc(inline)]
pub use config::{PipelineConfig, RenderOptions};

#[doc(inline)]
pub use error::{DroughtError, DroughtResult};

#[doc(inline)]
pub use join::{join, JoinReport, Joined, KeyNormalization};

#[doc(inline)]
pub use pipeline::{summarize_str, Dashboard, Pipeline};

#[doc(inline)]
pub use types::{CombinedRecord, Observation, RegionPolygon, StateSummaries, StateSummary};
