//! Error taxonomy for the drought pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::join::JoinReport;

/// Result type for pipeline operations.
pub type DroughtResult<T> = Result<T, DroughtError>;

#[derive(Error, Debug)]
pub enum DroughtError {
    /// A malformed observation. `record` is 1-based over data rows; 0 means the header.
    #[error("malformed observation at record {record}, column {column:?}: {message}")]
    DataFormat { record: usize, column: String, message: String },

    /// The tabular observation file could not be opened or parsed as delimited text.
    #[error("failed to read observations from {}: {message}", .path.display())]
    DataSource { path: PathBuf, message: String },

    /// The boundary dataset is missing, corrupt or lacks the join field.
    #[error("failed to read boundary data from {}: {message}", .path.display())]
    GeoSource { path: PathBuf, message: String },

    /// Join keys on either side found no partner. Only raised under strict joins.
    #[error(
        "join left {} region(s) and {} state(s) unmatched",
        .report.unmatched_regions.len(),
        .report.unmatched_states.len()
    )]
    JoinMismatch { report: JoinReport },
}

impl DroughtError {
    pub(crate) fn data_format(record: usize, column: &str, message: impl Into<String>) -> Self {
        Self::DataFormat { record, column: column.to_string(), message: message.into() }
    }

    pub(crate) fn geo_source(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::GeoSource { path: path.into(), message: message.into() }
    }

    pub(crate) fn data_source(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DataSource { path: path.into(), message: message.into() }
    }
}
