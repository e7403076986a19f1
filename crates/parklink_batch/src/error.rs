use std::path::PathBuf;

use parklink_core::ValidationError;
use thiserror::Error;

/// Failures of a batch run: bad input files, invalid records, or export I/O.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("record {index} in {path}: {source}")]
    Record {
        path: PathBuf,
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no results to export")]
    NothingToExport,

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
