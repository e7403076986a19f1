//! Export link and nearby results to CSV or JSON files.

use std::path::Path;

use parklink_core::EntityLink;

use crate::error::BatchError;
use crate::runner::NearbyBatchResult;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export links to CSV, one row per link with its score breakdown.
///
/// # Errors
///
/// Returns [`BatchError::NothingToExport`] for an empty slice, or an I/O or
/// CSV error if writing fails.
pub fn links_to_csv(links: &[EntityLink], path: impl AsRef<Path>) -> Result<(), BatchError> {
    writer_utils::ensure_not_empty(links)?;
    let file = writer_utils::create_output_file(path)?;
    csv::links_to_csv_impl(links, file)
}

/// Export links as a pretty-printed JSON array. An empty slice writes `[]`.
pub fn links_to_json(links: &[EntityLink], path: impl AsRef<Path>) -> Result<(), BatchError> {
    let file = writer_utils::create_output_file(path)?;
    json::to_json_impl(links, file)
}

/// Export nearby results to CSV, one row per (reference, candidate) pair in
/// reference order, then distance order.
///
/// # Errors
///
/// Returns [`BatchError::NothingToExport`] when no reference admitted any
/// candidate.
pub fn nearby_to_csv(
    results: &[NearbyBatchResult],
    path: impl AsRef<Path>,
) -> Result<(), BatchError> {
    if results.iter().all(|r| r.results.is_empty()) {
        return Err(BatchError::NothingToExport);
    }
    let file = writer_utils::create_output_file(path)?;
    csv::nearby_to_csv_impl(results, file)
}

/// Export nearby results as a pretty-printed JSON array.
pub fn nearby_to_json(
    results: &[NearbyBatchResult],
    path: impl AsRef<Path>,
) -> Result<(), BatchError> {
    let file = writer_utils::create_output_file(path)?;
    json::to_json_impl(results, file)
}
