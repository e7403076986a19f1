use std::fs::File;
use std::path::Path;

use crate::error::BatchError;

pub(crate) fn ensure_not_empty<T>(items: &[T]) -> Result<(), BatchError> {
    if items.is_empty() {
        return Err(BatchError::NothingToExport);
    }

    Ok(())
}

pub(crate) fn create_output_file(path: impl AsRef<Path>) -> Result<File, BatchError> {
    Ok(File::create(path)?)
}
