use serde::Serialize;

use crate::error::BatchError;

pub(crate) fn to_json_impl<T: Serialize>(
    items: &[T],
    file: std::fs::File,
) -> Result<(), BatchError> {
    serde_json::to_writer_pretty(file, items)?;
    Ok(())
}
