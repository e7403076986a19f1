//! Loading entity collections exported from the datastore.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use parklink_core::{LinkConfig, NamedGeoEntity, ProximityConfig, RawEntity};
use tracing::info;

use crate::error::BatchError;

/// Read a JSON array of raw records and validate every one of them.
///
/// The first malformed record aborts the load, naming its index.
pub fn load_entities(path: impl AsRef<Path>) -> Result<Vec<NamedGeoEntity>, BatchError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let raw: Vec<RawEntity> = serde_json::from_reader(reader)?;
    let entities = convert_records(raw, path)?;
    info!(path = %path.display(), count = entities.len(), "loaded entities");
    Ok(entities)
}

fn convert_records(
    raw: Vec<RawEntity>,
    path: &Path,
) -> Result<Vec<NamedGeoEntity>, BatchError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            NamedGeoEntity::try_from(record).map_err(|source| BatchError::Record {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

/// Read a [`LinkConfig`] from a JSON file; omitted fields keep their defaults.
pub fn load_link_config(path: impl AsRef<Path>) -> Result<LinkConfig, BatchError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let config: LinkConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

/// Read a [`ProximityConfig`] from a JSON file; omitted fields keep their defaults.
pub fn load_proximity_config(path: impl AsRef<Path>) -> Result<ProximityConfig, BatchError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let config: ProximityConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}
