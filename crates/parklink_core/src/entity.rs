//! Named, optionally positioned records from one data source.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::spatial::GeoPoint;

/// A park, trail, BLM land or place as handed to the matchers.
///
/// The position is either fully known or absent. `metadata` carries the
/// source's own fields and is never inspected by the linker; the proximity
/// post-filters read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedGeoEntity {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

impl NamedGeoEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: None,
            metadata: Value::Null,
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoPoint::new(latitude, longitude));
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Checks the invariants the matchers rely on: a non-empty id and, when a
    /// position is present, finite in-range coordinates.
    ///
    /// An empty name is allowed; it simply scores 0 on name similarity.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if let Some(point) = self.location {
            if !point.latitude.is_finite() || !point.longitude.is_finite() {
                return Err(ValidationError::NonFiniteCoordinate {
                    id: self.id.clone(),
                });
            }
            if !point.is_valid() {
                return Err(ValidationError::CoordinateOutOfRange {
                    id: self.id.clone(),
                    latitude: point.latitude,
                    longitude: point.longitude,
                });
            }
        }
        Ok(())
    }

    /// Look up a top-level metadata field.
    pub fn attribute(&self, field: &str) -> Option<&Value> {
        self.metadata.get(field)
    }
}

/// Wire shape of an entity as the datastore returns it: flat, with every
/// field optional. Convert with `NamedGeoEntity::try_from`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "label")]
    pub name: Option<String>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lon", alias = "lng")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub metadata: Value,
}

impl TryFrom<RawEntity> for NamedGeoEntity {
    type Error = ValidationError;

    fn try_from(raw: RawEntity) -> Result<Self, Self::Error> {
        let id = match raw.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(ValidationError::MissingId),
        };
        let name = raw
            .name
            .ok_or_else(|| ValidationError::MissingName { id: id.clone() })?;
        let location = match (raw.latitude, raw.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            (None, None) => None,
            _ => return Err(ValidationError::PartialCoordinates { id }),
        };

        let entity = NamedGeoEntity {
            id,
            name,
            location,
            metadata: raw.metadata,
        };
        entity.validate()?;
        Ok(entity)
    }
}

impl From<&NamedGeoEntity> for RawEntity {
    fn from(entity: &NamedGeoEntity) -> Self {
        RawEntity {
            id: Some(entity.id.clone()),
            name: Some(entity.name.clone()),
            latitude: entity.location.map(|p| p.latitude),
            longitude: entity.location.map(|p| p.longitude),
            metadata: entity.metadata.clone(),
        }
    }
}

/// Validate every entity in `entities`, failing on the first bad one.
pub fn validate_all(entities: &[NamedGeoEntity]) -> Result<(), ValidationError> {
    entities.iter().try_for_each(NamedGeoEntity::validate)
}

/// Fail on the first identifier that occurs twice in `entities`.
pub fn ensure_unique_ids(entities: &[NamedGeoEntity]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(entities.len());
    match entities.iter().find(|e| !seen.insert(e.id.as_str())) {
        Some(duplicate) => Err(ValidationError::DuplicateId {
            id: duplicate.id.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(id: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> RawEntity {
        RawEntity {
            id: id.map(str::to_string),
            name: Some("Zion".to_string()),
            latitude: lat,
            longitude: lon,
            metadata: Value::Null,
        }
    }

    #[test]
    fn converts_positioned_and_unpositioned_records() {
        let positioned = NamedGeoEntity::try_from(raw(Some("z"), Some(37.3), Some(-113.0)))
            .expect("valid entity");
        assert_eq!(positioned.location, Some(GeoPoint::new(37.3, -113.0)));

        let bare = NamedGeoEntity::try_from(raw(Some("z"), None, None)).expect("valid entity");
        assert!(bare.location.is_none());
    }

    #[test]
    fn rejects_missing_or_blank_id() {
        assert_eq!(
            NamedGeoEntity::try_from(raw(None, None, None)),
            Err(ValidationError::MissingId)
        );
        assert_eq!(
            NamedGeoEntity::try_from(raw(Some("  "), None, None)),
            Err(ValidationError::MissingId)
        );
    }

    #[test]
    fn rejects_half_a_position() {
        let err = NamedGeoEntity::try_from(raw(Some("z"), Some(37.3), None)).unwrap_err();
        assert_eq!(err, ValidationError::PartialCoordinates { id: "z".into() });
    }

    #[test]
    fn rejects_out_of_range_position() {
        let err = NamedGeoEntity::try_from(raw(Some("z"), Some(123.0), Some(0.0))).unwrap_err();
        assert!(matches!(err, ValidationError::CoordinateOutOfRange { .. }));
    }

    #[test]
    fn rejects_non_finite_position() {
        let entity = NamedGeoEntity::new("z", "Zion").with_location(f64::NAN, 0.0);
        assert_eq!(
            entity.validate(),
            Err(ValidationError::NonFiniteCoordinate { id: "z".into() })
        );
    }

    #[test]
    fn deserializes_datastore_aliases() {
        let raw: RawEntity = serde_json::from_value(json!({
            "id": "t-1",
            "label": "Mist Trail",
            "lat": 37.73,
            "lng": -119.55,
            "metadata": { "difficulty": "hard" }
        }))
        .expect("raw entity");
        let entity = NamedGeoEntity::try_from(raw).expect("valid entity");
        assert_eq!(entity.name, "Mist Trail");
        assert_eq!(entity.attribute("difficulty"), Some(&json!("hard")));
    }

    #[test]
    fn raw_view_converts_back() {
        let entity = NamedGeoEntity::new("p", "Zion").with_location(37.3, -113.0);
        let back = NamedGeoEntity::try_from(RawEntity::from(&entity)).expect("valid entity");
        assert_eq!(back, entity);

        let unpositioned = NamedGeoEntity::new("q", "Arches");
        let raw = RawEntity::from(&unpositioned);
        assert_eq!((raw.latitude, raw.longitude), (None, None));
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let entities = vec![
            NamedGeoEntity::new("p1", "Zion"),
            NamedGeoEntity::new("p2", "Arches"),
            NamedGeoEntity::new("p1", "Zion Canyon"),
        ];
        assert_eq!(
            ensure_unique_ids(&entities),
            Err(ValidationError::DuplicateId { id: "p1".into() })
        );
        assert!(ensure_unique_ids(&entities[..2]).is_ok());
    }
}
