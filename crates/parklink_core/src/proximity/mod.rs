//! Nearby-entity search: which trails, BLM lands or places lie within a
//! radius of a park.
//!
//! The pipeline is fixed:
//!
//! 1. drop candidates without a position
//! 2. keep candidates with `distance <= radius` (inclusive)
//! 3. stable sort ascending by distance, ties in input order
//! 4. apply attribute post-filters
//! 5. truncate to the limit
//!
//! The limit is always applied last so it never favors input order over
//! distance.

pub mod filter;

pub use filter::AttributeFilter;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ProximityConfig;
use crate::entity::NamedGeoEntity;
use crate::error::ValidationError;
use crate::spatial::{haversine_distance_m, GeoPoint};

/// One nearby search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityQuery {
    pub reference: GeoPoint,
    pub radius_m: f64,
    #[serde(default)]
    pub filters: Vec<AttributeFilter>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ProximityQuery {
    pub fn new(reference: GeoPoint, radius_m: f64) -> Self {
        Self {
            reference,
            radius_m,
            filters: Vec::new(),
            limit: None,
        }
    }

    /// Query using the configured default radius and limit.
    pub fn from_config(reference: GeoPoint, config: &ProximityConfig) -> Self {
        Self {
            limit: config.default_limit,
            ..Self::new(reference, config.default_radius_m)
        }
    }

    pub fn with_filter(mut self, filter: AttributeFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Same query centered on another point.
    pub fn recentered(&self, reference: GeoPoint) -> Self {
        Self {
            reference,
            ..self.clone()
        }
    }

    /// Whether `entity` passes every attribute filter.
    pub fn matches_filters(&self, entity: &NamedGeoEntity) -> bool {
        self.filters.iter().all(|f| f.matches(entity))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.reference.is_valid() {
            return Err(ValidationError::CoordinateOutOfRange {
                id: "<reference>".to_string(),
                latitude: self.reference.latitude,
                longitude: self.reference.longitude,
            });
        }
        if !self.radius_m.is_finite() || self.radius_m < 0.0 {
            return Err(ValidationError::InvalidRadius(self.radius_m));
        }
        Ok(())
    }
}

/// A candidate admitted by a nearby search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityResult {
    pub entity: NamedGeoEntity,
    /// Great-circle distance from the reference point in meters.
    pub distance_m: f64,
    /// Radius the candidate was admitted under.
    pub radius_m: f64,
}

/// Run `query` over `candidates`.
///
/// Candidates are not validated individually: one without a position is
/// skipped, never an error. Only the query itself can be rejected.
pub fn find_nearby(
    query: &ProximityQuery,
    candidates: &[NamedGeoEntity],
) -> Result<Vec<ProximityResult>, ValidationError> {
    if let Err(err) = query.validate() {
        warn!(error = %err, "rejecting proximity query");
        return Err(err);
    }

    let mut within: Vec<(&NamedGeoEntity, f64)> = candidates
        .iter()
        .filter_map(|candidate| {
            let location = candidate.location?;
            let distance = haversine_distance_m(query.reference, location);
            (distance <= query.radius_m).then_some((candidate, distance))
        })
        .collect();

    // `sort_by` is stable, which keeps equal distances in input order.
    within.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    let filtered = within
        .into_iter()
        .filter(|(candidate, _)| query.matches_filters(candidate));

    let limit = query.limit.unwrap_or(usize::MAX);
    let results: Vec<ProximityResult> = filtered
        .take(limit)
        .map(|(candidate, distance_m)| ProximityResult {
            entity: candidate.clone(),
            distance_m,
            radius_m: query.radius_m,
        })
        .collect();

    debug!(
        candidates = candidates.len(),
        admitted = results.len(),
        radius_m = query.radius_m,
        "proximity search complete"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::test_helpers::{point_north_of as north_of, TEST_REFERENCE as YOSEMITE};

    fn at(id: &str, point: GeoPoint) -> NamedGeoEntity {
        NamedGeoEntity::new(id, id).with_location(point.latitude, point.longitude)
    }

    #[test]
    fn keeps_only_candidates_within_radius_sorted() {
        let candidates = vec![
            at("far", north_of(YOSEMITE, 15_000.0)),
            at("mid", north_of(YOSEMITE, 5_000.0)),
            at("here", YOSEMITE),
        ];
        let results = find_nearby(&ProximityQuery::new(YOSEMITE, 10_000.0), &candidates)
            .expect("valid query");

        let ids: Vec<_> = results.iter().map(|r| r.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["here", "mid"]);
        assert_eq!(results[0].distance_m, 0.0);
        assert!((results[1].distance_m - 5_000.0).abs() < 1e-6);
        assert!(results.iter().all(|r| r.radius_m == 10_000.0));
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let edge = at("edge", north_of(YOSEMITE, 1_000.0));
        let exact = haversine_distance_m(YOSEMITE, edge.location.expect("located"));
        let results =
            find_nearby(&ProximityQuery::new(YOSEMITE, exact), &[edge]).expect("valid query");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn unpositioned_candidates_are_skipped() {
        let candidates = vec![NamedGeoEntity::new("nowhere", "Nowhere"), at("here", YOSEMITE)];
        let results =
            find_nearby(&ProximityQuery::new(YOSEMITE, 1.0), &candidates).expect("valid query");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entity.id, "here");
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let p = north_of(YOSEMITE, 2_000.0);
        let candidates = vec![at("first", p), at("second", p), at("third", p)];
        let results =
            find_nearby(&ProximityQuery::new(YOSEMITE, 5_000.0), &candidates).expect("valid query");
        let ids: Vec<_> = results.iter().map(|r| r.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn limit_applies_after_sort_and_filter() {
        let candidates = vec![
            at("far-easy", north_of(YOSEMITE, 4_000.0))
                .with_metadata(json!({ "difficulty": "easy" })),
            at("near-hard", north_of(YOSEMITE, 1_000.0))
                .with_metadata(json!({ "difficulty": "hard" })),
            at("mid-easy", north_of(YOSEMITE, 2_000.0))
                .with_metadata(json!({ "difficulty": "easy" })),
        ];
        let query = ProximityQuery::new(YOSEMITE, 10_000.0)
            .with_filter(AttributeFilter::equals("difficulty", "easy"))
            .with_limit(1);

        let results = find_nearby(&query, &candidates).expect("valid query");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entity.id, "mid-easy");
    }

    #[test]
    fn empty_candidates_yield_empty_results() {
        let results = find_nearby(&ProximityQuery::new(YOSEMITE, 10_000.0), &[]).expect("valid");
        assert!(results.is_empty());
    }

    #[test]
    fn rejects_bad_query() {
        assert_eq!(
            find_nearby(&ProximityQuery::new(YOSEMITE, -1.0), &[]),
            Err(ValidationError::InvalidRadius(-1.0))
        );
        let off_globe = ProximityQuery::new(GeoPoint::new(91.0, 0.0), 1.0);
        assert!(find_nearby(&off_globe, &[]).is_err());
    }

    #[test]
    fn config_defaults_flow_into_query() {
        let config = ProximityConfig {
            default_limit: Some(5),
            ..ProximityConfig::default()
        };
        let query = ProximityQuery::from_config(YOSEMITE, &config);
        assert_eq!(query.radius_m, 50_000.0);
        assert_eq!(query.limit, Some(5));
    }
}
