use serde::{Deserialize, Serialize};

use crate::config::LinkConfig;
use crate::entity::NamedGeoEntity;
use crate::similarity::{normalize_name, normalized_similarity};
use crate::spatial::{haversine_distance_m, GeoPoint};

/// Location similarity in `[0, 1]` with a linear falloff over `max_distance_m`.
///
/// Unpositioned entities cannot be location-matched and score 0.
pub fn location_similarity(
    a: Option<GeoPoint>,
    b: Option<GeoPoint>,
    max_distance_m: f64,
) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    let distance = haversine_distance_m(a, b);
    if distance == 0.0 {
        return 1.0;
    }
    if distance >= max_distance_m {
        return 0.0;
    }
    1.0 - distance / max_distance_m
}

/// Per-pair sub-scores, kept on each link for explanation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub name: f64,
    pub location: f64,
    pub combined: f64,
}

/// Score one source-A/source-B pair.
pub fn score_pair(a: &NamedGeoEntity, b: &NamedGeoEntity, config: &LinkConfig) -> ScoreBreakdown {
    let a_name = normalize_name(&a.name);
    let b_name = normalize_name(&b.name);
    score_prepared(&a_name, a.location, &b_name, b.location, config)
}

/// Score with names already normalized. The linkers normalize every name
/// once per run instead of once per comparison.
pub(crate) fn score_prepared(
    a_name: &str,
    a_location: Option<GeoPoint>,
    b_name: &str,
    b_location: Option<GeoPoint>,
    config: &LinkConfig,
) -> ScoreBreakdown {
    let name = normalized_similarity(a_name, b_name);
    let location = location_similarity(a_location, b_location, config.max_location_distance_m);
    ScoreBreakdown {
        name,
        location,
        combined: config.weights.name * name + config.weights.location * location,
    }
}
