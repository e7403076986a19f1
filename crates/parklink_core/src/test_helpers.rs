//! Fixture builders shared by unit tests, integration tests and benches.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use crate::entity::NamedGeoEntity;
use crate::spatial::{GeoPoint, EARTH_RADIUS_M};

/// Yosemite Valley, used as the default reference point.
pub const TEST_REFERENCE: GeoPoint = GeoPoint {
    latitude: 37.8651,
    longitude: -119.5383,
};

const NAME_STEMS: &[&str] = &[
    "Yellowstone", "Yosemite", "Zion", "Glacier", "Acadia", "Arches", "Olympic", "Sequoia",
    "Denali", "Everglades", "Redwood", "Shenandoah", "Saguaro", "Badlands", "Capitol Reef",
];

const SUFFIXES: &[&str] = &["National Park", "State Park", "Wilderness", "Recreation Area"];

/// A point `meters` due north of `origin`.
pub fn point_north_of(origin: GeoPoint, meters: f64) -> GeoPoint {
    let dlat = (meters / EARTH_RADIUS_M).to_degrees();
    GeoPoint::new(origin.latitude + dlat, origin.longitude)
}

pub fn located(id: &str, name: &str, point: GeoPoint) -> NamedGeoEntity {
    NamedGeoEntity::new(id, name).with_location(point.latitude, point.longitude)
}

/// The two-source fixture from the reference linking scenario.
pub fn yellowstone_fixture() -> (Vec<NamedGeoEntity>, Vec<NamedGeoEntity>) {
    let source_a = vec![NamedGeoEntity::new("A1", "Yellowstone National Park")
        .with_location(44.428, -110.5885)];
    let source_b = vec![
        NamedGeoEntity::new("B1", "Yellowstone NP").with_location(44.5, -110.6),
        NamedGeoEntity::new("B2", "Yosemite").with_location(37.8, -119.5),
    ];
    (source_a, source_b)
}

/// Seeded catalog of `count` parks scattered over the continental US.
pub fn synthetic_parks(count: usize, seed: u64) -> Vec<NamedGeoEntity> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let stem = NAME_STEMS[rng.gen_range(0..NAME_STEMS.len())];
            let suffix = SUFFIXES[rng.gen_range(0..SUFFIXES.len())];
            let lat = rng.gen_range(25.0..49.0);
            let lon = rng.gen_range(-124.0..-67.0);
            NamedGeoEntity::new(format!("park-{i}"), format!("{stem} {suffix} {i}"))
                .with_location(lat, lon)
        })
        .collect()
}

/// Second-source view of `parks`: upper-cased, abbreviated names, positions
/// jittered by up to ~2 km, and a shuffled order. Every tenth record loses its position.
pub fn perturbed_counterparts(parks: &[NamedGeoEntity], seed: u64) -> Vec<NamedGeoEntity> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out: Vec<NamedGeoEntity> = parks
        .iter()
        .enumerate()
        .map(|(i, park)| {
            let name = park
                .name
                .replace("National Park", "Natl. Park")
                .replace("State Park", "St. Park")
                .to_uppercase();
            let mut entity = NamedGeoEntity::new(format!("kg-{}", park.id), name);
            if i % 10 != 9 {
                if let Some(p) = park.location {
                    entity = entity.with_location(
                        p.latitude + rng.gen_range(-0.015..0.015),
                        p.longitude + rng.gen_range(-0.015..0.015),
                    );
                }
            }
            entity
        })
        .collect();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Seeded trails within `max_distance_m` of `origin`, with difficulty and
/// length metadata.
pub fn synthetic_trails(
    origin: GeoPoint,
    count: usize,
    max_distance_m: f64,
    seed: u64,
) -> Vec<NamedGeoEntity> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let bearing: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
            let distance = rng.gen_range(0.0..max_distance_m);
            let angular = distance / EARTH_RADIUS_M;
            let dlat = (angular * bearing.cos()).to_degrees();
            let dlon = (angular * bearing.sin() / origin.latitude.to_radians().cos()).to_degrees();
            let difficulty = ["easy", "moderate", "hard"][rng.gen_range(0..3)];
            NamedGeoEntity::new(format!("trail-{i}"), format!("Trail {i}"))
                .with_location(origin.latitude + dlat, origin.longitude + dlon)
                .with_metadata(json!({
                    "difficulty": difficulty,
                    "length_km": rng.gen_range(0.5..30.0),
                }))
        })
        .collect()
}
