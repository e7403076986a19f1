//! Spatial operations: geographic points and great-circle distances.
//!
//! All distances are in **meters**. Call sites that think in kilometers
//! (the entity linker's location falloff, for example) convert at their
//! configuration boundary with [`km_to_m`].

use serde::{Deserialize, Serialize};

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Conversion factor between the kilometer and meter call sites.
pub const METERS_PER_KM: f64 = 1_000.0;

/// A position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components finite and within latitude [-90, 90], longitude [-180, 180].
    pub fn is_valid(&self) -> bool {
        validate_coordinates(self.latitude, self.longitude)
    }

    /// Distance to `other` in meters.
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        haversine_distance_m(*self, *other)
    }
}

/// Boundary check for raw coordinates. The distance functions themselves
/// do not validate.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

/// Great-circle distance between two points in meters (Haversine).
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }
    let (lat1, lon1) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat2, lon2) = (b.latitude.to_radians(), b.longitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Great-circle distance in kilometers, for display.
pub fn haversine_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    m_to_km(haversine_distance_m(a, b))
}

/// Kilometers to meters.
pub fn km_to_m(km: f64) -> f64 {
    km * METERS_PER_KM
}

/// Meters to kilometers.
pub fn m_to_km(m: f64) -> f64 {
    m / METERS_PER_KM
}
