//! Tunable thresholds and weights for linking and proximity search.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::spatial::km_to_m;

/// Minimum combined score for a link to be accepted.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Distance at which location similarity reaches 0 (100 km).
pub const DEFAULT_MAX_LOCATION_DISTANCE_M: f64 = 100_000.0;

pub const DEFAULT_NAME_WEIGHT: f64 = 0.7;
pub const DEFAULT_LOCATION_WEIGHT: f64 = 0.3;

/// Default admission radius for nearby searches (50 km).
pub const DEFAULT_SEARCH_RADIUS_M: f64 = 50_000.0;

/// Slack for weight sums like `0.7 + 0.3` that round above 1.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Linear weighting of the name and location sub-scores.
///
/// Each weight lies in `[0, 1]` and their sum is at most 1, so combined
/// scores stay in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub name: f64,
    pub location: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME_WEIGHT,
            location: DEFAULT_LOCATION_WEIGHT,
        }
    }
}

impl ScoreWeights {
    pub fn new(name: f64, location: f64) -> Self {
        Self { name, location }
    }

    pub fn sum(&self) -> f64 {
        self.name + self.location
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_unit_interval("name", self.name)?;
        check_unit_interval("location", self.location)?;
        if self.sum() > 1.0 + WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::InvalidWeightSum(self.sum()));
        }
        Ok(())
    }
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidWeight { name, value })
    }
}

/// Entity linker configuration.
///
/// Deserializes from partial documents; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Minimum combined score (inclusive) for a link.
    pub match_threshold: f64,
    /// Distance in meters at or beyond which location similarity is 0.
    pub max_location_distance_m: f64,
    pub weights: ScoreWeights,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            max_location_distance_m: DEFAULT_MAX_LOCATION_DISTANCE_M,
            weights: ScoreWeights::default(),
        }
    }
}

impl LinkConfig {
    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    pub fn with_max_location_distance_m(mut self, meters: f64) -> Self {
        self.max_location_distance_m = meters;
        self
    }

    /// Kilometer entry point for callers that configure the falloff in km.
    pub fn with_max_location_distance_km(self, km: f64) -> Self {
        self.with_max_location_distance_m(km_to_m(km))
    }

    pub fn with_weights(mut self, name: f64, location: f64) -> Self {
        self.weights = ScoreWeights::new(name, location);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(ValidationError::InvalidThreshold(self.match_threshold));
        }
        if !self.max_location_distance_m.is_finite() || self.max_location_distance_m <= 0.0 {
            return Err(ValidationError::InvalidDistance(self.max_location_distance_m));
        }
        self.weights.validate()
    }
}

/// Defaults applied by callers that build proximity queries from loose input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    pub default_radius_m: f64,
    pub default_limit: Option<usize>,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            default_radius_m: DEFAULT_SEARCH_RADIUS_M,
            default_limit: None,
        }
    }
}

impl ProximityConfig {
    pub fn with_default_radius_m(mut self, meters: f64) -> Self {
        self.default_radius_m = meters;
        self
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.default_radius_m.is_finite() || self.default_radius_m < 0.0 {
            return Err(ValidationError::InvalidRadius(self.default_radius_m));
        }
        Ok(())
    }
}
