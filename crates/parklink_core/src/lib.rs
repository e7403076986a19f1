//! Matching and scoring core for reconciling and searching park records.
//!
//! - [`similarity`]: edit-distance name similarity
//! - [`spatial`]: geographic points and Haversine distances (meters)
//! - [`scoring`]: location similarity and the weighted pair score
//! - [`linking`]: entity linking between two sources (greedy by default)
//! - [`proximity`]: radius search with post-filters and limits
//!
//! Everything here is a synchronous pure function over in-memory data. Data
//! fetching, persistence and request timeouts belong to the caller.

pub mod config;
pub mod entity;
pub mod error;
pub mod linking;
pub mod proximity;
pub mod scoring;
pub mod similarity;
pub mod spatial;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::{LinkConfig, ProximityConfig, ScoreWeights};
pub use entity::{NamedGeoEntity, RawEntity};
pub use error::ValidationError;
pub use linking::{link_entities, EntityLink, EntityLinker, LinkReport, LinkStrategy, MatchMethod};
pub use proximity::{find_nearby, AttributeFilter, ProximityQuery, ProximityResult};
pub use spatial::GeoPoint;
