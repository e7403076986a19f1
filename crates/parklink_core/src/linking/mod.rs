//! Entity linking: decide which source-A records and source-B records refer
//! to the same park.
//!
//! Two assignment strategies share one scoring model (see [`crate::scoring`]):
//!
//! - [`GreedyLinker`]: the reference behavior. Source-A records are visited in
//!   input order and each claims its best still-available source-B record.
//!   Order-dependent and not globally optimal.
//! - [`OptimalLinker`]: opt-in Kuhn-Munkres assignment over the same scores.
//!
//! Both are O(|A| x |B|) in score evaluations. Very large collections should
//! be narrowed (bounding box, grid cell) by the caller before linking.

pub mod algorithm;
pub mod greedy;
pub mod optimal;
pub mod types;

pub use algorithm::EntityLinker;
pub use greedy::GreedyLinker;
pub use optimal::OptimalLinker;
pub use types::{EntityLink, LinkReport, LinkStrategy, MatchMethod};

use crate::config::LinkConfig;
use crate::entity::NamedGeoEntity;
use crate::error::ValidationError;
use crate::scoring::{score_prepared, ScoreBreakdown};
use crate::similarity::normalize_name;

/// An entity paired with its normalized name, computed once per run.
#[derive(Debug, Clone)]
pub struct PreparedEntity<'a> {
    pub entity: &'a NamedGeoEntity,
    pub normalized_name: String,
}

impl<'a> PreparedEntity<'a> {
    pub fn new(entity: &'a NamedGeoEntity) -> Self {
        Self {
            entity,
            normalized_name: normalize_name(&entity.name),
        }
    }

    pub fn prepare_all(entities: &'a [NamedGeoEntity]) -> Vec<Self> {
        entities.iter().map(Self::new).collect()
    }

    pub fn id(&self) -> &'a str {
        &self.entity.id
    }

    pub fn score_against(&self, other: &PreparedEntity<'_>, config: &LinkConfig) -> ScoreBreakdown {
        score_prepared(
            &self.normalized_name,
            self.entity.location,
            &other.normalized_name,
            other.entity.location,
            config,
        )
    }
}

impl LinkStrategy {
    /// Build the linker for this strategy.
    pub fn build(self, config: LinkConfig) -> Box<dyn EntityLinker> {
        match self {
            LinkStrategy::Greedy => Box::new(GreedyLinker::new(config)),
            LinkStrategy::Optimal => Box::new(OptimalLinker::new(config)),
        }
    }
}

/// Link with the reference (greedy) strategy.
pub fn link_entities(
    source_a: &[NamedGeoEntity],
    source_b: &[NamedGeoEntity],
    config: LinkConfig,
) -> Result<LinkReport, ValidationError> {
    GreedyLinker::new(config).link(source_a, source_b)
}
