use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::NamedGeoEntity;
use crate::scoring::ScoreBreakdown;

/// How a link's score was composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Both records carried a position, so location contributed to the score.
    NameAndLocation,
    /// At least one record had no position; the score is name similarity only.
    NameOnly,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::NameAndLocation => "name_and_location",
            MatchMethod::NameOnly => "name_only",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision that a source-A record and a source-B record describe the
/// same real-world place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityLink {
    pub source_a_id: String,
    pub source_b_id: String,
    /// Combined confidence in `[0, 1]`.
    pub score: f64,
    pub method: MatchMethod,
    pub breakdown: ScoreBreakdown,
}

impl EntityLink {
    pub(crate) fn new(a: &NamedGeoEntity, b: &NamedGeoEntity, breakdown: ScoreBreakdown) -> Self {
        let method = if a.location.is_some() && b.location.is_some() {
            MatchMethod::NameAndLocation
        } else {
            MatchMethod::NameOnly
        };
        Self {
            source_a_id: a.id.clone(),
            source_b_id: b.id.clone(),
            score: breakdown.combined,
            method,
            breakdown,
        }
    }
}

/// Assignment strategy used for a linking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStrategy {
    /// Input-order greedy assignment. Reference behavior.
    #[default]
    Greedy,
    /// Maximum-weight bipartite assignment. Opt-in; may pick different
    /// links than `Greedy` for the same input.
    Optimal,
}

impl fmt::Display for LinkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStrategy::Greedy => f.write_str("greedy"),
            LinkStrategy::Optimal => f.write_str("optimal"),
        }
    }
}

impl FromStr for LinkStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(LinkStrategy::Greedy),
            "optimal" | "hungarian" => Ok(LinkStrategy::Optimal),
            other => Err(format!("unknown link strategy `{other}`")),
        }
    }
}

/// Result of one linking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkReport {
    pub strategy: LinkStrategy,
    /// Links in source-A input order.
    pub links: Vec<EntityLink>,
    /// Source-A ids that received no link, in input order.
    pub unmatched_source_a: Vec<String>,
    /// Source-B ids nobody claimed, in input order (each id once).
    pub unused_source_b: Vec<String>,
}

impl LinkReport {
    pub(crate) fn new(
        strategy: LinkStrategy,
        links: Vec<EntityLink>,
        source_a: &[NamedGeoEntity],
        source_b: &[NamedGeoEntity],
    ) -> Self {
        let linked_a: HashSet<&str> = links.iter().map(|l| l.source_a_id.as_str()).collect();
        let linked_b: HashSet<&str> = links.iter().map(|l| l.source_b_id.as_str()).collect();

        let unmatched_source_a = source_a
            .iter()
            .filter(|e| !linked_a.contains(e.id.as_str()))
            .map(|e| e.id.clone())
            .collect();

        let mut seen_b = HashSet::new();
        let unused_source_b = source_b
            .iter()
            .filter(|e| !linked_b.contains(e.id.as_str()) && seen_b.insert(e.id.as_str()))
            .map(|e| e.id.clone())
            .collect();

        Self {
            strategy,
            links,
            unmatched_source_a,
            unused_source_b,
        }
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Mean link score, or `None` when nothing was linked.
    pub fn mean_score(&self) -> Option<f64> {
        if self.links.is_empty() {
            return None;
        }
        let total: f64 = self.links.iter().map(|l| l.score).sum();
        Some(total / self.links.len() as f64)
    }

    /// The link claimed by `source_a_id`, if any.
    pub fn link_for(&self, source_a_id: &str) -> Option<&EntityLink> {
        self.links.iter().find(|l| l.source_a_id == source_a_id)
    }
}
