use std::collections::HashSet;

use tracing::trace;

use crate::config::LinkConfig;
use crate::scoring::ScoreBreakdown;

use super::algorithm::EntityLinker;
use super::types::{EntityLink, LinkStrategy};
use super::PreparedEntity;

/// Greedy, input-order linking.
///
/// # Algorithm Behavior
///
/// 1. Every source-B record starts available
/// 2. Source-A records are visited in input order
/// 3. Each one is scored against every still-available source-B record
/// 4. The strictly highest combined score wins; ties keep the earlier source-B record
/// 5. A best score below the threshold leaves the source-A record unlinked
/// 6. Otherwise the link is emitted and that source-B id is consumed
///
/// Earlier source-A records get first pick, so reordering the input can
/// change the result. This is not a globally optimal assignment; see
/// [`super::OptimalLinker`] for that.
///
/// # Performance
///
/// O(|A| x |B|) score evaluations.
#[derive(Debug, Default, Clone)]
pub struct GreedyLinker {
    pub config: LinkConfig,
}

impl GreedyLinker {
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }
}

impl EntityLinker for GreedyLinker {
    fn strategy(&self) -> LinkStrategy {
        LinkStrategy::Greedy
    }

    fn config(&self) -> &LinkConfig {
        &self.config
    }

    fn assign(
        &self,
        source_a: &[PreparedEntity<'_>],
        source_b: &[PreparedEntity<'_>],
    ) -> Vec<EntityLink> {
        let mut consumed: HashSet<&str> = HashSet::new();
        let mut links = Vec::new();

        for candidate_a in source_a {
            let mut best: Option<(&PreparedEntity<'_>, ScoreBreakdown)> = None;

            for candidate_b in source_b {
                if consumed.contains(candidate_b.id()) {
                    continue;
                }
                let breakdown = candidate_a.score_against(candidate_b, &self.config);
                let improves = best.map_or(true, |(_, current)| breakdown.combined > current.combined);
                if improves {
                    best = Some((candidate_b, breakdown));
                }
            }

            let Some((candidate_b, breakdown)) = best else {
                continue;
            };
            if breakdown.combined < self.config.match_threshold {
                continue;
            }

            trace!(
                source_a = candidate_a.id(),
                source_b = candidate_b.id(),
                score = breakdown.combined,
                "linked"
            );
            consumed.insert(candidate_b.id());
            links.push(EntityLink::new(candidate_a.entity, candidate_b.entity, breakdown));
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NamedGeoEntity;

    fn park(id: &str, name: &str, lat: f64, lon: f64) -> NamedGeoEntity {
        NamedGeoEntity::new(id, name).with_location(lat, lon)
    }

    #[test]
    fn earlier_source_a_claims_the_shared_best_candidate() {
        let linker = GreedyLinker::default();
        let source_a = vec![
            park("A1", "Glacier", 48.7, -113.7),
            park("A2", "Glacier", 48.7, -113.7),
        ];
        let source_b = vec![park("B1", "Glacier", 48.7, -113.7)];

        let report = linker.link(&source_a, &source_b).expect("linking run");
        assert_eq!(report.links.len(), 1);
        assert_eq!(report.links[0].source_a_id, "A1");
        assert_eq!(report.unmatched_source_a, vec!["A2".to_string()]);
    }

    #[test]
    fn ties_keep_the_first_source_b_candidate() {
        let linker = GreedyLinker::default();
        let source_a = vec![park("A1", "Acadia", 44.35, -68.21)];
        let source_b = vec![
            park("B1", "Acadia", 44.35, -68.21),
            park("B2", "Acadia", 44.35, -68.21),
        ];

        let report = linker.link(&source_a, &source_b).expect("linking run");
        assert_eq!(report.links[0].source_b_id, "B1");
        assert_eq!(report.unused_source_b, vec!["B2".to_string()]);
    }

    #[test]
    fn greedy_is_order_dependent() {
        // A1 scores B1 slightly above B2 and takes it. A2 would have matched
        // B1 perfectly but only B2 is left, which falls below the threshold.
        let linker = GreedyLinker::default();
        let b1 = park("B1", "Big Bend", 29.25, -103.25);
        let b2 = park("B2", "Big Bend Ranch", 29.47, -103.95);
        let source_a = vec![
            park("A1", "Big Bend Rnch", 29.25, -103.25),
            park("A2", "Big Bend", 29.25, -103.25),
        ];

        let report = linker.link(&source_a, &[b1, b2]).expect("linking run");
        let linked_to = |id| report.link_for(id).map(|l| l.source_b_id.as_str());
        assert_eq!(linked_to("A1"), Some("B1"));
        assert_ne!(linked_to("A2"), Some("B1"));
    }

    #[test]
    fn below_threshold_is_left_unlinked() {
        let linker = GreedyLinker::default();
        let source_a = vec![park("A1", "Everglades", 25.29, -80.90)];
        let source_b = vec![park("B1", "Denali", 63.33, -150.50)];

        let report = linker.link(&source_a, &source_b).expect("linking run");
        assert!(report.is_empty());
        assert_eq!(report.mean_score(), None);
    }

    #[test]
    fn duplicate_source_b_ids_are_consumed_together() {
        let linker = GreedyLinker::default();
        let source_a = vec![
            park("A1", "Olympic", 47.80, -123.60),
            park("A2", "Olympic", 47.80, -123.60),
        ];
        let source_b = vec![
            park("B1", "Olympic", 47.80, -123.60),
            park("B1", "Olympic", 47.80, -123.60),
        ];

        let report = linker.link(&source_a, &source_b).expect("linking run");
        assert_eq!(report.links.len(), 1);
    }
}
