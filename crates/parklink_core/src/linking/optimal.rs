//! Kuhn-Munkres assignment for entity linking.
//!
//! Uses the same pair scores and threshold as [`super::GreedyLinker`] but picks the
//! set of links with the largest total score instead of letting earlier
//! source-A records choose first. This is an opt-in alternative: for the same
//! input it can produce different links than the reference greedy behavior.

use std::collections::HashSet;

use pathfinding::kuhn_munkres::{kuhn_munkres, Weights};
use tracing::trace;

use crate::config::LinkConfig;

use super::algorithm::EntityLinker;
use super::types::{EntityLink, LinkStrategy};
use super::PreparedEntity;

/// Scale factor from `[0, 1]` scores to integer weights.
const SCALE: f64 = 1_000_000.0;

/// Weight for pairs below the threshold. Large enough that the solver only
/// assigns one when a row has no feasible column left, small enough that
/// negating and summing inside the solver cannot overflow i64.
const INFEASIBLE: i64 = -1_000_000_000_000_i64;

/// Dense score matrix in the shape the solver expects.
struct ScoreMatrix(Vec<Vec<i64>>);

impl Weights<i64> for ScoreMatrix {
    fn rows(&self) -> usize {
        self.0.len()
    }

    fn columns(&self) -> usize {
        self.0.first().map_or(0, |r| r.len())
    }

    fn at(&self, row: usize, col: usize) -> i64 {
        self.0[row][col]
    }

    fn neg(&self) -> Self {
        ScoreMatrix(
            self.0
                .iter()
                .map(|r| r.iter().map(|&x| x.saturating_neg()).collect())
                .collect(),
        )
    }
}

/// Maximum-weight bipartite linking.
///
/// Among all assignments it first maximizes the number of pairs at or above
/// the threshold, then their summed score. Pairs below the threshold are
/// never emitted. Source-B records sharing an id are collapsed to their first
/// occurrence so each id is linked at most once.
///
/// # Performance
///
/// O(n^3) in the larger collection size on top of the O(|A| x |B|) scoring.
#[derive(Debug, Default, Clone)]
pub struct OptimalLinker {
    pub config: LinkConfig,
}

impl OptimalLinker {
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    fn score_to_weight(score: f64) -> i64 {
        (score * SCALE).round() as i64
    }
}

impl EntityLinker for OptimalLinker {
    fn strategy(&self) -> LinkStrategy {
        LinkStrategy::Optimal
    }

    fn config(&self) -> &LinkConfig {
        &self.config
    }

    fn assign(
        &self,
        source_a: &[PreparedEntity<'_>],
        source_b: &[PreparedEntity<'_>],
    ) -> Vec<EntityLink> {
        let mut seen = HashSet::new();
        let unique_b: Vec<&PreparedEntity<'_>> =
            source_b.iter().filter(|b| seen.insert(b.id())).collect();

        // Score every pair once; `None` marks pairs below the threshold.
        let scores: Vec<Vec<_>> = source_a
            .iter()
            .map(|a| {
                unique_b
                    .iter()
                    .map(|b| {
                        let breakdown = a.score_against(b, &self.config);
                        (breakdown.combined >= self.config.match_threshold).then_some(breakdown)
                    })
                    .collect()
            })
            .collect();

        if !scores.iter().flatten().any(Option::is_some) {
            return Vec::new();
        }

        // The solver requires rows <= columns, so the smaller side becomes rows.
        let a_is_rows = source_a.len() <= unique_b.len();
        let (rows, cols) = if a_is_rows {
            (source_a.len(), unique_b.len())
        } else {
            (unique_b.len(), source_a.len())
        };

        let mut matrix = vec![vec![INFEASIBLE; cols]; rows];
        for (a_idx, row) in scores.iter().enumerate() {
            for (b_idx, breakdown) in row.iter().enumerate() {
                if let Some(breakdown) = breakdown {
                    let weight = Self::score_to_weight(breakdown.combined);
                    if a_is_rows {
                        matrix[a_idx][b_idx] = weight;
                    } else {
                        matrix[b_idx][a_idx] = weight;
                    }
                }
            }
        }

        let (_total, assignments) = kuhn_munkres(&ScoreMatrix(matrix));

        let mut pairs: Vec<(usize, usize)> = assignments
            .into_iter()
            .enumerate()
            .map(|(row, col)| if a_is_rows { (row, col) } else { (col, row) })
            .filter(|&(a_idx, b_idx)| scores[a_idx][b_idx].is_some())
            .collect();
        pairs.sort_unstable_by_key(|&(a_idx, _)| a_idx);

        pairs
            .into_iter()
            .filter_map(|(a_idx, b_idx)| {
                let breakdown = scores[a_idx][b_idx]?;
                let (a, b) = (&source_a[a_idx], unique_b[b_idx]);
                trace!(
                    source_a = a.id(),
                    source_b = b.id(),
                    score = breakdown.combined,
                    "linked"
                );
                Some(EntityLink::new(a.entity, b.entity, breakdown))
            })
            .collect()
    }
}
