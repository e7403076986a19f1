//! Aggregate statistics for a linking run.

use std::fmt;

use parklink_core::{LinkReport, MatchMethod};
use serde::Serialize;

/// Counts and score statistics for one [`LinkReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSummary {
    pub strategy: String,
    pub total_source_a: usize,
    pub total_source_b: usize,
    pub linked: usize,
    /// Links scored on name and location.
    pub linked_with_location: usize,
    pub unmatched_source_a: usize,
    pub unused_source_b: usize,
    /// Share of source-A records that received a link.
    pub link_rate: f64,
    pub mean_score: f64,
    pub median_score: f64,
    pub min_score: f64,
}

impl LinkSummary {
    pub fn from_report(report: &LinkReport, total_source_a: usize, total_source_b: usize) -> Self {
        let (mean_score, median_score, min_score) = score_stats(report);
        let linked = report.link_count();
        Self {
            strategy: report.strategy.to_string(),
            total_source_a,
            total_source_b,
            linked,
            linked_with_location: report
                .links
                .iter()
                .filter(|l| l.method == MatchMethod::NameAndLocation)
                .count(),
            unmatched_source_a: report.unmatched_source_a.len(),
            unused_source_b: report.unused_source_b.len(),
            link_rate: if total_source_a == 0 {
                0.0
            } else {
                linked as f64 / total_source_a as f64
            },
            mean_score,
            median_score,
            min_score,
        }
    }
}

impl fmt::Display for LinkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategy:            {}", self.strategy)?;
        writeln!(f, "Source A records:    {}", self.total_source_a)?;
        writeln!(f, "Source B records:    {}", self.total_source_b)?;
        writeln!(
            f,
            "Linked:              {} ({:.1}%), {} with location",
            self.linked,
            self.link_rate * 100.0,
            self.linked_with_location
        )?;
        writeln!(f, "Unmatched A:         {}", self.unmatched_source_a)?;
        writeln!(f, "Unused B:            {}", self.unused_source_b)?;
        write!(
            f,
            "Score mean/median/min: {:.3} / {:.3} / {:.3}",
            self.mean_score, self.median_score, self.min_score
        )
    }
}

/// (mean, median, min) of link scores; zeros when nothing was linked.
fn score_stats(report: &LinkReport) -> (f64, f64, f64) {
    if report.links.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut sorted: Vec<f64> = report.links.iter().map(|l| l.score).collect();
    sorted.sort_by(f64::total_cmp);

    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
    } else {
        sorted[sorted.len() / 2]
    };
    (mean, median, sorted[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use parklink_core::test_helpers::yellowstone_fixture;
    use parklink_core::{link_entities, LinkConfig};

    #[test]
    fn summarizes_yellowstone_fixture() {
        let (source_a, source_b) = yellowstone_fixture();
        let report = link_entities(&source_a, &source_b, LinkConfig::default()).expect("run");
        let summary = LinkSummary::from_report(&report, source_a.len(), source_b.len());

        assert_eq!(summary.strategy, "greedy");
        assert_eq!(summary.linked, 1);
        assert_eq!(summary.linked_with_location, 1);
        assert_eq!(summary.unused_source_b, 1);
        assert_eq!(summary.link_rate, 1.0);
        assert_eq!(summary.mean_score, summary.min_score);
    }

    #[test]
    fn empty_report_has_zero_stats() {
        let report = link_entities(&[], &[], LinkConfig::default()).expect("run");
        let summary = LinkSummary::from_report(&report, 0, 0);
        assert_eq!(summary.linked, 0);
        assert_eq!(summary.link_rate, 0.0);
        assert_eq!(summary.mean_score, 0.0);
    }

    #[test]
    fn display_lists_counts() {
        let (source_a, source_b) = yellowstone_fixture();
        let report = link_entities(&source_a, &source_b, LinkConfig::default()).expect("run");
        let text = LinkSummary::from_report(&report, source_a.len(), source_b.len()).to_string();
        assert!(text.contains("Strategy:            greedy"));
        assert!(text.contains("Linked:              1 (100.0%)"));
    }
}
