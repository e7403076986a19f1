//! Batch execution: one linking run, or many nearby searches in parallel.
//!
//! Each nearby search is independent, so they run on a rayon pool. Linking
//! is a single order-dependent pass and stays on the calling thread.

use indicatif::{ProgressBar, ProgressStyle};
use parklink_core::linking::LinkStrategy;
use parklink_core::proximity::{find_nearby, ProximityQuery, ProximityResult};
use parklink_core::{LinkConfig, LinkReport, NamedGeoEntity};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::BatchError;

/// Nearby results for one reference entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyBatchResult {
    pub reference_id: String,
    pub reference_name: String,
    pub results: Vec<ProximityResult>,
}

/// Link `source_a` against `source_b` with the chosen strategy.
pub fn run_linking(
    source_a: &[NamedGeoEntity],
    source_b: &[NamedGeoEntity],
    strategy: LinkStrategy,
    config: LinkConfig,
) -> Result<LinkReport, BatchError> {
    info!(
        %strategy,
        source_a = source_a.len(),
        source_b = source_b.len(),
        threshold = config.match_threshold,
        "starting linking run"
    );
    let report = strategy.build(config).link(source_a, source_b)?;
    info!(linked = report.link_count(), "linking run finished");
    Ok(report)
}

/// Run `template` centered on every positioned reference entity.
///
/// References without a position are skipped. Results come back in the
/// references' input order.
///
/// # Arguments
///
/// * `references` - Entities to search around (typically parks)
/// * `candidates` - Entities to search for (trails, BLM lands, places)
/// * `template` - Radius, filters and limit; its reference point is replaced per search
/// * `num_threads` - Optional number of threads to use. If None, uses rayon's default.
/// * `show_progress` - Whether to display a progress bar
pub fn run_nearby_batch(
    references: &[NamedGeoEntity],
    candidates: &[NamedGeoEntity],
    template: &ProximityQuery,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<NearbyBatchResult>, BatchError> {
    template.validate()?;

    let positioned: Vec<_> = references
        .iter()
        .filter_map(|r| r.location.map(|p| (r, p)))
        .collect();
    let skipped = references.len() - positioned.len();
    info!(
        references = positioned.len(),
        skipped,
        candidates = candidates.len(),
        radius_m = template.radius_m,
        "starting nearby batch"
    );

    let pb = if show_progress && !positioned.is_empty() {
        let bar = ProgressBar::new(positioned.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        ) {
            bar.set_style(style.progress_chars("#>-"));
        }
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    let results: Result<Vec<NearbyBatchResult>, BatchError> = pool.install(|| {
        positioned
            .par_iter()
            .map(|(reference, point)| {
                let results = find_nearby(&template.recentered(*point), candidates)?;
                if let Some(ref progress_bar) = pb {
                    progress_bar.inc(1);
                }
                Ok(NearbyBatchResult {
                    reference_id: reference.id.clone(),
                    reference_name: reference.name.clone(),
                    results,
                })
            })
            .collect()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    let results = results?;
    info!(
        admitted = results.iter().map(|r| r.results.len()).sum::<usize>(),
        "nearby batch finished"
    );
    Ok(results)
}
