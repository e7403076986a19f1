use tracing::{debug, warn};

use crate::config::LinkConfig;
use crate::entity::{ensure_unique_ids, validate_all, NamedGeoEntity};
use crate::error::ValidationError;

use super::types::{EntityLink, LinkReport, LinkStrategy};
use super::PreparedEntity;

/// Trait for algorithms that reconcile two entity collections into links.
///
/// Implementors only decide the assignment; validation, name normalization
/// and report assembly are shared by the provided [`EntityLinker::link`].
///
/// # Examples
///
/// ```rust
/// use parklink_core::entity::NamedGeoEntity;
/// use parklink_core::linking::{EntityLinker, GreedyLinker};
///
/// let linker = GreedyLinker::default();
/// let parks = [NamedGeoEntity::new("A1", "Zion National Park").with_location(37.30, -113.05)];
/// let graph = [NamedGeoEntity::new("B1", "Zion Natl. Park").with_location(37.29, -113.03)];
/// let report = linker.link(&parks, &graph).unwrap();
/// assert_eq!(report.links[0].source_b_id, "B1");
/// ```
pub trait EntityLinker: Send + Sync {
    fn strategy(&self) -> LinkStrategy;

    fn config(&self) -> &LinkConfig;

    /// Choose links between two non-empty, validated collections.
    ///
    /// Must never emit a link scoring below `config().match_threshold` and
    /// must never use a source-B id twice. Links are returned in source-A
    /// input order.
    fn assign(
        &self,
        source_a: &[PreparedEntity<'_>],
        source_b: &[PreparedEntity<'_>],
    ) -> Vec<EntityLink>;

    /// Link `source_a` against `source_b`.
    ///
    /// A malformed entity or invalid configuration aborts the whole run, and
    /// so does a source-A id that appears twice. Repeated source-B ids are
    /// allowed and are consumed together. An empty collection on either side
    /// yields an empty report.
    fn link(
        &self,
        source_a: &[NamedGeoEntity],
        source_b: &[NamedGeoEntity],
    ) -> Result<LinkReport, ValidationError> {
        let checked = self
            .config()
            .validate()
            .and_then(|()| validate_all(source_a))
            .and_then(|()| ensure_unique_ids(source_a))
            .and_then(|()| validate_all(source_b));
        if let Err(err) = checked {
            warn!(error = %err, strategy = %self.strategy(), "rejecting linking run");
            return Err(err);
        }

        let links = if source_a.is_empty() || source_b.is_empty() {
            Vec::new()
        } else {
            let prepared_a = PreparedEntity::prepare_all(source_a);
            let prepared_b = PreparedEntity::prepare_all(source_b);
            self.assign(&prepared_a, &prepared_b)
        };

        let report = LinkReport::new(self.strategy(), links, source_a, source_b);
        debug!(
            strategy = %self.strategy(),
            source_a = source_a.len(),
            source_b = source_b.len(),
            linked = report.link_count(),
            "linking run complete"
        );
        Ok(report)
    }
}
