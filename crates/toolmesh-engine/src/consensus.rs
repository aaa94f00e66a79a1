//! Community tier consensus
//!
//! Thin read-path over the tier list store: fetch a category's public lists
//! and hand them to the pure weighting math in the domain crate. Nothing is
//! persisted; callers recompute on demand or cache externally.

use crate::EngineError;
use toolmesh_domain::traits::TierListStore;
use toolmesh_domain::{weigh_tier_lists, TierConsensus};

/// The consensus tier engine
///
/// Stateless and read-only; construct freely.
#[derive(Debug, Default)]
pub struct ConsensusBuilder;

impl ConsensusBuilder {
    /// Create a builder
    pub fn new() -> Self {
        Self
    }

    /// Compute the community consensus for a category
    ///
    /// Returns `None` when the category has no public tier lists — no data
    /// is not the same thing as an empty ranking.
    pub fn consensus_for<S>(
        &self,
        store: &S,
        category_id: &str,
    ) -> Result<Option<TierConsensus>, EngineError>
    where
        S: TierListStore,
        S::Error: std::fmt::Display,
    {
        let lists = store
            .public_lists_for(category_id)
            .map_err(|e| EngineError::Store(format!("Failed to read tier lists: {}", e)))?;

        tracing::debug!(
            category = category_id,
            lists = lists.len(),
            "computing tier consensus"
        );

        Ok(weigh_tier_lists(&lists))
    }
}
