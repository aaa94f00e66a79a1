//! Migration outcome tracking
//!
//! Success rates are derived from exact counters, updated under the same
//! guarded-write discipline as compatibility aggregates: a path popular
//! enough to attract concurrent outcome reports is exactly the path whose
//! counters must not lose updates.

use crate::{EngineConfig, EngineError};
use toolmesh_domain::traits::{MigrationStore, WriteOutcome};
use toolmesh_domain::{MigrationPath, PathId, ToolId};

/// The migration success-rate engine
pub struct MigrationTracker {
    config: EngineConfig,
}

impl MigrationTracker {
    /// Create a tracker with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create a tracker with default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Fold one success/failure report into a path's counters
    ///
    /// Returns the path as written.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown path ids, `ConflictRetriesExhausted` when
    /// concurrent reporters keep winning the guarded write.
    pub fn record_outcome<S>(
        &self,
        store: &mut S,
        id: PathId,
        succeeded: bool,
    ) -> Result<MigrationPath, EngineError>
    where
        S: MigrationStore,
        S::Error: std::fmt::Display,
    {
        let attempts = self.config.write_retry_limit + 1;
        for attempt in 0..attempts {
            if attempt > 0 {
                tracing::debug!(path = %id, attempt, "retrying outcome update after conflict");
            }

            let mut path = store
                .path(id)
                .map_err(|e| EngineError::Store(format!("Failed to read path: {}", e)))?
                .ok_or_else(|| EngineError::NotFound(format!("Migration path {}", id)))?;

            let expected = path.reports;
            path.fold_outcome(succeeded);

            let outcome = store
                .update_path_outcome(id, path.successes, path.reports, expected)
                .map_err(|e| EngineError::Store(format!("Failed to update path: {}", e)))?;

            if outcome == WriteOutcome::Applied {
                return Ok(path);
            }
        }

        tracing::warn!(path = %id, attempts, "outcome update retries exhausted");
        Err(EngineError::ConflictRetriesExhausted {
            key: id.to_string(),
            attempts,
        })
    }

    /// Paths leading away from a tool
    pub fn paths_from<S>(&self, store: &S, tool: &ToolId) -> Result<Vec<MigrationPath>, EngineError>
    where
        S: MigrationStore,
        S::Error: std::fmt::Display,
    {
        store
            .paths_from(tool)
            .map_err(|e| EngineError::Store(format!("Failed to read paths: {}", e)))
    }

    /// Paths leading to a tool
    pub fn paths_to<S>(&self, store: &S, tool: &ToolId) -> Result<Vec<MigrationPath>, EngineError>
    where
        S: MigrationStore,
        S::Error: std::fmt::Display,
    {
        store
            .paths_to(tool)
            .map_err(|e| EngineError::Store(format!("Failed to read paths: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemStore;
    use toolmesh_domain::Difficulty;

    fn seeded_store() -> (MemStore, PathId) {
        let mut store = MemStore::new();
        let id = store.add_path("webpack", "vite", Difficulty::Moderate);
        (store, id)
    }

    #[test]
    fn test_outcomes_accumulate_exactly() {
        let (mut store, id) = seeded_store();
        let tracker = MigrationTracker::default_config();

        for succeeded in [true, false, true, true] {
            tracker.record_outcome(&mut store, id, succeeded).unwrap();
        }

        let path = tracker
            .paths_from(&store, &ToolId::new("webpack"))
            .unwrap()
            .remove(0);
        assert_eq!(path.reports, 4);
        assert_eq!(path.successes, 3);
        assert_eq!(path.success_rate(), 75);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let mut store = MemStore::new();
        let tracker = MigrationTracker::default_config();
        let err = tracker
            .record_outcome(&mut store, PathId::new(), true)
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn test_conflict_retry_converges() {
        let (mut store, id) = seeded_store();
        let tracker = MigrationTracker::default_config();

        store.inject_conflicts(1);
        let path = tracker.record_outcome(&mut store, id, true).unwrap();
        assert_eq!(path.reports, 1);
        assert_eq!(path.successes, 1);
    }

    #[test]
    fn test_direction_preserved_in_listings() {
        let mut store = MemStore::new();
        store.add_path("webpack", "vite", Difficulty::Moderate);
        store.add_path("vite", "webpack", Difficulty::Hard);
        let tracker = MigrationTracker::default_config();

        let from = tracker.paths_from(&store, &ToolId::new("webpack")).unwrap();
        assert_eq!(from.len(), 1);
        assert_eq!(from[0].to, ToolId::new("vite"));

        let to = tracker.paths_to(&store, &ToolId::new("webpack")).unwrap();
        assert_eq!(to.len(), 1);
        assert_eq!(to[0].from, ToolId::new("vite"));
    }
}
