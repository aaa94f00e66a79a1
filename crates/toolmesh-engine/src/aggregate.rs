//! Pairwise compatibility aggregation
//!
//! Folds raw compatibility reports into the per-pair aggregate. The
//! read-modify-write on the aggregate is the one place in the engine where
//! concurrent callers genuinely contend, so every write goes through a
//! guarded store update and a bounded retry loop: lose the race, re-read,
//! fold again.

use crate::{current_timestamp_ms, EngineConfig, EngineError};
use toolmesh_domain::traits::{CompatibilityStore, WriteOutcome};
use toolmesh_domain::{
    CompatibilityReport, CompatibilityScore, Experience, ReportId, ToolId, ToolPair,
};

/// Default limit for report and score listings
const DEFAULT_LISTING_LIMIT: usize = 20;

/// A user's compatibility submission, before it becomes a stored report
#[derive(Debug, Clone)]
pub struct ReportSubmission {
    /// First tool of the pair (order does not matter)
    pub tool_a: ToolId,

    /// Second tool of the pair
    pub tool_b: ToolId,

    /// Reporting user
    pub user_id: String,

    /// Overall score for the pairing, 0–100
    pub score: u8,

    /// Qualitative experience bucket
    pub experience: Experience,

    /// Pitfalls the user hit
    pub gotchas: Vec<String>,

    /// Advice for others
    pub tips: Vec<String>,

    /// Optional project context
    pub project_context: Option<String>,
}

/// The pairwise aggregation engine
pub struct CompatibilityAggregator {
    config: EngineConfig,
}

impl CompatibilityAggregator {
    /// Create an aggregator with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create an aggregator with default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Record a report and fold it into the pair's aggregate
    ///
    /// The raw report is appended to the immutable log first; the aggregate
    /// is then created or updated under an optimistic guard. Returns the
    /// aggregate as written.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for scores above 100, `ConflictRetriesExhausted` when
    /// concurrent reporters keep winning the guarded write.
    pub fn record_report<S>(
        &self,
        store: &mut S,
        submission: ReportSubmission,
    ) -> Result<CompatibilityScore, EngineError>
    where
        S: CompatibilityStore,
        S::Error: std::fmt::Display,
    {
        if submission.score > 100 {
            return Err(EngineError::InvalidInput(format!(
                "Report score {} exceeds 100",
                submission.score
            )));
        }

        let now = current_timestamp_ms();
        let pair = ToolPair::new(submission.tool_a, submission.tool_b);

        let report = CompatibilityReport {
            id: ReportId::new(),
            pair: pair.clone(),
            user_id: submission.user_id,
            score: submission.score,
            experience: submission.experience,
            gotchas: submission.gotchas,
            tips: submission.tips,
            project_context: submission.project_context,
            upvotes: 0,
            created_at: now,
        };
        store
            .append_report(report)
            .map_err(|e| EngineError::Store(format!("Failed to append report: {}", e)))?;

        let attempts = self.config.write_retry_limit + 1;
        for attempt in 0..attempts {
            if attempt > 0 {
                tracing::debug!(pair = %pair, attempt, "retrying aggregate update after conflict");
            }

            let existing = store
                .score_for(&pair)
                .map_err(|e| EngineError::Store(format!("Failed to read aggregate: {}", e)))?;

            let (aggregate, outcome) = match existing {
                Some(mut aggregate) => {
                    let expected = aggregate.report_count;
                    aggregate.fold_report(submission.score, now);
                    let outcome = store.update_score(&aggregate, expected).map_err(|e| {
                        EngineError::Store(format!("Failed to update aggregate: {}", e))
                    })?;
                    (aggregate, outcome)
                }
                None => {
                    let fresh =
                        CompatibilityScore::from_first_report(pair.clone(), submission.score, now);
                    let outcome = store.insert_score(&fresh).map_err(|e| {
                        EngineError::Store(format!("Failed to insert aggregate: {}", e))
                    })?;
                    (fresh, outcome)
                }
            };

            if outcome == WriteOutcome::Applied {
                return Ok(aggregate);
            }
        }

        tracing::warn!(pair = %pair, attempts, "aggregate update retries exhausted");
        Err(EngineError::ConflictRetriesExhausted {
            key: pair.to_string(),
            attempts,
        })
    }

    /// The aggregate for a pair, in either order
    pub fn score_between<S>(
        &self,
        store: &S,
        a: ToolId,
        b: ToolId,
    ) -> Result<Option<CompatibilityScore>, EngineError>
    where
        S: CompatibilityStore,
        S::Error: std::fmt::Display,
    {
        store
            .score_for(&ToolPair::new(a, b))
            .map_err(|e| EngineError::Store(format!("Failed to read aggregate: {}", e)))
    }

    /// Raw reports for a pair, newest first
    pub fn reports_between<S>(
        &self,
        store: &S,
        a: ToolId,
        b: ToolId,
        limit: Option<usize>,
    ) -> Result<Vec<CompatibilityReport>, EngineError>
    where
        S: CompatibilityStore,
        S::Error: std::fmt::Display,
    {
        store
            .reports_for(
                &ToolPair::new(a, b),
                limit.unwrap_or(DEFAULT_LISTING_LIMIT),
            )
            .map_err(|e| EngineError::Store(format!("Failed to read reports: {}", e)))
    }

    /// A tool's best-scoring aggregates
    pub fn compatibilities_for<S>(
        &self,
        store: &S,
        tool: &ToolId,
        limit: Option<usize>,
    ) -> Result<Vec<CompatibilityScore>, EngineError>
    where
        S: CompatibilityStore,
        S::Error: std::fmt::Display,
    {
        store
            .scores_for(tool, limit.unwrap_or(DEFAULT_LISTING_LIMIT))
            .map_err(|e| EngineError::Store(format!("Failed to read aggregates: {}", e)))
    }

    /// The best-scoring pairs overall
    pub fn top_pairs<S>(
        &self,
        store: &S,
        limit: Option<usize>,
    ) -> Result<Vec<CompatibilityScore>, EngineError>
    where
        S: CompatibilityStore,
        S::Error: std::fmt::Display,
    {
        store
            .top_scores(limit.unwrap_or(DEFAULT_LISTING_LIMIT))
            .map_err(|e| EngineError::Store(format!("Failed to read aggregates: {}", e)))
    }

    /// Upvote a raw report
    pub fn upvote_report<S>(
        &self,
        store: &mut S,
        id: ReportId,
    ) -> Result<CompatibilityReport, EngineError>
    where
        S: CompatibilityStore,
        S::Error: std::fmt::Display,
    {
        store
            .upvote_report(id)
            .map_err(|e| EngineError::Store(format!("Failed to upvote report: {}", e)))?
            .ok_or_else(|| EngineError::NotFound(format!("Report {}", id)))
    }

    /// Attach an integration guide to a pair's aggregate
    ///
    /// Creates a neutral placeholder aggregate (score 70, zero reports) when
    /// the pair has never been reported on.
    pub fn add_integration_guide<S>(
        &self,
        store: &mut S,
        a: ToolId,
        b: ToolId,
        guide: String,
        boilerplate_url: Option<String>,
    ) -> Result<CompatibilityScore, EngineError>
    where
        S: CompatibilityStore,
        S::Error: std::fmt::Display,
    {
        let now = current_timestamp_ms();
        let pair = ToolPair::new(a, b);

        let attempts = self.config.write_retry_limit + 1;
        for _ in 0..attempts {
            let existing = store
                .score_for(&pair)
                .map_err(|e| EngineError::Store(format!("Failed to read aggregate: {}", e)))?;

            let (aggregate, outcome) = match existing {
                Some(mut aggregate) => {
                    let expected = aggregate.report_count;
                    aggregate.integration_guide = Some(guide.clone());
                    aggregate.boilerplate_url = boilerplate_url.clone();
                    aggregate.last_updated = now;
                    let outcome = store.update_score(&aggregate, expected).map_err(|e| {
                        EngineError::Store(format!("Failed to update aggregate: {}", e))
                    })?;
                    (aggregate, outcome)
                }
                None => {
                    let fresh = CompatibilityScore::guide_placeholder(
                        pair.clone(),
                        guide.clone(),
                        boilerplate_url.clone(),
                        now,
                    );
                    let outcome = store.insert_score(&fresh).map_err(|e| {
                        EngineError::Store(format!("Failed to insert aggregate: {}", e))
                    })?;
                    (fresh, outcome)
                }
            };

            if outcome == WriteOutcome::Applied {
                return Ok(aggregate);
            }
        }

        Err(EngineError::ConflictRetriesExhausted {
            key: pair.to_string(),
            attempts,
        })
    }
}
