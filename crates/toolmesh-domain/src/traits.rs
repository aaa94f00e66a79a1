//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the engine and infrastructure.
//! Implementations live in other crates (`toolmesh-store` provides the
//! SQLite one). All reads resolve missing data to `Option`/empty vectors —
//! absence of community data is an expected steady state, not an error.

use crate::{
    CompatibilityReport, CompatibilityScore, MigrationPath, PathId, RelationKind, Relationship,
    RelationshipId, ReportId, Synergy, TierList, TierListId, ToolId, ToolPair,
};

/// Outcome of a conditional write
///
/// The aggregate read-modify-write paths use compare-and-swap updates; a
/// `Conflict` means another writer got there first and the caller should
/// re-read and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The write was applied
    Applied,

    /// The guard condition failed; nothing was written
    Conflict,
}

/// Storage for relationship edges
pub trait RelationshipStore {
    /// Error type for store operations
    type Error;

    /// Insert a new edge
    fn insert_relationship(&mut self, rel: Relationship) -> Result<RelationshipId, Self::Error>;

    /// Get the edge of the given kind between two tools, if any
    fn relationship_between(
        &self,
        pair: &ToolPair,
        kind: RelationKind,
    ) -> Result<Option<Relationship>, Self::Error>;

    /// All edges where the tool is either endpoint
    fn relationships_for(&self, tool: &ToolId) -> Result<Vec<Relationship>, Self::Error>;

    /// Edges of one kind, newest first, up to `limit`
    fn relationships_by_kind(
        &self,
        kind: RelationKind,
        limit: usize,
    ) -> Result<Vec<Relationship>, Self::Error>;

    /// Bump the community vote counter and touch `updated_at`
    ///
    /// Returns the updated edge, or `None` if the id is unknown.
    fn increment_votes(
        &mut self,
        id: RelationshipId,
        now: u64,
    ) -> Result<Option<Relationship>, Self::Error>;
}

/// Storage for compatibility reports and their derived aggregates
pub trait CompatibilityStore {
    /// Error type for store operations
    type Error;

    /// Append a raw report to the log
    fn append_report(&mut self, report: CompatibilityReport) -> Result<ReportId, Self::Error>;

    /// Reports for a pair, newest first, up to `limit`
    fn reports_for(
        &self,
        pair: &ToolPair,
        limit: usize,
    ) -> Result<Vec<CompatibilityReport>, Self::Error>;

    /// Bump a report's upvote counter
    ///
    /// Returns the updated report, or `None` if the id is unknown.
    fn upvote_report(&mut self, id: ReportId) -> Result<Option<CompatibilityReport>, Self::Error>;

    /// The aggregate for a pair, if one exists
    fn score_for(&self, pair: &ToolPair) -> Result<Option<CompatibilityScore>, Self::Error>;

    /// Insert a fresh aggregate
    ///
    /// Reports `Conflict` when an aggregate for the pair already exists, so
    /// two racing first-reporters cannot create duplicates.
    fn insert_score(&mut self, score: &CompatibilityScore) -> Result<WriteOutcome, Self::Error>;

    /// Replace the aggregate, guarded on the expected report count
    fn update_score(
        &mut self,
        score: &CompatibilityScore,
        expected_report_count: u32,
    ) -> Result<WriteOutcome, Self::Error>;

    /// Aggregates where the tool is either endpoint, best first, up to `limit`
    fn scores_for(
        &self,
        tool: &ToolId,
        limit: usize,
    ) -> Result<Vec<CompatibilityScore>, Self::Error>;

    /// The highest-scoring aggregates overall, up to `limit`
    fn top_scores(&self, limit: usize) -> Result<Vec<CompatibilityScore>, Self::Error>;
}

/// Read-mostly storage for curated synergies
pub trait SynergyStore {
    /// Error type for store operations
    type Error;

    /// Insert a curated synergy (seeding path)
    fn insert_synergy(&mut self, synergy: Synergy) -> Result<(), Self::Error>;

    /// The synergy covering a pair, if any
    fn synergy_between(&self, pair: &ToolPair) -> Result<Option<Synergy>, Self::Error>;

    /// All synergies where the tool is either endpoint
    fn synergies_for(&self, tool: &ToolId) -> Result<Vec<Synergy>, Self::Error>;
}

/// Storage for migration paths
pub trait MigrationStore {
    /// Error type for store operations
    type Error;

    /// Insert a new path
    fn insert_path(&mut self, path: MigrationPath) -> Result<PathId, Self::Error>;

    /// Get a path by id
    fn path(&self, id: PathId) -> Result<Option<MigrationPath>, Self::Error>;

    /// Paths leading away from a tool
    fn paths_from(&self, tool: &ToolId) -> Result<Vec<MigrationPath>, Self::Error>;

    /// Paths leading to a tool
    fn paths_to(&self, tool: &ToolId) -> Result<Vec<MigrationPath>, Self::Error>;

    /// Write new outcome counters, guarded on the expected report count
    fn update_path_outcome(
        &mut self,
        id: PathId,
        successes: u32,
        reports: u32,
        expected_reports: u32,
    ) -> Result<WriteOutcome, Self::Error>;
}

/// Storage for user tier lists
pub trait TierListStore {
    /// Error type for store operations
    type Error;

    /// Insert a new list
    fn insert_list(&mut self, list: TierList) -> Result<TierListId, Self::Error>;

    /// All public lists for a category
    fn public_lists_for(&self, category_id: &str) -> Result<Vec<TierList>, Self::Error>;

    /// Bump a list's upvote counter
    ///
    /// Returns the updated list, or `None` if the id is unknown.
    fn increment_upvotes(&mut self, id: TierListId) -> Result<Option<TierList>, Self::Error>;
}

/// Resolver from tool ids to human-readable names
///
/// The catalog owns tool content; the engine only decorates output with
/// display names. Unknown ids resolve to `None` and must never abort an
/// operation.
pub trait ToolDirectory {
    /// Error type for resolver operations
    type Error;

    /// Display name for a tool, if the catalog knows it
    fn display_name(&self, tool: &ToolId) -> Result<Option<String>, Self::Error>;
}
