//! Curation write paths
//!
//! Thin, validated entry points for the records the read engines consume:
//! relationship edges, migration paths, seeded synergies, and tier lists.
//! Validation happens before any store access; timestamps are stamped here
//! so stores never invent time.

use crate::{current_timestamp_ms, EngineError};
use toolmesh_domain::traits::{MigrationStore, RelationshipStore, SynergyStore, TierListStore};
use toolmesh_domain::{
    Difficulty, MigrationPath, MigrationResource, RelationKind, Relationship, RelationshipId,
    Synergy, SynergyKind, TierBuckets, TierList, TierListId, ToolId, ToolPair,
};

/// A curator's migration path submission
#[derive(Debug, Clone)]
pub struct PathSubmission {
    /// Tool being migrated away from
    pub from: ToolId,

    /// Tool being migrated to
    pub to: ToolId,

    /// Expected difficulty
    pub difficulty: Difficulty,

    /// Rough effort estimate in hours
    pub estimated_hours: f64,

    /// Ordered migration steps
    pub steps: Vec<String>,

    /// Known pitfalls
    pub gotchas: Vec<String>,

    /// Supporting guides and writeups
    pub resources: Vec<MigrationResource>,
}

/// Write-path entry points for curators and voters
///
/// Stateless; construct freely.
#[derive(Debug, Default)]
pub struct Curator;

impl Curator {
    /// Create a curator handle
    pub fn new() -> Self {
        Self
    }

    /// Create a relationship edge with zero votes
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `strength` is outside [0, 1].
    pub fn create_relationship<S>(
        &self,
        store: &mut S,
        tool_a: ToolId,
        tool_b: ToolId,
        kind: RelationKind,
        strength: f64,
        evidence: Vec<String>,
    ) -> Result<Relationship, EngineError>
    where
        S: RelationshipStore,
        S::Error: std::fmt::Display,
    {
        let now = current_timestamp_ms();
        let pair = ToolPair::new(tool_a, tool_b);

        let rel = Relationship::new(pair, kind, strength, evidence, now).ok_or_else(|| {
            EngineError::InvalidInput(format!("Strength {} is outside [0, 1]", strength))
        })?;

        store
            .insert_relationship(rel.clone())
            .map_err(|e| EngineError::Store(format!("Failed to insert edge: {}", e)))?;
        Ok(rel)
    }

    /// Register one community vote on an edge
    pub fn vote_on_relationship<S>(
        &self,
        store: &mut S,
        id: RelationshipId,
    ) -> Result<Relationship, EngineError>
    where
        S: RelationshipStore,
        S::Error: std::fmt::Display,
    {
        store
            .increment_votes(id, current_timestamp_ms())
            .map_err(|e| EngineError::Store(format!("Failed to record vote: {}", e)))?
            .ok_or_else(|| EngineError::NotFound(format!("Relationship {}", id)))
    }

    /// Create a migration path with no outcome reports
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a negative effort estimate.
    pub fn create_migration_path<S>(
        &self,
        store: &mut S,
        submission: PathSubmission,
    ) -> Result<MigrationPath, EngineError>
    where
        S: MigrationStore,
        S::Error: std::fmt::Display,
    {
        if submission.estimated_hours < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "Estimated hours {} is negative",
                submission.estimated_hours
            )));
        }

        let path = MigrationPath::new(
            submission.from,
            submission.to,
            submission.difficulty,
            submission.estimated_hours,
            submission.steps,
            submission.gotchas,
            submission.resources,
            current_timestamp_ms(),
        );

        store
            .insert_path(path.clone())
            .map_err(|e| EngineError::Store(format!("Failed to insert path: {}", e)))?;
        Ok(path)
    }

    /// Seed a curated synergy for a pair
    pub fn seed_synergy<S>(
        &self,
        store: &mut S,
        tool_a: ToolId,
        tool_b: ToolId,
        kind: SynergyKind,
        score: i32,
        description: String,
        bonus_effect: Option<String>,
    ) -> Result<Synergy, EngineError>
    where
        S: SynergyStore,
        S::Error: std::fmt::Display,
    {
        let synergy = Synergy::new(
            ToolPair::new(tool_a, tool_b),
            kind,
            score,
            description,
            bonus_effect,
        );

        store
            .insert_synergy(synergy.clone())
            .map_err(|e| EngineError::Store(format!("Failed to insert synergy: {}", e)))?;
        Ok(synergy)
    }

    /// Create a tier list with zero upvotes
    pub fn create_tier_list<S>(
        &self,
        store: &mut S,
        user_id: String,
        category_id: String,
        tiers: TierBuckets,
        is_public: bool,
    ) -> Result<TierList, EngineError>
    where
        S: TierListStore,
        S::Error: std::fmt::Display,
    {
        let list = TierList::new(
            user_id,
            category_id,
            tiers,
            is_public,
            current_timestamp_ms(),
        );

        store
            .insert_list(list.clone())
            .map_err(|e| EngineError::Store(format!("Failed to insert list: {}", e)))?;
        Ok(list)
    }

    /// Register one upvote on a tier list
    pub fn upvote_tier_list<S>(
        &self,
        store: &mut S,
        id: TierListId,
    ) -> Result<TierList, EngineError>
    where
        S: TierListStore,
        S::Error: std::fmt::Display,
    {
        store
            .increment_upvotes(id)
            .map_err(|e| EngineError::Store(format!("Failed to record upvote: {}", e)))?
            .ok_or_else(|| EngineError::NotFound(format!("Tier list {}", id)))
    }
}
