//! Toolmesh Domain Layer
//!
//! Core data model and business rules for the tool relationship and
//! consensus engine. The engine walks a graph of pairwise tool
//! relationships, folds community signals (compatibility reports, tier
//! lists) into derived scores, and scores multi-tool decks by curated
//! synergies.
//!
//! ## Key Concepts
//!
//! - **ToolId / ToolPair**: opaque catalog ids, and the canonical unordered
//!   pair that keys every pairwise record
//! - **Relationship**: a typed, strength-weighted, semantically undirected
//!   edge between two tools
//! - **CompatibilityReport / CompatibilityScore**: raw observations and the
//!   derived per-pair aggregate (exact running sum, rounded display value)
//! - **MigrationPath**: a directed migration route with exact outcome counts
//! - **Synergy**: a curated bonus/penalty used only for deck scoring
//! - **TierList / consensus**: per-user rankings and the weighted community
//!   placement computed from them
//!
//! ## Architecture
//!
//! This crate holds pure business logic and the trait seams to
//! infrastructure. Storage implementations live in `toolmesh-store`; the
//! public operations live in `toolmesh-engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compatibility;
pub mod consensus;
pub mod id;
pub mod migration;
pub mod pair;
pub mod relationship;
pub mod synergy;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use compatibility::{CompatibilityReport, CompatibilityScore, Experience, ScoreBreakdown};
pub use consensus::{weigh_tier_lists, TierConsensus};
pub use id::{PathId, RelationshipId, ReportId, SynergyId, TierListId, ToolId};
pub use migration::{Difficulty, MigrationPath, MigrationResource};
pub use pair::ToolPair;
pub use relationship::{RelationKind, Relationship};
pub use synergy::{Synergy, SynergyKind};
pub use tier::{Tier, TierBuckets, TierList};
