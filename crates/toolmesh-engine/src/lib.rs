//! Toolmesh Engine
//!
//! The public operations of the tool relationship and consensus engine:
//!
//! - [`GraphExplorer`] — depth-bounded walk of the relationship graph
//! - [`CompatibilityAggregator`] — folds compatibility reports into per-pair
//!   aggregates under guarded writes
//! - [`MigrationTracker`] — exact success/failure counters for migration
//!   paths
//! - [`DeckScorer`] — pairwise synergy scoring for tool selections
//! - [`ConsensusBuilder`] — weighted community tier placement
//! - [`Curator`] — validated write paths for curated content
//!
//! Every engine is a stateless function over the store traits defined in
//! `toolmesh-domain`; none of them hold locks or background state, and
//! different operations can always run in parallel. The only contended
//! writes (compatibility aggregates, migration counters) go through
//! compare-and-swap store updates with a bounded retry loop.
//!
//! # Examples
//!
//! ```no_run
//! use toolmesh_domain::ToolId;
//! use toolmesh_engine::{EngineConfig, GraphExplorer};
//! use toolmesh_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::new("toolmesh.db")?;
//! let explorer = GraphExplorer::new(EngineConfig::default());
//!
//! let view = explorer.explore(&store, &store, &ToolId::new("nextjs"), Some(2))?;
//! println!("{} tools, {} edges", view.nodes.len(), view.edges.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod config;
mod consensus;
mod curation;
mod deck;
mod error;
mod graph;
mod migration;

#[cfg(test)]
pub(crate) mod testutil;

pub use aggregate::{CompatibilityAggregator, ReportSubmission};
pub use config::EngineConfig;
pub use consensus::ConsensusBuilder;
pub use curation::{Curator, PathSubmission};
pub use deck::{DeckScorer, DeckSynergy, SynergyDetail, SynergyView};
pub use error::EngineError;
pub use graph::{GraphEdge, GraphExplorer, GraphNode, GraphView, NeighborView};
pub use migration::MigrationTracker;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current timestamp in milliseconds since the Unix epoch
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
