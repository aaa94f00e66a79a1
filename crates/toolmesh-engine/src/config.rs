//! Engine configuration
//!
//! Bounds for graph exploration and retry budgets for guarded aggregate
//! writes. The depth and node ceilings exist because a deep walk over a
//! densely connected relationship graph is the one unbounded-work risk in
//! the engine.

use serde::{Deserialize, Serialize};

/// Configuration for the engine operations
///
/// # Examples
///
/// ```
/// use toolmesh_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.default_depth, 2);
///
/// // Tighter bounds for request-path use
/// let config = EngineConfig::interactive();
/// assert_eq!(config.depth_ceiling, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Traversal depth used when the caller does not specify one
    /// Default: 2
    pub default_depth: u32,

    /// Hard cap on requested traversal depth; deeper requests are rejected
    /// Default: 4
    pub depth_ceiling: u32,

    /// Circuit breaker on traversal size: expansion stops once this many
    /// nodes have been emitted
    /// Default: 500
    pub node_ceiling: usize,

    /// How many times a guarded aggregate write is retried after losing to
    /// a concurrent writer, beyond the initial attempt
    /// Default: 3
    #[serde(default = "default_write_retry_limit")]
    pub write_retry_limit: u32,
}

fn default_write_retry_limit() -> u32 {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_depth: 2,
            depth_ceiling: 4,
            node_ceiling: 500,
            write_retry_limit: 3,
        }
    }
}

impl EngineConfig {
    /// Bounds tuned for request-path use (graph widgets, hover cards)
    ///
    /// Shallow walks, small result sets, no patience for contention.
    pub fn interactive() -> Self {
        Self {
            default_depth: 1,
            depth_ceiling: 2,
            node_ceiling: 150,
            write_retry_limit: 2,
        }
    }

    /// Bounds tuned for offline jobs (exports, cache warming)
    pub fn batch() -> Self {
        Self {
            default_depth: 3,
            depth_ceiling: 4,
            node_ceiling: 5_000,
            write_retry_limit: 5,
        }
    }
}
