//! Relationship graph exploration
//!
//! Walks the neighborhood of a tool out to a bounded depth. The walk is an
//! explicit breadth-first worklist rather than recursion: the relationship
//! graph contains cycles (undirected pair edges plus curator error), and the
//! visited set is the only thing standing between a walk and an infinite
//! loop, so it needs to be easy to reason about and test.

use crate::{EngineConfig, EngineError};
use std::collections::{HashSet, VecDeque};
use toolmesh_domain::traits::{RelationshipStore, ToolDirectory};
use toolmesh_domain::{RelationKind, Relationship, ToolId, ToolPair};

/// Default limit for kind-filtered relationship listings
const DEFAULT_KIND_LIMIT: usize = 50;

/// One node of an explored neighborhood
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Tool at this node
    pub id: ToolId,

    /// Catalog display name, when the directory can resolve it
    pub display_name: Option<String>,

    /// Depth at which the walk first reached this tool (center = 0)
    pub depth: u32,
}

/// One edge of an explored neighborhood
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    /// Canonical first endpoint
    pub source: ToolId,

    /// Canonical second endpoint
    pub target: ToolId,

    /// Relationship type
    pub kind: RelationKind,

    /// Relationship strength [0.0, 1.0]
    pub strength: f64,
}

/// An explored neighborhood, ready for rendering
///
/// Nodes appear in discovery order. Edges fetched at the depth boundary may
/// reference tools that are not in `nodes`; renderers treat those as stubs.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    /// Discovered nodes, discovery order
    pub nodes: Vec<GraphNode>,

    /// Distinct edges among (and at the boundary of) the discovered nodes
    pub edges: Vec<GraphEdge>,
}

/// A relationship seen from one tool's perspective
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborView {
    /// The stored edge
    pub relationship: Relationship,

    /// The endpoint that is not the queried tool
    pub other: ToolId,

    /// Display name of the other endpoint, when resolvable
    pub other_name: Option<String>,
}

/// The graph traversal engine
///
/// Read-only over the relationship store; safe to share across threads and
/// to fan out per-request.
pub struct GraphExplorer {
    config: EngineConfig,
}

impl GraphExplorer {
    /// Create an explorer with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create an explorer with default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Explore the neighborhood of `center` out to `depth` hops
    ///
    /// `depth` falls back to the configured default (2); requests above the
    /// configured ceiling are rejected before any store access. A depth of
    /// zero returns just the center node with no edges.
    ///
    /// An unknown center is not an error: the result is a single node with
    /// an empty edge set, because a tool nobody has related to anything is
    /// an ordinary state of the catalog.
    pub fn explore<S, D>(
        &self,
        store: &S,
        directory: &D,
        center: &ToolId,
        depth: Option<u32>,
    ) -> Result<GraphView, EngineError>
    where
        S: RelationshipStore,
        S::Error: std::fmt::Display,
        D: ToolDirectory,
        D::Error: std::fmt::Display,
    {
        let max_depth = depth.unwrap_or(self.config.default_depth);
        if max_depth > self.config.depth_ceiling {
            return Err(EngineError::InvalidInput(format!(
                "Requested depth {} exceeds ceiling {}",
                max_depth, self.config.depth_ceiling
            )));
        }

        tracing::debug!(center = %center, max_depth, "exploring relationship graph");

        let mut nodes: Vec<GraphNode> = Vec::new();
        let mut edges: Vec<GraphEdge> = Vec::new();
        let mut visited: HashSet<ToolId> = HashSet::new();
        // Edge identity is (pair, kind): the same edge is reachable from
        // both endpoints and must be emitted once.
        let mut seen_edges: HashSet<(ToolPair, RelationKind)> = HashSet::new();
        let mut queue: VecDeque<(ToolId, u32)> = VecDeque::new();

        queue.push_back((center.clone(), 0));

        while let Some((current, current_depth)) = queue.pop_front() {
            if visited.contains(&current) {
                continue;
            }
            if nodes.len() >= self.config.node_ceiling {
                tracing::warn!(
                    center = %center,
                    node_ceiling = self.config.node_ceiling,
                    "traversal truncated at node ceiling"
                );
                break;
            }
            visited.insert(current.clone());

            let display_name = directory.display_name(&current).ok().flatten();
            nodes.push(GraphNode {
                id: current.clone(),
                display_name,
                depth: current_depth,
            });

            // A zero bound means just the center vertex.
            if max_depth == 0 {
                continue;
            }

            let relationships = store
                .relationships_for(&current)
                .map_err(|e| EngineError::Store(format!("Failed to fetch edges: {}", e)))?;

            for rel in relationships {
                if seen_edges.insert((rel.pair.clone(), rel.kind)) {
                    edges.push(GraphEdge {
                        source: rel.pair.lo().clone(),
                        target: rel.pair.hi().clone(),
                        kind: rel.kind,
                        strength: rel.strength,
                    });
                }

                let Some(other) = rel.pair.other(&current) else {
                    continue;
                };
                if current_depth + 1 <= max_depth && !visited.contains(other) {
                    queue.push_back((other.clone(), current_depth + 1));
                }
            }
        }

        Ok(GraphView { nodes, edges })
    }

    /// All relationships touching a tool, with the far endpoint resolved
    pub fn neighbors<S, D>(
        &self,
        store: &S,
        directory: &D,
        tool: &ToolId,
    ) -> Result<Vec<NeighborView>, EngineError>
    where
        S: RelationshipStore,
        S::Error: std::fmt::Display,
        D: ToolDirectory,
        D::Error: std::fmt::Display,
    {
        let relationships = store
            .relationships_for(tool)
            .map_err(|e| EngineError::Store(format!("Failed to fetch edges: {}", e)))?;

        let views = relationships
            .into_iter()
            .filter_map(|rel| {
                let other = rel.pair.other(tool)?.clone();
                let other_name = directory.display_name(&other).ok().flatten();
                Some(NeighborView {
                    relationship: rel,
                    other,
                    other_name,
                })
            })
            .collect();
        Ok(views)
    }

    /// Recent relationships of one kind
    pub fn by_kind<S>(
        &self,
        store: &S,
        kind: RelationKind,
        limit: Option<usize>,
    ) -> Result<Vec<Relationship>, EngineError>
    where
        S: RelationshipStore,
        S::Error: std::fmt::Display,
    {
        store
            .relationships_by_kind(kind, limit.unwrap_or(DEFAULT_KIND_LIMIT))
            .map_err(|e| EngineError::Store(format!("Failed to fetch edges: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemStore;

    fn store_with_chain() -> MemStore {
        // a -- b -- c -- d, plus a cycle edge c -- a
        let mut store = MemStore::new();
        store.add_relationship("a", "b", RelationKind::PairsWith, 0.9);
        store.add_relationship("b", "c", RelationKind::PairsWith, 0.8);
        store.add_relationship("c", "d", RelationKind::PairsWith, 0.7);
        store.add_relationship("c", "a", RelationKind::Requires, 0.6);
        store
    }

    fn depths(view: &GraphView) -> Vec<(&str, u32)> {
        view.nodes
            .iter()
            .map(|n| (n.id.as_str(), n.depth))
            .collect()
    }

    #[test]
    fn test_depth_zero_is_center_only() {
        let store = store_with_chain();
        let explorer = GraphExplorer::default_config();
        let view = explorer
            .explore(&store, &store, &ToolId::new("a"), Some(0))
            .unwrap();

        assert_eq!(depths(&view), vec![("a", 0)]);
        assert!(view.edges.is_empty());
    }

    #[test]
    fn test_bounded_walk_respects_depth() {
        let store = store_with_chain();
        let explorer = GraphExplorer::default_config();
        let view = explorer
            .explore(&store, &store, &ToolId::new("a"), Some(1))
            .unwrap();

        // a at 0; b and c (via the cycle edge) at 1. d is out of reach.
        let mut found = depths(&view);
        found.sort();
        assert_eq!(found, vec![("a", 0), ("b", 1), ("c", 1)]);
        assert!(view.nodes.iter().all(|n| n.depth <= 1));
    }

    #[test]
    fn test_cycle_does_not_revisit() {
        let store = store_with_chain();
        let explorer = GraphExplorer::default_config();
        let view = explorer
            .explore(&store, &store, &ToolId::new("a"), Some(4))
            .unwrap();

        let mut ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), view.nodes.len(), "no node visited twice");
        assert_eq!(view.nodes.len(), 4);
    }

    #[test]
    fn test_edges_deduplicated() {
        let store = store_with_chain();
        let explorer = GraphExplorer::default_config();
        let view = explorer
            .explore(&store, &store, &ToolId::new("a"), Some(3))
            .unwrap();

        // Four stored relationships, each emitted exactly once even though
        // both endpoints of each get expanded.
        assert_eq!(view.edges.len(), 4);
    }

    #[test]
    fn test_symmetric_discovery() {
        // (a, b) stored once; exploring from either side finds the other.
        let mut store = MemStore::new();
        store.add_relationship("a", "b", RelationKind::PairsWith, 0.5);
        let explorer = GraphExplorer::default_config();

        for (start, expected_other) in [("a", "b"), ("b", "a")] {
            let view = explorer
                .explore(&store, &store, &ToolId::new(start), Some(1))
                .unwrap();
            assert!(view.nodes.iter().any(|n| n.id.as_str() == expected_other));
        }
    }

    #[test]
    fn test_unknown_center_is_single_node() {
        let store = MemStore::new();
        let explorer = GraphExplorer::default_config();
        let view = explorer
            .explore(&store, &store, &ToolId::new("ghost"), None)
            .unwrap();

        assert_eq!(depths(&view), vec![("ghost", 0)]);
        assert!(view.edges.is_empty());
    }

    #[test]
    fn test_depth_above_ceiling_rejected() {
        let store = MemStore::new();
        let explorer = GraphExplorer::default_config();
        let err = explorer
            .explore(&store, &store, &ToolId::new("a"), Some(9))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_node_ceiling_truncates() {
        // Star graph: hub connected to 10 spokes, ceiling of 4 nodes.
        let mut store = MemStore::new();
        for i in 0..10 {
            store.add_relationship("hub", &format!("spoke-{}", i), RelationKind::PairsWith, 0.5);
        }

        let explorer = GraphExplorer::new(EngineConfig {
            node_ceiling: 4,
            ..EngineConfig::default()
        });
        let view = explorer
            .explore(&store, &store, &ToolId::new("hub"), Some(1))
            .unwrap();

        assert_eq!(view.nodes.len(), 4);
    }

    #[test]
    fn test_display_names_attached_and_failures_tolerated() {
        let mut store = store_with_chain();
        store.set_name("a", "Tool A");
        let explorer = GraphExplorer::default_config();

        let view = explorer
            .explore(&store, &store, &ToolId::new("a"), Some(1))
            .unwrap();
        let center = &view.nodes[0];
        assert_eq!(center.display_name.as_deref(), Some("Tool A"));

        // Resolver outage: names are omitted, the walk still succeeds.
        store.fail_names = true;
        let view = explorer
            .explore(&store, &store, &ToolId::new("a"), Some(1))
            .unwrap();
        assert!(view.nodes.iter().all(|n| n.display_name.is_none()));
    }

    #[test]
    fn test_frontier_edges_reference_unvisited_nodes() {
        let store = store_with_chain();
        let explorer = GraphExplorer::default_config();
        let view = explorer
            .explore(&store, &store, &ToolId::new("b"), Some(1))
            .unwrap();

        // c is at depth 1, so its edge to d is emitted even though d is
        // beyond the bound and absent from nodes.
        assert!(view
            .edges
            .iter()
            .any(|e| e.source.as_str() == "c" && e.target.as_str() == "d"));
        assert!(!view.nodes.iter().any(|n| n.id.as_str() == "d"));
    }

    #[test]
    fn test_neighbors_resolve_far_endpoint() {
        let mut store = store_with_chain();
        store.set_name("b", "Tool B");
        let explorer = GraphExplorer::default_config();

        let views = explorer
            .neighbors(&store, &store, &ToolId::new("a"))
            .unwrap();
        assert_eq!(views.len(), 2);

        let to_b = views
            .iter()
            .find(|v| v.other.as_str() == "b")
            .expect("edge to b");
        assert_eq!(to_b.other_name.as_deref(), Some("Tool B"));
    }
}
