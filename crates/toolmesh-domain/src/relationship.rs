//! Relationship edges between tools
//!
//! Edges are created by curators and voters, read by the graph explorer, and
//! never deleted. They are semantically undirected; the canonical [`ToolPair`]
//! key makes that explicit in storage.

use crate::{RelationshipId, ToolPair};

/// Type of relationship between two tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// The tools are commonly used together
    PairsWith,

    /// The tools compete for the same role in a stack
    CompetesWith,

    /// One tool is a drop-in replacement for the other
    Replaces,

    /// One tool's design drew on the other
    InspiredBy,

    /// One tool builds on top of the other
    Extends,

    /// One tool needs the other to function
    Requires,
}

impl RelationKind {
    /// Stable string form used for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::PairsWith => "pairs_with",
            RelationKind::CompetesWith => "competes_with",
            RelationKind::Replaces => "replaces",
            RelationKind::InspiredBy => "inspired_by",
            RelationKind::Extends => "extends",
            RelationKind::Requires => "requires",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pairs_with" => Some(RelationKind::PairsWith),
            "competes_with" => Some(RelationKind::CompetesWith),
            "replaces" => Some(RelationKind::Replaces),
            "inspired_by" => Some(RelationKind::InspiredBy),
            "extends" => Some(RelationKind::Extends),
            "requires" => Some(RelationKind::Requires),
            _ => None,
        }
    }
}

impl std::str::FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relation kind: {}", s))
    }
}

/// A typed, strength-weighted edge between two tools
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Unique identifier
    pub id: RelationshipId,

    /// The two tools, canonically ordered
    pub pair: ToolPair,

    /// Type of relationship
    pub kind: RelationKind,

    /// Strength of the relationship [0.0, 1.0]
    pub strength: f64,

    /// Free-form evidence entries backing the edge
    pub evidence: Vec<String>,

    /// Community confirmation votes; only ever incremented
    pub community_votes: u32,

    /// When this edge was created (ms since Unix epoch)
    pub created_at: u64,

    /// When this edge was last touched (ms since Unix epoch)
    pub updated_at: u64,
}

impl Relationship {
    /// Create a new edge with zero votes
    ///
    /// Returns `None` if `strength` is outside [0, 1].
    pub fn new(
        pair: ToolPair,
        kind: RelationKind,
        strength: f64,
        evidence: Vec<String>,
        created_at: u64,
    ) -> Option<Self> {
        if !(0.0..=1.0).contains(&strength) {
            return None;
        }

        Some(Self {
            id: RelationshipId::new(),
            pair,
            kind,
            strength,
            evidence,
            community_votes: 0,
            created_at,
            updated_at: created_at,
        })
    }
}
