//! Tier ranks and user tier lists
//!
//! A tier list is one user's ranking of a category's tools into five buckets,
//! S (highest) through D (lowest). The consensus engine weighs many public
//! lists into a single community placement.

use crate::{TierListId, ToolId};

/// A rank bucket, S highest through D lowest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Top picks
    S,

    /// Strong choices
    A,

    /// Solid middle of the pack
    B,

    /// Situational
    C,

    /// Bottom of the ranking
    D,
}

impl Tier {
    /// All tiers, highest first
    pub const ALL: [Tier; 5] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D];

    /// Numeric value used when averaging placements (S=5 … D=1)
    pub fn value(&self) -> u8 {
        match self {
            Tier::S => 5,
            Tier::A => 4,
            Tier::B => 3,
            Tier::C => 2,
            Tier::D => 1,
        }
    }

    /// Stable string form used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::S => "s",
            Tier::A => "a",
            Tier::B => "b",
            Tier::C => "c",
            Tier::D => "d",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" => Some(Tier::S),
            "a" => Some(Tier::A),
            "b" => Some(Tier::B),
            "c" => Some(Tier::C),
            "d" => Some(Tier::D),
            _ => None,
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}

/// The five tool buckets of a tier list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierBuckets {
    /// S-tier tools
    pub s: Vec<ToolId>,

    /// A-tier tools
    pub a: Vec<ToolId>,

    /// B-tier tools
    pub b: Vec<ToolId>,

    /// C-tier tools
    pub c: Vec<ToolId>,

    /// D-tier tools
    pub d: Vec<ToolId>,
}

impl TierBuckets {
    /// Borrow the bucket for a tier
    pub fn bucket(&self, tier: Tier) -> &[ToolId] {
        match tier {
            Tier::S => &self.s,
            Tier::A => &self.a,
            Tier::B => &self.b,
            Tier::C => &self.c,
            Tier::D => &self.d,
        }
    }

    /// Mutably borrow the bucket for a tier
    pub fn bucket_mut(&mut self, tier: Tier) -> &mut Vec<ToolId> {
        match tier {
            Tier::S => &mut self.s,
            Tier::A => &mut self.a,
            Tier::B => &mut self.b,
            Tier::C => &mut self.c,
            Tier::D => &mut self.d,
        }
    }

    /// Total number of placements across all buckets
    pub fn len(&self) -> usize {
        Tier::ALL.iter().map(|t| self.bucket(*t).len()).sum()
    }

    /// Whether every bucket is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate (tier, tools) pairs, highest tier first
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[ToolId])> + '_ {
        Tier::ALL.iter().map(move |t| (*t, self.bucket(*t)))
    }
}

/// One user's ranking of a category's tools
///
/// A tool should appear in at most one bucket per list; that is the list
/// author's responsibility, not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct TierList {
    /// Unique identifier
    pub id: TierListId,

    /// Owning user (opaque, identity lives elsewhere)
    pub user_id: String,

    /// Category the ranking covers (opaque catalog id)
    pub category_id: String,

    /// The ranked buckets
    pub tiers: TierBuckets,

    /// Whether the list participates in the public consensus
    pub is_public: bool,

    /// Community upvotes; drives consensus weight
    pub upvotes: u32,

    /// When the list was created (ms since Unix epoch)
    pub created_at: u64,
}

impl TierList {
    /// Create a list with zero upvotes
    pub fn new(
        user_id: String,
        category_id: String,
        tiers: TierBuckets,
        is_public: bool,
        created_at: u64,
    ) -> Self {
        Self {
            id: TierListId::new(),
            user_id,
            category_id,
            tiers,
            is_public,
            upvotes: 0,
            created_at,
        }
    }

    /// Consensus influence weight: `1 + upvotes × 0.1`, uncapped
    pub fn weight(&self) -> f64 {
        1.0 + self.upvotes as f64 * 0.1
    }
}
