//! Curated synergies between tool pairs
//!
//! Synergies are seeded by curators and read-only from the engine's point of
//! view. They exist solely to score decks: a combo or integration adds to a
//! deck's total, a conflict subtracts from it.

use crate::{SynergyId, ToolPair};

/// The nature of a curated pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynergyKind {
    /// The tools amplify each other
    Combo,

    /// One tool ships first-class support for the other
    Integration,

    /// The tools fill the same role; pick one
    Alternative,

    /// The tools actively work against each other
    Conflict,
}

impl SynergyKind {
    /// Stable string form used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            SynergyKind::Combo => "combo",
            SynergyKind::Integration => "integration",
            SynergyKind::Alternative => "alternative",
            SynergyKind::Conflict => "conflict",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "combo" => Some(SynergyKind::Combo),
            "integration" => Some(SynergyKind::Integration),
            "alternative" => Some(SynergyKind::Alternative),
            "conflict" => Some(SynergyKind::Conflict),
            _ => None,
        }
    }
}

/// A curated bonus or penalty for a specific tool pair
#[derive(Debug, Clone, PartialEq)]
pub struct Synergy {
    /// Unique identifier
    pub id: SynergyId,

    /// The pair this synergy covers
    pub pair: ToolPair,

    /// Nature of the pairing
    pub kind: SynergyKind,

    /// Signed contribution to a deck's total; negative for conflicts
    pub score: i32,

    /// Curator's explanation of the pairing
    pub description: String,

    /// Optional flavor bonus shown with the pairing ("+40% DX")
    pub bonus_effect: Option<String>,
}

impl Synergy {
    /// Create a new curated synergy
    pub fn new(
        pair: ToolPair,
        kind: SynergyKind,
        score: i32,
        description: String,
        bonus_effect: Option<String>,
    ) -> Self {
        Self {
            id: SynergyId::new(),
            pair,
            kind,
            score,
            description,
            bonus_effect,
        }
    }
}
