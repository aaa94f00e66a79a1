//! Deck synergy scoring
//!
//! A deck is an arbitrary user-chosen set of tools; its score is the sum of
//! curated synergy scores over every pair in the selection. Conflicting
//! pairs carry negative scores, so a deck's total can go below zero — that
//! is the point, not a bug.
//!
//! Pair lookups are O(n²) in deck size, which is fine: decks run single
//! digits to low tens of tools.

use crate::EngineError;
use toolmesh_domain::traits::{SynergyStore, ToolDirectory};
use toolmesh_domain::{Synergy, SynergyKind, ToolId, ToolPair};

/// One scored pairing inside a deck
#[derive(Debug, Clone, PartialEq)]
pub struct SynergyDetail {
    /// First tool, in deck order
    pub tool_a: ToolId,

    /// Second tool, in deck order
    pub tool_b: ToolId,

    /// Display name of the first tool, when resolvable
    pub name_a: Option<String>,

    /// Display name of the second tool, when resolvable
    pub name_b: Option<String>,

    /// Signed contribution to the deck total
    pub score: i32,

    /// Nature of the pairing
    pub kind: SynergyKind,

    /// Optional flavor bonus
    pub bonus_effect: Option<String>,
}

/// The scored result for a deck
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSynergy {
    /// Sum of all pair scores; negative when conflicts dominate
    pub total_score: i64,

    /// Every pair that matched a curated synergy
    pub synergies: Vec<SynergyDetail>,
}

/// A synergy seen from one tool's perspective
#[derive(Debug, Clone, PartialEq)]
pub struct SynergyView {
    /// The curated record
    pub synergy: Synergy,

    /// The endpoint that is not the queried tool
    pub other: ToolId,

    /// Display name of the other endpoint, when resolvable
    pub other_name: Option<String>,
}

/// The deck synergy calculator
///
/// Stateless and read-only; construct freely.
#[derive(Debug, Default)]
pub struct DeckScorer;

impl DeckScorer {
    /// Create a scorer
    pub fn new() -> Self {
        Self
    }

    /// Score a deck by its pairwise synergies
    ///
    /// Fewer than two tools scores zero with no detail rows. Pairs without
    /// a curated synergy contribute nothing. Duplicate ids in the input are
    /// scored once per index pair, so a deck listing the same tool twice
    /// double-counts its pairings — callers that dedupe should do so before
    /// calling.
    pub fn score_deck<S, D>(
        &self,
        store: &S,
        directory: &D,
        deck: &[ToolId],
    ) -> Result<DeckSynergy, EngineError>
    where
        S: SynergyStore,
        S::Error: std::fmt::Display,
        D: ToolDirectory,
        D::Error: std::fmt::Display,
    {
        if deck.len() < 2 {
            return Ok(DeckSynergy {
                total_score: 0,
                synergies: Vec::new(),
            });
        }

        let mut total_score: i64 = 0;
        let mut synergies = Vec::new();

        for i in 0..deck.len() {
            for j in (i + 1)..deck.len() {
                let pair = ToolPair::new(deck[i].clone(), deck[j].clone());
                let found = store
                    .synergy_between(&pair)
                    .map_err(|e| EngineError::Store(format!("Failed to read synergy: {}", e)))?;

                let Some(synergy) = found else {
                    continue;
                };

                total_score += synergy.score as i64;
                synergies.push(SynergyDetail {
                    tool_a: deck[i].clone(),
                    tool_b: deck[j].clone(),
                    name_a: directory.display_name(&deck[i]).ok().flatten(),
                    name_b: directory.display_name(&deck[j]).ok().flatten(),
                    score: synergy.score,
                    kind: synergy.kind,
                    bonus_effect: synergy.bonus_effect,
                });
            }
        }

        tracing::debug!(
            deck_size = deck.len(),
            matched = synergies.len(),
            total_score,
            "scored deck"
        );

        Ok(DeckSynergy {
            total_score,
            synergies,
        })
    }

    /// All curated synergies touching a tool, far endpoint resolved
    pub fn synergies_for<S, D>(
        &self,
        store: &S,
        directory: &D,
        tool: &ToolId,
    ) -> Result<Vec<SynergyView>, EngineError>
    where
        S: SynergyStore,
        S::Error: std::fmt::Display,
        D: ToolDirectory,
        D::Error: std::fmt::Display,
    {
        let synergies = store
            .synergies_for(tool)
            .map_err(|e| EngineError::Store(format!("Failed to read synergies: {}", e)))?;

        let views = synergies
            .into_iter()
            .filter_map(|synergy| {
                let other = synergy.pair.other(tool)?.clone();
                let other_name = directory.display_name(&other).ok().flatten();
                Some(SynergyView {
                    synergy,
                    other,
                    other_name,
                })
            })
            .collect();
        Ok(views)
    }
}
