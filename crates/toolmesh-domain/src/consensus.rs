//! Community consensus computation
//!
//! Implements the deterministic weighting formula that folds many individual
//! tier lists into a single community placement. This is pure math over the
//! lists it is handed; fetching the public lists for a category is the
//! engine's job.
//!
//! Each list's influence is `1 + upvotes × 0.1`. Every (tool, tier)
//! occurrence contributes `tier value × weight` to the tool's weighted sum;
//! the tool's average decides its rank, and final buckets are cut by rank
//! percentile, not by the average value itself.

use crate::{Tier, TierBuckets, TierList, ToolId};
use std::collections::HashMap;

/// Percentile cutoffs over rank position (0-indexed `rank / total`)
///
/// Below 0.10 → S, below 0.30 → A, below 0.60 → B, below 0.85 → C, rest D.
const CUTOFFS: [(f64, Tier); 4] = [
    (0.10, Tier::S),
    (0.30, Tier::A),
    (0.60, Tier::B),
    (0.85, Tier::C),
];

/// The community-wide placement derived from public tier lists
#[derive(Debug, Clone, PartialEq)]
pub struct TierConsensus {
    /// Consensus bucket per tool
    pub tiers: TierBuckets,

    /// Number of lists that participated
    pub total_lists: u32,

    /// Sum of upvotes across participating lists
    pub total_votes: u32,
}

/// Fold tier lists into a consensus placement
///
/// Returns `None` when `lists` is empty — no data is different from an empty
/// ranking. Callers pass the public lists for one category; privacy
/// filtering happens at the store.
///
/// Ties in the weighted average keep first-appearance order: the sort is
/// stable and tools are accumulated in the order they are first seen across
/// the input lists.
pub fn weigh_tier_lists(lists: &[TierList]) -> Option<TierConsensus> {
    if lists.is_empty() {
        return None;
    }

    // Accumulate weighted placements. `order` preserves first-appearance
    // order so equal averages rank deterministically.
    let mut sums: HashMap<&ToolId, (f64, f64)> = HashMap::new();
    let mut order: Vec<&ToolId> = Vec::new();

    for list in lists {
        let weight = list.weight();
        for (tier, tools) in list.tiers.iter() {
            let value = tier.value() as f64;
            for tool in tools {
                let entry = sums.entry(tool).or_insert_with(|| {
                    order.push(tool);
                    (0.0, 0.0)
                });
                entry.0 += value * weight;
                entry.1 += weight;
            }
        }
    }

    let mut ranked: Vec<(&ToolId, f64)> = order
        .iter()
        .map(|tool| {
            let (weighted, total) = sums[tool];
            (*tool, weighted / total)
        })
        .collect();

    // Stable sort: ties keep first-appearance order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let total = ranked.len();
    let mut tiers = TierBuckets::default();
    for (rank, (tool, _)) in ranked.into_iter().enumerate() {
        let percentile = rank as f64 / total as f64;
        tiers.bucket_mut(tier_for_percentile(percentile)).push((*tool).clone());
    }

    Some(TierConsensus {
        tiers,
        total_lists: lists.len() as u32,
        total_votes: lists.iter().map(|l| l.upvotes).sum(),
    })
}

/// Map a rank percentile to its consensus bucket
fn tier_for_percentile(percentile: f64) -> Tier {
    for (cutoff, tier) in CUTOFFS {
        if percentile < cutoff {
            return tier;
        }
    }
    Tier::D
}
