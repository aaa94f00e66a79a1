//! Canonical unordered tool pair
//!
//! Relationships, compatibility scores, and synergies are all keyed by an
//! unordered pair of tools. The pair is canonicalized on construction (the
//! lexicographically smaller id first), so storage holds exactly one row per
//! semantic pair and lookups never need to probe both orderings.

use crate::ToolId;
use std::fmt;

/// An unordered pair of tool ids in canonical `(lo, hi)` order
///
/// `ToolPair::new(a, b)` and `ToolPair::new(b, a)` are the same value.
///
/// # Examples
///
/// ```
/// use toolmesh_domain::{ToolId, ToolPair};
///
/// let ab = ToolPair::new(ToolId::new("react"), ToolId::new("nextjs"));
/// let ba = ToolPair::new(ToolId::new("nextjs"), ToolId::new("react"));
/// assert_eq!(ab, ba);
/// assert_eq!(ab.lo().as_str(), "nextjs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolPair {
    lo: ToolId,
    hi: ToolId,
}

impl ToolPair {
    /// Build a canonical pair from two ids in any order
    pub fn new(a: ToolId, b: ToolId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The lexicographically smaller endpoint
    pub fn lo(&self) -> &ToolId {
        &self.lo
    }

    /// The lexicographically larger endpoint
    pub fn hi(&self) -> &ToolId {
        &self.hi
    }

    /// Whether the given tool is one of the endpoints
    pub fn contains(&self, tool: &ToolId) -> bool {
        &self.lo == tool || &self.hi == tool
    }

    /// The endpoint opposite to `tool`, if `tool` is an endpoint
    pub fn other(&self, tool: &ToolId) -> Option<&ToolId> {
        if tool == &self.lo {
            Some(&self.hi)
        } else if tool == &self.hi {
            Some(&self.lo)
        } else {
            None
        }
    }
}

impl fmt::Display for ToolPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: construction is order-insensitive
        #[test]
        fn test_pair_symmetry(a in "[a-z0-9-]{1,12}", b in "[a-z0-9-]{1,12}") {
            let ab = ToolPair::new(ToolId::new(a.clone()), ToolId::new(b.clone()));
            let ba = ToolPair::new(ToolId::new(b), ToolId::new(a));
            prop_assert_eq!(ab, ba);
        }

        /// Property: lo is never greater than hi
        #[test]
        fn test_pair_canonical(a in "[a-z0-9-]{1,12}", b in "[a-z0-9-]{1,12}") {
            let pair = ToolPair::new(ToolId::new(a), ToolId::new(b));
            prop_assert!(pair.lo() <= pair.hi());
        }

        /// Property: other() round-trips between the two endpoints
        #[test]
        fn test_pair_other_involution(a in "[a-z0-9-]{1,12}", b in "[a-z0-9-]{1,12}") {
            let pair = ToolPair::new(ToolId::new(a.clone()), ToolId::new(b));
            let start = ToolId::new(a);
            let across = pair.other(&start).unwrap().clone();
            prop_assert_eq!(pair.other(&across), Some(&start));
        }
    }
}
