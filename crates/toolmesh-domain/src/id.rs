//! Identifier types
//!
//! Tools are identified by opaque catalog-owned tokens ([`ToolId`]). Records
//! created inside this system (relationships, reports, migration paths, tier
//! lists) carry UUIDv7 identifiers, which sort chronologically and need no
//! coordination to generate.

use std::fmt;

/// Opaque identifier for a tool in the external catalog
///
/// The engine never reads or mutates tool content; ids are used only as
/// graph vertices and map keys. `Ord` on the underlying token gives the
/// stable ordering used to canonicalize unordered pairs.
///
/// # Examples
///
/// ```
/// use toolmesh_domain::ToolId;
///
/// let id = ToolId::new("nextjs");
/// assert_eq!(id.as_str(), "nextjs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToolId(String);

impl ToolId {
    /// Wrap a catalog token as a ToolId
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToolId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ToolId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

macro_rules! record_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        ///
        /// Backed by a UUIDv7, so ids generated later compare greater.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u128);

        impl $name {
            /// Generate a fresh UUIDv7-based identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7().as_u128())
            }

            /// Rebuild an identifier from its raw value
            ///
            /// Primarily for storage layer deserialization.
            pub fn from_value(value: u128) -> Self {
                Self(value)
            }

            /// Parse from the canonical UUID string form
            pub fn from_string(s: &str) -> Result<Self, String> {
                uuid::Uuid::parse_str(s)
                    .map(|u| Self(u.as_u128()))
                    .map_err(|e| format!("Invalid UUID string: {}", e))
            }

            /// Get the raw u128 value
            pub fn value(&self) -> u128 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", uuid::Uuid::from_u128(self.0))
            }
        }
    };
}

record_id! {
    /// Identifier for a stored relationship edge
    RelationshipId
}

record_id! {
    /// Identifier for a raw compatibility report
    ReportId
}

record_id! {
    /// Identifier for a curated synergy record
    SynergyId
}

record_id! {
    /// Identifier for a migration path
    PathId
}

record_id! {
    /// Identifier for a user tier list
    TierListId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_id_ordering() {
        let a = ToolId::new("astro");
        let b = ToolId::new("bun");
        assert!(a < b);
    }

    #[test]
    fn test_record_id_chronological() {
        let id1 = RelationshipId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RelationshipId::new();
        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
    }

    #[test]
    fn test_record_id_display_and_parse() {
        let id = ReportId::new();
        let s = id.to_string();
        assert_eq!(s.len(), 36);
        assert_eq!(ReportId::from_string(&s).unwrap(), id);
    }

    #[test]
    fn test_record_id_invalid_string() {
        assert!(PathId::from_string("not-a-valid-uuid").is_err());
        assert!(PathId::from_string("").is_err());
    }
}
