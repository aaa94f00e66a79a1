//! Toolmesh Storage Layer
//!
//! Implements every domain store trait over a single SQLite database.
//!
//! # Architecture
//!
//! - One connection, one schema (`schema.sql`), six trait implementations
//! - Pairwise tables are keyed by the canonical `(tool_lo, tool_hi)` pair,
//!   so lookups are single-probe and order-insensitive
//! - Aggregate updates are guarded compare-and-swap statements; a stale
//!   guard reports [`WriteOutcome::Conflict`] and writes nothing
//!
//! # Examples
//!
//! ```no_run
//! use toolmesh_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for relationship/report/tier-list operations
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use toolmesh_domain::traits::ToolDirectory;
use toolmesh_domain::ToolId;

mod compatibility;
mod migrations;
mod relationships;
mod synergies;
mod tier_lists;

pub use toolmesh_domain::traits::WriteOutcome;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// List-valued column failed to (de)serialize
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-backed implementation of every Toolmesh store trait
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// `SqliteStore` instance; cross-process writers are serialized by the
/// guarded-update statements, not by this type.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a store backed by the database at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use toolmesh_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("toolmesh.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Register a tool's display name so graph and deck output can resolve it
    ///
    /// The catalog is the source of truth for tool content; this table is a
    /// local name mirror, refreshed by the embedding application.
    pub fn register_tool(&mut self, tool: &ToolId, display_name: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO tools (id, display_name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET display_name = excluded.display_name",
            params![tool.as_str(), display_name],
        )?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Convert a record id to bytes for storage
    pub(crate) fn id_to_bytes(value: u128) -> Vec<u8> {
        value.to_be_bytes().to_vec()
    }

    /// Convert stored bytes back to a record id value
    pub(crate) fn bytes_to_id(bytes: &[u8]) -> Result<u128, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for record id, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(u128::from_be_bytes(arr))
    }

    /// Wrap a domain-level parse failure into a rusqlite row-mapping error
    pub(crate) fn column_error(
        index: usize,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> rusqlite::Error {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            Box::new(err),
        )
    }
}

impl ToolDirectory for SqliteStore {
    type Error = StoreError;

    fn display_name(&self, tool: &ToolId) -> Result<Option<String>, Self::Error> {
        let name = self
            .conn
            .query_row(
                "SELECT display_name FROM tools WHERE id = ?1",
                params![tool.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(name)
    }
}

/// Encode a list of strings for a TEXT column
pub(crate) fn encode_strings(items: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(items)?)
}

/// Decode a list of strings from a TEXT column
pub(crate) fn decode_strings(raw: &str) -> Result<Vec<String>, StoreError> {
    Ok(serde_json::from_str(raw)?)
}
