//! Engine error types

use thiserror::Error;

/// Errors that can occur during engine operations
///
/// Absence of community data is not an error: read paths resolve missing
/// records to `None` or empty vectors. These variants cover genuinely
/// exceptional outcomes.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Input rejected before any store access
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A targeted mutation referenced a record that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A guarded aggregate write kept losing to concurrent writers
    #[error("Concurrent update conflict on {key} persisted after {attempts} attempts")]
    ConflictRetriesExhausted {
        /// The contended record (pair or path id)
        key: String,
        /// Number of attempts made before giving up
        attempts: u32,
    },

    /// Store error, propagated unchanged apart from stringification
    #[error("Store error: {0}")]
    Store(String),
}
