//! Error types for reference operations.

use reftree_store::StoreError;
use thiserror::Error;

/// Errors that can occur during reference operations.
///
/// Rejections of individual commands in a batch are not errors; they are
/// recorded on the command as a [`CommandResult`](crate::CommandResult).
#[derive(Debug, Error)]
pub enum RefError {
    /// The reference was not found.
    #[error("ref not found: {name}")]
    NotFound { name: String },

    /// The reference name is invalid.
    #[error("invalid ref name: {name}: {reason}")]
    InvalidRefName { name: String, reason: String },

    /// A chain of symbolic refs is too deep or loops.
    #[error("symbolic ref chain too deep at {name}")]
    SymbolicDepthExceeded { name: String },

    /// `execute` or `lookup` was called before `initialize`.
    #[error("batch used before initialize")]
    BatchNotInitialized,

    /// Batch policy could not be loaded.
    #[error("invalid batch policy: {0}")]
    Config(String),

    /// A lock guarding in-memory state was poisoned by a panicking writer.
    #[error("ref tree lock poisoned: {0}")]
    Poisoned(String),

    /// Object resolution or storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// I/O error during file-based operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for ref operations.
pub type Result<T> = std::result::Result<T, RefError>;
