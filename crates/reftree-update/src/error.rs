//! Error types for single-ref updates.

use reftree_refs::RefError;
use reftree_store::StoreError;
use reftree_types::ObjectId;
use thiserror::Error;

use crate::adapter::Lifecycle;

/// Errors that stop an update attempt.
///
/// Refusals by the batch engine are not errors; they come back as an
/// [`UpdateResult`](crate::UpdateResult).
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The requested new object does not exist.
    #[error("missing object: {0}")]
    MissingObject(ObjectId),

    /// An update was requested without a new object id.
    #[error("no new object id set for {name}")]
    MissingNewObjectId { name: String },

    /// A symbolic ref may only point under `refs/`.
    #[error("invalid link target: {target}")]
    InvalidLinkTarget { target: String },

    /// An operation was called outside the acquired state.
    #[error("{operation} called while update is {state}")]
    InvalidState {
        state: Lifecycle,
        operation: &'static str,
    },

    /// Ref lookup, name validation or batch failure.
    #[error(transparent)]
    Ref(#[from] RefError),

    /// Object store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UpdateError {
    /// Map a resolver failure, keeping missing objects distinct.
    pub(crate) fn from_resolve(err: StoreError) -> Self {
        match err {
            StoreError::MissingObject(id) => Self::MissingObject(id),
            other => Self::Store(other),
        }
    }
}

/// Convenience type alias for update operations.
pub type Result<T> = std::result::Result<T, UpdateError>;
