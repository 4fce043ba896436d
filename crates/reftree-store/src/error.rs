use reftree_types::ObjectId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object does not exist in the store.
    #[error("missing object: {0}")]
    MissingObject(ObjectId),

    /// The object exists but is not of the kind the caller required.
    #[error("object {id} is a {actual}, expected {expected}")]
    IncorrectObjectType {
        id: ObjectId,
        expected: String,
        actual: String,
    },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The object data is malformed or cannot be decoded.
    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: ObjectId, reason: String },

    /// Attempted to write an object hashing to the zero ID.
    #[error("cannot store object with zero ID")]
    ZeroObjectId,

    /// A lock guarding in-memory state was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),

    /// The resolver was used after `close()`.
    #[error("resolver is closed")]
    Closed,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
