//! Content-addressed object storage for RefTree.
//!
//! Refs only ever point at objects in this store. The store itself is a
//! hash-keyed map of immutable objects; the [`Resolver`] layers typed access
//! on top of it for a single ref update attempt.
//!
//! # Object Types
//!
//! - [`Blob`] -- raw content
//! - [`Tree`] -- directory listing mapping names to object ids
//! - [`Commit`] -- a tree plus parent commits; the unit of history
//! - [`Tag`] -- an annotated tag wrapping another object
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Resolution
//!
//! [`Resolver`] parses ids into [`RevObject`]s, peels annotated tags, and
//! answers ancestry questions. It caches what it parses and is closed when
//! the attempt that owns it ends.

pub mod error;
pub mod memory;
pub mod object;
pub mod resolver;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use object::{
    Blob, Commit, ContentHasher, EntryMode, ObjectKind, StoredObject, Tag, Tree, TreeEntry,
};
pub use resolver::{RevKind, RevObject, Resolver};
pub use traits::ObjectStore;
