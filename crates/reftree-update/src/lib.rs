//! Single-ref updates for a ref tree whose only write is a batch commit.
//!
//! [`RefUpdate`] drives one change to one ref (create, move, delete or
//! link) through a set of [`RefUpdateHooks`]. [`RefTreeUpdate`] implements
//! those hooks by submitting the change as a one-command batch to a
//! [`RefDatabase`](reftree_refs::RefDatabase) and translating the
//! command's outcome with [`translate`].
//!
//! ```
//! use std::sync::Arc;
//!
//! use reftree_refs::{RefDatabase, RefTreeDatabase};
//! use reftree_store::{Commit, InMemoryObjectStore, ObjectStore, Tree};
//! use reftree_types::PersonIdent;
//! use reftree_update::{RefTreeUpdate, UpdateResult};
//!
//! let objects = Arc::new(InMemoryObjectStore::new());
//! let tree = objects.write(&Tree::empty().to_stored_object()?)?;
//! let commit = Commit {
//!     tree,
//!     parents: vec![],
//!     author: PersonIdent::at_epoch_secs("A U Thor", "author@example.com", 0)?,
//!     message: "initial".into(),
//! };
//! let c1 = objects.write(&commit.to_stored_object()?)?;
//!
//! let db = RefTreeDatabase::new(objects);
//! let mut up = RefTreeUpdate::for_name(db.clone(), "refs/heads/main", false)?;
//! up.set_new_object_id(c1);
//! let mut resolver = db.new_resolver();
//! assert_eq!(up.update(&mut resolver)?, UpdateResult::New);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapter;
pub mod driver;
pub mod error;
pub mod hooks;
pub mod request;
pub mod result;
pub mod translate;

#[cfg(test)]
mod test_support;

pub use adapter::{Lifecycle, RefTreeUpdate};
pub use driver::RefUpdate;
pub use error::{Result, UpdateError};
pub use hooks::RefUpdateHooks;
pub use request::UpdateRequest;
pub use result::UpdateResult;
pub use translate::translate;
