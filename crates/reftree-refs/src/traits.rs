//! The storage-facing trait boundaries for ref updates.
//!
//! A [`RefDatabase`] owns the refs and hands out fresh [`BatchEngine`]s; a
//! batch engine is the only way to change refs, and applies a whole list of
//! [`Command`]s atomically or not at all.

use std::sync::Arc;

use reftree_store::{ObjectStore, Resolver};
use reftree_types::PersonIdent;

use crate::command::Command;
use crate::error::Result;
use crate::types::Ref;

/// Atomic multi-ref commit engine.
///
/// One engine instance serves one attempt: it is created, initialized,
/// used for lookups and at most one `execute`, then dropped.
pub trait BatchEngine {
    /// Bind the engine to the store's current state, as seen through
    /// `resolver`. Later commits by other engines make this engine's
    /// `execute` report [`CommandResult::LockFailure`](crate::CommandResult).
    fn initialize(&mut self, resolver: &mut Resolver) -> Result<()>;

    /// Read the current value of `name`, resolving symbolic targets.
    ///
    /// Returns `Ok(None)` if the ref does not exist.
    fn lookup(&mut self, resolver: &mut Resolver, name: &str) -> Result<Option<Ref>>;

    /// Identity recorded in the ref-log for commands this engine applies.
    fn set_log_identity(&mut self, identity: Option<PersonIdent>);

    /// Message recorded in the ref-log. With `include_result` the outcome of
    /// each command is appended to the message.
    fn set_log_message(&mut self, message: Option<String>, include_result: bool);

    /// Execute `commands` atomically, writing each command's outcome into it.
    ///
    /// Rejections are reported through the commands, not as `Err`; an `Err`
    /// means the engine itself failed.
    fn execute(&mut self, resolver: &mut Resolver, commands: &mut [Command]) -> Result<()>;
}

/// A store of refs backed by batch commits.
pub trait RefDatabase: Send + Sync {
    type Batch: BatchEngine;

    /// The object store refs in this database point into.
    fn object_store(&self) -> Arc<dyn ObjectStore>;

    /// A new, uninitialized batch engine bound to this database.
    fn new_batch(&self) -> Result<Self::Batch>;

    /// Read a ref by exact name, resolving symbolic targets.
    fn exact_ref(&self, name: &str) -> Result<Option<Ref>>;

    /// Open a resolver over this database's objects.
    fn new_resolver(&self) -> Resolver {
        Resolver::new(self.object_store())
    }
}
