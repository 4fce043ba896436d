//! In-memory ref tree for tests and ephemeral use.
//!
//! [`RefTreeDatabase`] keeps every ref in one `BTreeMap` behind a `RwLock`,
//! together with a version counter that every successful batch commit bumps.
//! The only way to change refs is a [`RefTreeBatch`](crate::RefTreeBatch).

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reftree_store::ObjectStore;
use reftree_types::{ObjectId, PersonIdent};

use crate::batch::RefTreeBatch;
use crate::config::BatchPolicy;
use crate::error::{RefError, Result};
use crate::traits::RefDatabase;
use crate::types::{Ref, RefTarget, Storage};

/// Maximum number of symbolic hops followed when resolving a ref.
pub const MAX_SYMBOLIC_REF_DEPTH: usize = 5;

/// One ref-log record written by a successful batch commit.
///
/// Entries live only as long as the database; nothing is persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefLogEntry {
    pub ref_name: String,
    pub old_id: Option<ObjectId>,
    pub new_id: Option<ObjectId>,
    pub who: Option<PersonIdent>,
    pub message: String,
}

#[derive(Debug, Default)]
pub(crate) struct RefTreeState {
    pub(crate) refs: BTreeMap<String, Ref>,
    pub(crate) version: u64,
    pub(crate) log: Vec<RefLogEntry>,
}

struct Inner {
    objects: Arc<dyn ObjectStore>,
    policy: BatchPolicy,
    state: RwLock<RefTreeState>,
}

/// An in-memory ref tree. Cloning yields another handle to the same tree.
#[derive(Clone)]
pub struct RefTreeDatabase {
    inner: Arc<Inner>,
}

impl RefTreeDatabase {
    /// Create an empty ref tree over `objects` with the permissive policy.
    pub fn new(objects: Arc<dyn ObjectStore>) -> Self {
        Self::with_policy(objects, BatchPolicy::default())
    }

    /// Create an empty ref tree enforcing `policy` on every batch.
    pub fn with_policy(objects: Arc<dyn ObjectStore>, policy: BatchPolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                objects,
                policy,
                state: RwLock::new(RefTreeState::default()),
            }),
        }
    }

    pub fn policy(&self) -> &BatchPolicy {
        &self.inner.policy
    }

    /// Number of batches committed so far.
    pub fn version(&self) -> Result<u64> {
        Ok(self.read_state()?.version)
    }

    /// All refs, resolved and sorted by name.
    pub fn refs(&self) -> Result<Vec<Ref>> {
        let state = self.read_state()?;
        state
            .refs
            .values()
            .map(|stored| resolve(&state.refs, stored))
            .collect()
    }

    /// Ref-log entries recorded so far, oldest first.
    pub fn log_entries(&self) -> Result<Vec<RefLogEntry>> {
        Ok(self.read_state()?.log.clone())
    }

    pub(crate) fn read_state(&self) -> Result<RwLockReadGuard<'_, RefTreeState>> {
        self.inner
            .state
            .read()
            .map_err(|e| RefError::Poisoned(e.to_string()))
    }

    pub(crate) fn write_state(&self) -> Result<RwLockWriteGuard<'_, RefTreeState>> {
        self.inner
            .state
            .write()
            .map_err(|e| RefError::Poisoned(e.to_string()))
    }
}

impl RefDatabase for RefTreeDatabase {
    type Batch = RefTreeBatch;

    fn object_store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.inner.objects)
    }

    fn new_batch(&self) -> Result<RefTreeBatch> {
        Ok(RefTreeBatch::new(self.clone()))
    }

    fn exact_ref(&self, name: &str) -> Result<Option<Ref>> {
        let state = self.read_state()?;
        lookup(&state.refs, name)
    }
}

impl std::fmt::Debug for RefTreeDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("RefTreeDatabase");
        if let Ok(state) = self.read_state() {
            dbg.field("refs", &state.refs.len())
                .field("version", &state.version);
        }
        dbg.field("policy", &self.inner.policy).finish()
    }
}

/// Look up `name` in `refs` and resolve it.
pub(crate) fn lookup(refs: &BTreeMap<String, Ref>, name: &str) -> Result<Option<Ref>> {
    refs.get(name).map(|stored| resolve(refs, stored)).transpose()
}

/// Rebuild a stored ref with its symbolic targets filled in from `refs`.
///
/// A target that does not exist resolves to an unborn ref with storage
/// [`Storage::New`] and no id.
pub(crate) fn resolve(refs: &BTreeMap<String, Ref>, stored: &Ref) -> Result<Ref> {
    resolve_at(refs, stored, 0)
}

fn resolve_at(refs: &BTreeMap<String, Ref>, stored: &Ref, depth: usize) -> Result<Ref> {
    let RefTarget::Symbolic(target) = stored.target() else {
        return Ok(stored.clone());
    };
    if depth >= MAX_SYMBOLIC_REF_DEPTH {
        return Err(RefError::SymbolicDepthExceeded {
            name: stored.name().to_string(),
        });
    }
    let resolved = match refs.get(target.name()) {
        Some(next) => resolve_at(refs, next, depth + 1)?,
        None => Ref::unpeeled(Storage::New, target.name(), None),
    };
    Ok(Ref::symbolic(stored.name(), resolved).with_storage(stored.storage()))
}

/// The form a ref takes once committed: storage [`Storage::Packed`], and
/// symbolic targets reduced to a bare name.
pub(crate) fn stored_form(r: &Ref) -> Ref {
    match r.symbolic_target_name() {
        Some(target) => Ref::symbolic(r.name(), Ref::unpeeled(Storage::New, target, None))
            .with_storage(Storage::Packed),
        None => r.clone().with_storage(Storage::Packed),
    }
}
