//! Typed, cached object resolution for one ref update attempt.
//!
//! A [`Resolver`] is opened when an attempt acquires its ref and closed when
//! the attempt releases it. Everything it parses is cached for the lifetime
//! of the attempt and dropped on [`Resolver::close`].

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use reftree_types::ObjectId;
use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::object::{Commit, ObjectKind, Tag};
use crate::traits::ObjectStore;

/// What a parsed object is, with just enough structure for ref updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevKind {
    Blob,
    Tree,
    Commit { parents: Vec<ObjectId> },
    Tag { target: ObjectId, name: String },
}

/// A parsed object: its id plus its [`RevKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevObject {
    id: ObjectId,
    kind: RevKind,
}

impl RevObject {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> &RevKind {
        &self.kind
    }

    /// Returns `true` if this is an annotated tag.
    pub fn is_tag(&self) -> bool {
        matches!(self.kind, RevKind::Tag { .. })
    }

    /// Returns `true` if this is a commit.
    pub fn is_commit(&self) -> bool {
        matches!(self.kind, RevKind::Commit { .. })
    }

    pub fn object_kind(&self) -> ObjectKind {
        match self.kind {
            RevKind::Blob => ObjectKind::Blob,
            RevKind::Tree => ObjectKind::Tree,
            RevKind::Commit { .. } => ObjectKind::Commit,
            RevKind::Tag { .. } => ObjectKind::Tag,
        }
    }
}

/// Parses object ids into [`RevObject`]s against an [`ObjectStore`].
pub struct Resolver {
    store: Arc<dyn ObjectStore>,
    cache: HashMap<ObjectId, RevObject>,
    closed: bool,
}

impl Resolver {
    /// Open a resolver over `store`.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            cache: HashMap::new(),
            closed: false,
        }
    }

    /// Parse any object by id.
    ///
    /// Fails with [`StoreError::MissingObject`] if the store has no object
    /// with this id.
    pub fn parse(&mut self, id: &ObjectId) -> StoreResult<RevObject> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        if let Some(obj) = self.cache.get(id) {
            return Ok(obj.clone());
        }

        let stored = self
            .store
            .read(id)?
            .ok_or(StoreError::MissingObject(*id))?;
        let kind = match stored.kind {
            ObjectKind::Blob => RevKind::Blob,
            ObjectKind::Tree => RevKind::Tree,
            ObjectKind::Commit => {
                let commit = Commit::from_stored_object(&stored)?;
                RevKind::Commit {
                    parents: commit.parents,
                }
            }
            ObjectKind::Tag => {
                let tag = Tag::from_stored_object(&stored)?;
                RevKind::Tag {
                    target: tag.object,
                    name: tag.name,
                }
            }
        };
        trace!(id = %id.short_hex(), kind = %stored.kind, "parsed object");

        let obj = RevObject { id: *id, kind };
        self.cache.insert(*id, obj.clone());
        Ok(obj)
    }

    /// Peel an object: follow annotated tags until a non-tag is reached.
    ///
    /// Non-tag objects peel to themselves.
    pub fn peel(&mut self, obj: &RevObject) -> StoreResult<RevObject> {
        let mut current = obj.clone();
        let mut seen = HashSet::new();
        while let RevKind::Tag { target, .. } = current.kind {
            if !seen.insert(current.id) {
                return Err(StoreError::CorruptObject {
                    id: current.id,
                    reason: "tag chain loops back on itself".into(),
                });
            }
            current = self.parse(&target)?;
        }
        Ok(current)
    }

    /// Returns `true` if commit `base` is reachable from commit `tip`
    /// (a commit is merged into itself).
    pub fn is_merged_into(&mut self, base: &ObjectId, tip: &ObjectId) -> StoreResult<bool> {
        for id in [base, tip] {
            let obj = self.parse(id)?;
            if !obj.is_commit() {
                return Err(StoreError::IncorrectObjectType {
                    id: *id,
                    expected: ObjectKind::Commit.to_string(),
                    actual: obj.object_kind().to_string(),
                });
            }
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([*tip]);
        while let Some(current) = queue.pop_front() {
            if current == *base {
                return Ok(true);
            }
            if !visited.insert(current) {
                continue;
            }
            if let RevKind::Commit { parents } = self.parse(&current)?.kind {
                queue.extend(parents);
            }
        }
        Ok(false)
    }

    /// Drop all cached objects. Any later use fails with
    /// [`StoreError::Closed`]. Closing twice is a no-op.
    pub fn close(&mut self) {
        if !self.closed {
            trace!(cached = self.cache.len(), "resolver closed");
        }
        self.cache.clear();
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of objects parsed and cached so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("cached", &self.cache.len())
            .field("closed", &self.closed)
            .finish()
    }
}
