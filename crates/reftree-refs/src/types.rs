//! Core reference types.
//!
//! A [`Ref`] is a name plus a target. The target is either an object id
//! (direct) or another ref (symbolic); exactly one form is populated, which
//! [`RefTarget`] makes impossible to get wrong.

use reftree_types::ObjectId;
use serde::{Deserialize, Serialize};

/// Prefix of every name stored in the ref tree other than `HEAD`.
pub const R_REFS: &str = "refs/";
/// Prefix of branch names.
pub const R_HEADS: &str = "refs/heads/";
/// Prefix of tag names.
pub const R_TAGS: &str = "refs/tags/";
/// The symbolic ref naming the current branch.
pub const HEAD: &str = "HEAD";

/// Where a ref's value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Storage {
    /// The ref does not exist yet; it is only being proposed.
    New,
    /// The ref is written directly as its own record.
    Loose,
    /// The ref was read back from the committed ref tree.
    Packed,
}

/// How much is known about what a direct ref's object peels to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Peel {
    /// Not yet examined.
    Unpeeled,
    /// Examined: the object is not an annotated tag.
    NonTag,
    /// Examined: the object is an annotated tag peeling to this id.
    Tag(ObjectId),
}

/// What a ref points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefTarget {
    /// An object id. `None` only for not-yet-existing targets of a
    /// symbolic ref.
    Direct { id: Option<ObjectId>, peel: Peel },
    /// Another ref.
    Symbolic(Box<Ref>),
}

/// A named reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    name: String,
    storage: Storage,
    target: RefTarget,
}

impl Ref {
    /// A direct ref whose peel status is unknown.
    pub fn unpeeled(storage: Storage, name: impl Into<String>, id: Option<ObjectId>) -> Self {
        Self {
            name: name.into(),
            storage,
            target: RefTarget::Direct {
                id,
                peel: Peel::Unpeeled,
            },
        }
    }

    /// A direct ref known not to point at an annotated tag.
    pub fn peeled_non_tag(storage: Storage, name: impl Into<String>, id: ObjectId) -> Self {
        Self {
            name: name.into(),
            storage,
            target: RefTarget::Direct {
                id: Some(id),
                peel: Peel::NonTag,
            },
        }
    }

    /// A direct ref pointing at annotated tag `id`, which peels to `peeled`.
    pub fn peeled_tag(
        storage: Storage,
        name: impl Into<String>,
        id: ObjectId,
        peeled: ObjectId,
    ) -> Self {
        Self {
            name: name.into(),
            storage,
            target: RefTarget::Direct {
                id: Some(id),
                peel: Peel::Tag(peeled),
            },
        }
    }

    /// A symbolic ref named `name` pointing at `target`.
    pub fn symbolic(name: impl Into<String>, target: Ref) -> Self {
        Self {
            name: name.into(),
            storage: Storage::Loose,
            target: RefTarget::Symbolic(Box::new(target)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    pub fn target(&self) -> &RefTarget {
        &self.target
    }

    /// Returns a copy of this ref with a different storage classification.
    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    /// Returns `true` if this ref points at another ref.
    pub fn is_symbolic(&self) -> bool {
        matches!(self.target, RefTarget::Symbolic(_))
    }

    /// Name of the ref this one points at, if symbolic.
    pub fn symbolic_target_name(&self) -> Option<&str> {
        match &self.target {
            RefTarget::Symbolic(t) => Some(t.name()),
            RefTarget::Direct { .. } => None,
        }
    }

    /// Follow symbolic refs to the final direct ref.
    pub fn leaf(&self) -> &Ref {
        let mut current = self;
        while let RefTarget::Symbolic(next) = &current.target {
            current = next;
        }
        current
    }

    /// The object id this ref resolves to, following symbolic refs.
    pub fn object_id(&self) -> Option<ObjectId> {
        match &self.leaf().target {
            RefTarget::Direct { id, .. } => *id,
            RefTarget::Symbolic(_) => None,
        }
    }

    /// The peeled id if the leaf is a peeled annotated tag.
    pub fn peeled_object_id(&self) -> Option<ObjectId> {
        match &self.leaf().target {
            RefTarget::Direct {
                peel: Peel::Tag(peeled),
                ..
            } => Some(*peeled),
            _ => None,
        }
    }

    /// Returns `true` once the leaf's peel status has been determined.
    pub fn is_peeled(&self) -> bool {
        !matches!(
            self.leaf().target,
            RefTarget::Direct {
                peel: Peel::Unpeeled,
                ..
            }
        )
    }

    /// Returns `true` if `other` holds the same value: the same target name
    /// for symbolic refs, the same object id for direct refs. Names, storage
    /// and peel state are ignored.
    pub fn same_value(&self, other: &Ref) -> bool {
        match (&self.target, &other.target) {
            (RefTarget::Symbolic(a), RefTarget::Symbolic(b)) => a.name == b.name,
            (RefTarget::Direct { id: a, .. }, RefTarget::Direct { id: b, .. }) => {
                ObjectId::same_target(a.as_ref(), b.as_ref())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_hash([byte; 32])
    }

    #[test]
    fn direct_ref_accessors() {
        let r = Ref::peeled_non_tag(Storage::Loose, "refs/heads/main", oid(1));
        assert_eq!(r.name(), "refs/heads/main");
        assert_eq!(r.object_id(), Some(oid(1)));
        assert!(r.is_peeled());
        assert!(r.peeled_object_id().is_none());
        assert!(!r.is_symbolic());
    }

    #[test]
    fn peeled_tag_carries_both_ids() {
        let r = Ref::peeled_tag(Storage::Loose, "refs/tags/v1", oid(2), oid(3));
        assert_eq!(r.object_id(), Some(oid(2)));
        assert_eq!(r.peeled_object_id(), Some(oid(3)));
    }

    #[test]
    fn symbolic_ref_resolves_through_leaf() {
        let main = Ref::peeled_non_tag(Storage::Packed, "refs/heads/main", oid(4));
        let head = Ref::symbolic(HEAD, main);
        assert!(head.is_symbolic());
        assert_eq!(head.symbolic_target_name(), Some("refs/heads/main"));
        assert_eq!(head.leaf().name(), "refs/heads/main");
        assert_eq!(head.object_id(), Some(oid(4)));
    }

    #[test]
    fn unborn_symbolic_target_has_no_id() {
        let head = Ref::symbolic(HEAD, Ref::unpeeled(Storage::New, "refs/heads/main", None));
        assert_eq!(head.object_id(), None);
        assert!(!head.is_peeled());
    }

    #[test]
    fn same_value_compares_targets_only() {
        let a = Ref::peeled_non_tag(Storage::Loose, "refs/heads/a", oid(1));
        let b = Ref::unpeeled(Storage::Packed, "refs/heads/a", Some(oid(1)));
        let c = Ref::peeled_non_tag(Storage::Loose, "refs/heads/a", oid(2));
        assert!(a.same_value(&b));
        assert!(!a.same_value(&c));

        let s1 = Ref::symbolic(HEAD, Ref::unpeeled(Storage::New, "refs/heads/a", None));
        let s2 = Ref::symbolic(HEAD, b);
        assert!(s1.same_value(&s2));
        assert!(!s1.same_value(&a));
    }
}
