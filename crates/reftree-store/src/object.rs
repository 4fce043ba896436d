use reftree_types::{ObjectId, PersonIdent};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Raw content (file contents, arbitrary data).
    Blob,
    /// Directory listing: ordered entries mapping names to object ids.
    Tree,
    /// A snapshot of a tree plus its parent commits.
    Commit,
    /// Annotated tag wrapping another object.
    Tag,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Tree => write!(f, "tree"),
            Self::Commit => write!(f, "commit"),
            Self::Tag => write!(f, "tag"),
        }
    }
}

// ---------------------------------------------------------------------------
// ContentHasher
// ---------------------------------------------------------------------------

/// Domain-separated BLAKE3 content hasher.
///
/// The domain tag is prepended to every hash computation so a blob and a
/// commit with identical bytes never share an id.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    pub const BLOB: Self = Self::new("reftree-blob-v1");
    pub const TREE: Self = Self::new("reftree-tree-v1");
    pub const COMMIT: Self = Self::new("reftree-commit-v1");
    pub const TAG: Self = Self::new("reftree-tag-v1");

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// The hasher used for objects of `kind`.
    pub fn for_kind(kind: ObjectKind) -> &'static Self {
        match kind {
            ObjectKind::Blob => &Self::BLOB,
            ObjectKind::Tree => &Self::TREE,
            ObjectKind::Commit => &Self::COMMIT,
            ObjectKind::Tag => &Self::TAG,
        }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> ObjectId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ObjectId::from_hash(*hasher.finalize().as_bytes())
    }
}

// ---------------------------------------------------------------------------
// StoredObject
// ---------------------------------------------------------------------------

/// A stored object: kind tag + serialized data + cached size.
///
/// `StoredObject` is the unit of storage. The store never interprets the
/// contents of the data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// The type of this object.
    pub kind: ObjectKind,
    /// The serialized bytes of the object.
    pub data: Vec<u8>,
    /// The size of `data` in bytes.
    pub size: u64,
}

impl StoredObject {
    /// Create a new stored object from kind and data.
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        let size = data.len() as u64;
        Self { kind, data, size }
    }

    /// Compute the content-addressed ID for this object.
    pub fn compute_id(&self) -> ObjectId {
        ContentHasher::for_kind(self.kind).hash(&self.data)
    }

    fn encode<T: Serialize>(kind: ObjectKind, value: &T) -> StoreResult<Self> {
        let data =
            serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self::new(kind, data))
    }

    fn decode<T: DeserializeOwned>(&self, expected: ObjectKind) -> StoreResult<T> {
        if self.kind != expected {
            return Err(StoreError::CorruptObject {
                id: self.compute_id(),
                reason: format!("expected {expected}, got {}", self.kind),
            });
        }
        serde_json::from_slice(&self.data).map_err(|e| StoreError::CorruptObject {
            id: self.compute_id(),
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Raw content object (analogous to git blob).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Blobs are stored verbatim, without an encoding envelope.
    pub fn to_stored_object(&self) -> StoredObject {
        StoredObject::new(ObjectKind::Blob, self.data.clone())
    }

    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        if obj.kind != ObjectKind::Blob {
            return Err(StoreError::CorruptObject {
                id: obj.compute_id(),
                reason: format!("expected blob, got {}", obj.kind),
            });
        }
        Ok(Self {
            data: obj.data.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// File mode for a tree entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryMode {
    Regular,
    Executable,
    Symlink,
    Directory,
}

/// A single entry in a tree object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub object_id: ObjectId,
}

impl TreeEntry {
    pub fn new(mode: EntryMode, name: impl Into<String>, object_id: ObjectId) -> Self {
        Self {
            mode,
            name: name.into(),
            object_id,
        }
    }
}

/// Directory listing object (analogous to git tree).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Entries sorted by name.
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    /// Create a new tree; entries are sorted by name for deterministic hashing.
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        StoredObject::encode(ObjectKind::Tree, self)
    }

    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        obj.decode(ObjectKind::Tree)
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// A commit: a root tree, zero or more parents, and who made it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub tree: ObjectId,
    pub parents: Vec<ObjectId>,
    pub author: PersonIdent,
    pub message: String,
}

impl Commit {
    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        StoredObject::encode(ObjectKind::Commit, self)
    }

    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        obj.decode(ObjectKind::Commit)
    }
}

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// An annotated tag.
///
/// `object` may itself be another tag; peeling follows the chain until a
/// non-tag object is reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub object: ObjectId,
    pub object_kind: ObjectKind,
    pub name: String,
    pub tagger: Option<PersonIdent>,
    pub message: String,
}

impl Tag {
    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        StoredObject::encode(ObjectKind::Tag, self)
    }

    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        obj.decode(ObjectKind::Tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident() -> PersonIdent {
        PersonIdent::at_epoch_secs("tester", "tester@example.com", 1_000).unwrap()
    }

    #[test]
    fn blob_kind_mismatch() {
        let stored = StoredObject::new(ObjectKind::Tree, b"not a blob".to_vec());
        let err = Blob::from_stored_object(&stored).unwrap_err();
        assert!(matches!(err, StoreError::CorruptObject { .. }));
    }

    #[test]
    fn tree_entries_sorted() {
        let tree = Tree::new(vec![
            TreeEntry::new(EntryMode::Regular, "zebra.txt", ObjectId::zero()),
            TreeEntry::new(EntryMode::Regular, "alpha.txt", ObjectId::zero()),
            TreeEntry::new(EntryMode::Directory, "middle", ObjectId::zero()),
        ]);
        let names: Vec<_> = tree.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["alpha.txt", "middle", "zebra.txt"]);
    }

    #[test]
    fn commit_decodes_parents() {
        let parent = ObjectId::from_bytes(b"parent");
        let commit = Commit {
            tree: ObjectId::from_bytes(b"tree"),
            parents: vec![parent],
            author: ident(),
            message: "second".into(),
        };
        let stored = commit.to_stored_object().unwrap();
        assert_eq!(stored.kind, ObjectKind::Commit);
        let decoded = Commit::from_stored_object(&stored).unwrap();
        assert_eq!(decoded.parents, vec![parent]);
    }

    #[test]
    fn tag_rejects_commit_payload() {
        let commit = Commit {
            tree: ObjectId::from_bytes(b"tree"),
            parents: Vec::new(),
            author: ident(),
            message: "root".into(),
        };
        let stored = commit.to_stored_object().unwrap();
        let err = Tag::from_stored_object(&stored).unwrap_err();
        assert!(matches!(err, StoreError::CorruptObject { .. }));
    }

    #[test]
    fn garbage_payload_is_corrupt() {
        let stored = StoredObject::new(ObjectKind::Tag, b"{not json".to_vec());
        assert!(matches!(
            Tag::from_stored_object(&stored),
            Err(StoreError::CorruptObject { .. })
        ));
    }

    #[test]
    fn different_kinds_produce_different_ids() {
        let data = b"same data".to_vec();
        let blob = StoredObject::new(ObjectKind::Blob, data.clone());
        let tag = StoredObject::new(ObjectKind::Tag, data);
        assert_ne!(blob.compute_id(), tag.compute_id());
    }

    #[test]
    fn object_kind_display() {
        assert_eq!(ObjectKind::Commit.to_string(), "commit");
        assert_eq!(ObjectKind::Tag.to_string(), "tag");
    }
}
