//! Shared fixtures for this crate's tests.

use std::sync::Arc;

use reftree_refs::{
    BatchEngine, BatchPolicy, Command, CommandResult, RefDatabase, Ref, RefTreeDatabase, Storage,
};
use reftree_store::{Commit, InMemoryObjectStore, ObjectKind, ObjectStore, Tag, Tree};
use reftree_types::{ObjectId, PersonIdent};

pub(crate) struct Fixture {
    pub(crate) objects: Arc<InMemoryObjectStore>,
    pub(crate) db: RefTreeDatabase,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with_policy(BatchPolicy::default())
    }

    pub(crate) fn with_policy(policy: BatchPolicy) -> Self {
        let objects = Arc::new(InMemoryObjectStore::new());
        let db = RefTreeDatabase::with_policy(objects.clone(), policy);
        Self { objects, db }
    }

    pub(crate) fn ident() -> PersonIdent {
        PersonIdent::at_epoch_secs("A U Thor", "author@example.com", 1_250_379_778).unwrap()
    }

    pub(crate) fn commit(&self, parents: Vec<ObjectId>, message: &str) -> ObjectId {
        let tree = self
            .objects
            .write(&Tree::empty().to_stored_object().unwrap())
            .unwrap();
        let commit = Commit {
            tree,
            parents,
            author: Self::ident(),
            message: message.into(),
        };
        self.objects
            .write(&commit.to_stored_object().unwrap())
            .unwrap()
    }

    /// Write an annotated tag named `name` pointing at `object` of `kind`.
    pub(crate) fn tag(&self, object: ObjectId, kind: ObjectKind, name: &str) -> ObjectId {
        let tag = Tag {
            object,
            object_kind: kind,
            name: name.into(),
            tagger: Some(Self::ident()),
            message: format!("release {name}"),
        };
        self.objects.write(&tag.to_stored_object().unwrap()).unwrap()
    }

    /// Write `new` over whatever `name` currently holds, bypassing the
    /// single-ref update path.
    pub(crate) fn put(&self, name: &str, new: Ref) {
        let mut rw = self.db.new_resolver();
        let mut batch = self.db.new_batch().unwrap();
        batch.initialize(&mut rw).unwrap();
        let old = batch.lookup(&mut rw, name).unwrap();
        let mut cmds = [Command::new(name, old, Some(new))];
        batch.execute(&mut rw, &mut cmds).unwrap();
        assert_eq!(cmds[0].result(), CommandResult::Ok, "{}", name);
    }

    pub(crate) fn set(&self, name: &str, id: ObjectId) {
        self.put(name, Ref::peeled_non_tag(Storage::Loose, name, id));
    }

    pub(crate) fn link(&self, name: &str, target: &str) {
        self.put(
            name,
            Ref::symbolic(name, Ref::unpeeled(Storage::New, target, None)),
        );
    }

    pub(crate) fn id_of(&self, name: &str) -> Option<ObjectId> {
        self.db.exact_ref(name).unwrap().and_then(|r| r.object_id())
    }
}
