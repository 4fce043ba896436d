//! Single-ref updates against a batch-committed ref tree.
//!
//! The only atomic write a [`RefDatabase`] offers is a batch commit, so
//! [`RefTreeUpdate`] turns one ref change into a one-command batch and maps
//! the command's outcome back to an [`UpdateResult`]. Concurrency control is
//! left entirely to the batch engine: a commit that lands between `acquire`
//! and the batch's execution shows up as [`UpdateResult::LockFailure`].

use std::fmt;

use reftree_refs::{BatchEngine, Command, Ref, RefDatabase, Storage};
use reftree_store::Resolver;
use reftree_types::ObjectId;
use tracing::debug;

use crate::driver::RefUpdate;
use crate::error::{Result, UpdateError};
use crate::hooks::RefUpdateHooks;
use crate::request::UpdateRequest;
use crate::result::UpdateResult;
use crate::translate::translate;

/// Where a [`RefTreeUpdate`] is in its single-use lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created; `acquire` has not succeeded yet.
    Unacquired,
    /// Holding a resolver, a batch and the ref's prior value.
    Acquired,
    /// Finished. Nothing is held.
    Released,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unacquired => "unacquired",
            Self::Acquired => "acquired",
            Self::Released => "released",
        };
        f.write_str(s)
    }
}

/// Everything one attempt holds between acquire and release.
struct Attempt<B> {
    resolver: Resolver,
    batch: B,
    name: String,
    old_ref: Option<Ref>,
}

enum State<B> {
    Unacquired,
    Acquired(Attempt<B>),
    Released,
}

/// [`RefUpdateHooks`] implemented with one singleton batch per attempt.
pub struct RefTreeUpdate<D: RefDatabase> {
    db: D,
    state: State<D::Batch>,
}

impl<D: RefDatabase> RefTreeUpdate<D> {
    pub fn new(db: D) -> Self {
        Self {
            db,
            state: State::Unacquired,
        }
    }

    /// Open an update of `name`, reading its current value from `db`.
    ///
    /// A ref that does not exist yet is represented by an unborn ref with
    /// storage [`Storage::New`]. With `detach`, a symbolic ref is replaced by
    /// a direct ref rather than updating the ref it points at.
    pub fn for_name(db: D, name: &str, detach: bool) -> Result<RefUpdate<Self>> {
        let request = match db.exact_ref(name)? {
            None => UpdateRequest::new(Ref::unpeeled(Storage::New, name, None)),
            Some(r) if detach && r.is_symbolic() => {
                UpdateRequest::detaching(Ref::unpeeled(Storage::Loose, name, r.object_id()))
            }
            Some(r) => UpdateRequest::new(r),
        };
        Ok(RefUpdate::new(Self::new(db), request))
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.state {
            State::Unacquired => Lifecycle::Unacquired,
            State::Acquired(_) => Lifecycle::Acquired,
            State::Released => Lifecycle::Released,
        }
    }

    fn attempt(&mut self, operation: &'static str) -> Result<&mut Attempt<D::Batch>> {
        let state = self.lifecycle();
        match &mut self.state {
            State::Acquired(attempt) => Ok(attempt),
            _ => Err(UpdateError::InvalidState { state, operation }),
        }
    }

    fn open(&self, name: String) -> Result<Attempt<D::Batch>> {
        let mut resolver = self.db.new_resolver();
        let mut batch = self.db.new_batch()?;
        batch.initialize(&mut resolver)?;
        let old_ref = batch.lookup(&mut resolver, &name)?;
        Ok(Attempt {
            resolver,
            batch,
            name,
            old_ref,
        })
    }
}

impl<B: BatchEngine> Attempt<B> {
    /// The direct ref this attempt would write for `id`, peeled.
    fn direct_ref(&mut self, id: ObjectId) -> Result<Ref> {
        let obj = self.resolver.parse(&id).map_err(UpdateError::from_resolve)?;
        if obj.is_tag() {
            let peeled = self.resolver.peel(&obj).map_err(UpdateError::from_resolve)?;
            return Ok(Ref::peeled_tag(
                Storage::Loose,
                self.name.clone(),
                id,
                peeled.id(),
            ));
        }
        Ok(Ref::peeled_non_tag(Storage::Loose, self.name.clone(), id))
    }

    fn run(
        &mut self,
        request: &UpdateRequest,
        new_ref: Option<Ref>,
        desired: UpdateResult,
    ) -> Result<UpdateResult> {
        let mut commands = [Command::new(
            self.name.clone(),
            self.old_ref.clone(),
            new_ref,
        )];
        self.batch.set_log_identity(request.ref_log_ident().cloned());
        self.batch.set_log_message(
            request.ref_log_message().map(str::to_owned),
            request.is_ref_log_including_result(),
        );
        self.batch.execute(&mut self.resolver, &mut commands)?;

        let [command] = &commands;
        let result = translate(command.result(), desired);
        debug!(
            name = %self.name,
            outcome = %command.result(),
            %desired,
            %result,
            "single-ref batch executed"
        );
        Ok(result)
    }
}

/// Result a link reports on success: [`UpdateResult::New`] when the ref did
/// not exist before, [`UpdateResult::Forced`] when it is being redirected.
fn link_result(prior: &Ref) -> UpdateResult {
    match prior.storage() {
        Storage::New => UpdateResult::New,
        Storage::Loose | Storage::Packed => UpdateResult::Forced,
    }
}

impl<D: RefDatabase> RefUpdateHooks for RefTreeUpdate<D> {
    fn acquire(&mut self, request: &mut UpdateRequest, deref: bool) -> Result<bool> {
        if !matches!(self.state, State::Unacquired) {
            return Err(UpdateError::InvalidState {
                state: self.lifecycle(),
                operation: "acquire",
            });
        }
        let name = if deref {
            request.prior().leaf().name()
        } else {
            request.name()
        };
        let attempt = self.open(name.to_string())?;

        match &attempt.old_ref {
            Some(old) if old.object_id().is_some() => request.set_old_object_id(old.object_id()),
            None if request.expected_old_object_id().is_some() => {
                request.set_old_object_id(Some(ObjectId::zero()))
            }
            _ => {}
        }
        debug!(
            name = %attempt.name,
            old = ?request.old_object_id(),
            "acquired ref"
        );
        self.state = State::Acquired(attempt);
        Ok(true)
    }

    fn release(&mut self) {
        match std::mem::replace(&mut self.state, State::Released) {
            State::Acquired(mut attempt) => {
                attempt.resolver.close();
                debug!(name = %attempt.name, "released ref");
            }
            // Nothing was acquired, so there is nothing to end.
            State::Unacquired => self.state = State::Unacquired,
            State::Released => {}
        }
    }

    fn apply_update(
        &mut self,
        request: &UpdateRequest,
        desired: UpdateResult,
    ) -> Result<UpdateResult> {
        let attempt = self.attempt("apply_update")?;
        let id = request
            .new_object_id()
            .ok_or_else(|| UpdateError::MissingNewObjectId {
                name: attempt.name.clone(),
            })?;
        let new_ref = attempt.direct_ref(id)?;
        attempt.run(request, Some(new_ref), desired)
    }

    fn apply_delete(
        &mut self,
        request: &UpdateRequest,
        desired: UpdateResult,
    ) -> Result<UpdateResult> {
        self.attempt("apply_delete")?.run(request, None, desired)
    }

    fn apply_link(&mut self, request: &UpdateRequest, target: &str) -> Result<UpdateResult> {
        let attempt = self.attempt("apply_link")?;
        let new_ref = Ref::symbolic(
            attempt.name.clone(),
            Ref::unpeeled(Storage::New, target, None),
        );
        attempt.run(request, Some(new_ref), link_result(request.prior()))
    }

    fn exact_ref(&self, name: &str) -> Result<Option<Ref>> {
        Ok(self.db.exact_ref(name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use reftree_refs::{BatchPolicy, RefTreeDatabase, HEAD};
    use reftree_store::{ObjectKind, StoreError};

    fn unborn(name: &str) -> UpdateRequest {
        UpdateRequest::new(Ref::unpeeled(Storage::New, name, None))
    }

    fn existing(fx: &Fixture, name: &str) -> UpdateRequest {
        UpdateRequest::new(fx.db.exact_ref(name).unwrap().unwrap())
    }

    fn adapter(fx: &Fixture) -> RefTreeUpdate<RefTreeDatabase> {
        RefTreeUpdate::new(fx.db.clone())
    }

    #[test]
    fn create_absent_ref_reports_new() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let mut req = unborn("refs/heads/a");
        req.set_new_object_id(Some(c1));

        let mut up = adapter(&fx);
        assert!(up.acquire(&mut req, true).unwrap());
        assert_eq!(req.old_object_id(), None);
        assert_eq!(
            up.apply_update(&req, UpdateResult::New).unwrap(),
            UpdateResult::New
        );
        up.release();

        assert_eq!(fx.id_of("refs/heads/a"), Some(c1));
        assert_eq!(up.lifecycle(), Lifecycle::Released);
    }

    #[test]
    fn update_with_matching_expected_reports_desired() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let c2 = fx.commit(vec![c1], "c2");
        fx.set("refs/heads/a", c1);

        let mut req = existing(&fx, "refs/heads/a");
        req.set_expected_old_object_id(Some(c1));
        req.set_new_object_id(Some(c2));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        assert_eq!(req.old_object_id(), Some(c1));
        assert_eq!(
            up.apply_update(&req, UpdateResult::FastForward).unwrap(),
            UpdateResult::FastForward
        );
        up.release();
        assert_eq!(fx.id_of("refs/heads/a"), Some(c2));
    }

    #[test]
    fn concurrent_commit_is_lock_failure() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let c2 = fx.commit(vec![c1], "c2");
        let c3 = fx.commit(vec![c1], "c3");
        fx.set("refs/heads/a", c1);

        let mut first_req = existing(&fx, "refs/heads/a");
        first_req.set_new_object_id(Some(c2));
        let mut second_req = existing(&fx, "refs/heads/a");
        second_req.set_new_object_id(Some(c3));

        let mut first = adapter(&fx);
        let mut second = adapter(&fx);
        first.acquire(&mut first_req, true).unwrap();
        second.acquire(&mut second_req, true).unwrap();

        assert_eq!(
            first.apply_update(&first_req, UpdateResult::FastForward).unwrap(),
            UpdateResult::FastForward
        );
        assert_eq!(
            second.apply_update(&second_req, UpdateResult::Forced).unwrap(),
            UpdateResult::LockFailure
        );
        first.release();
        second.release();
        assert_eq!(fx.id_of("refs/heads/a"), Some(c2));
    }

    #[test]
    fn absent_ref_delete_does_not_disturb_other_attempts() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let mut req = unborn("refs/heads/a");
        req.set_new_object_id(Some(c1));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();

        let mut gone = RefTreeUpdate::for_name(fx.db.clone(), "refs/heads/ghost", false).unwrap();
        gone.set_ref_log_message("delete", false);
        let mut rw = fx.db.new_resolver();
        assert_eq!(gone.delete(&mut rw).unwrap(), UpdateResult::NoChange);
        assert_eq!(fx.db.version().unwrap(), 0);
        assert!(fx.db.log_entries().unwrap().is_empty());

        assert_eq!(
            up.apply_update(&req, UpdateResult::New).unwrap(),
            UpdateResult::New
        );
        up.release();
        assert_eq!(fx.id_of("refs/heads/a"), Some(c1));
    }

    #[test]
    fn concurrent_commit_on_unrelated_ref_is_lock_failure() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let mut req = unborn("refs/heads/a");
        req.set_new_object_id(Some(c1));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        fx.set("refs/heads/b", c1);
        assert_eq!(
            up.apply_update(&req, UpdateResult::New).unwrap(),
            UpdateResult::LockFailure
        );
        assert_eq!(fx.id_of("refs/heads/a"), None);
    }

    #[test]
    fn delete_denied_by_policy_is_rejected() {
        let fx = Fixture::with_policy(BatchPolicy::strict());
        let c1 = fx.commit(vec![], "c1");
        fx.set("refs/heads/a", c1);

        let mut req = existing(&fx, "refs/heads/a");
        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        assert_eq!(
            up.apply_delete(&req, UpdateResult::Forced).unwrap(),
            UpdateResult::Rejected
        );
        up.release();
        assert_eq!(fx.id_of("refs/heads/a"), Some(c1));
    }

    #[test]
    fn delete_existing_ref() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        fx.set("refs/heads/a", c1);

        let mut req = existing(&fx, "refs/heads/a");
        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        assert_eq!(
            up.apply_delete(&req, UpdateResult::Forced).unwrap(),
            UpdateResult::Forced
        );
        assert!(fx.db.exact_ref("refs/heads/a").unwrap().is_none());
    }

    #[test]
    fn link_absent_ref_reports_new() {
        let fx = Fixture::new();
        let mut req = unborn("refs/heads/HEAD");
        let mut up = adapter(&fx);
        up.acquire(&mut req, false).unwrap();
        assert_eq!(
            up.apply_link(&req, "refs/heads/main").unwrap(),
            UpdateResult::New
        );
        up.release();

        let linked = fx.db.exact_ref("refs/heads/HEAD").unwrap().unwrap();
        assert_eq!(linked.symbolic_target_name(), Some("refs/heads/main"));
        assert_eq!(linked.object_id(), None);
    }

    #[test]
    fn link_existing_ref_reports_forced() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        fx.set("refs/heads/main", c1);
        fx.link(HEAD, "refs/heads/other");

        let mut req = existing(&fx, HEAD);
        let mut up = adapter(&fx);
        up.acquire(&mut req, false).unwrap();
        assert_eq!(
            up.apply_link(&req, "refs/heads/main").unwrap(),
            UpdateResult::Forced
        );
        let head = fx.db.exact_ref(HEAD).unwrap().unwrap();
        assert_eq!(head.symbolic_target_name(), Some("refs/heads/main"));
        assert_eq!(head.object_id(), Some(c1));
    }

    #[test]
    fn link_result_follows_prior_storage_only() {
        let target = Ref::unpeeled(Storage::New, "refs/heads/nowhere", None);
        assert_eq!(
            link_result(&Ref::unpeeled(Storage::New, HEAD, None)),
            UpdateResult::New
        );
        assert_eq!(
            link_result(&Ref::symbolic(HEAD, target.clone()).with_storage(Storage::New)),
            UpdateResult::New
        );
        assert_eq!(
            link_result(&Ref::symbolic(HEAD, target).with_storage(Storage::Packed)),
            UpdateResult::Forced
        );
        assert_eq!(
            link_result(&Ref::unpeeled(Storage::Loose, HEAD, Some(ObjectId::zero()))),
            UpdateResult::Forced
        );
    }

    #[test]
    fn missing_new_object_fails_before_batch() {
        let fx = Fixture::new();
        let ghost = ObjectId::from_hash([0xee; 32]);
        let mut req = unborn("refs/heads/a");
        req.set_new_object_id(Some(ghost));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        let err = up.apply_update(&req, UpdateResult::New).unwrap_err();
        assert!(matches!(err, UpdateError::MissingObject(id) if id == ghost));
        up.release();
        assert_eq!(fx.db.version().unwrap(), 0);
    }

    #[test]
    fn update_without_new_id_is_an_error() {
        let fx = Fixture::new();
        let mut req = unborn("refs/heads/a");
        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        assert!(matches!(
            up.apply_update(&req, UpdateResult::New),
            Err(UpdateError::MissingNewObjectId { .. })
        ));
    }

    #[test]
    fn absent_ref_with_expected_old_observes_zero() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let mut req = unborn("refs/heads/a");
        req.set_expected_old_object_id(Some(c1));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        assert_eq!(req.old_object_id(), Some(ObjectId::zero()));
    }

    #[test]
    fn absent_ref_without_expected_old_observes_nothing() {
        let fx = Fixture::new();
        let mut req = unborn("refs/heads/a");
        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        assert_eq!(req.old_object_id(), None);
    }

    #[test]
    fn annotated_tag_is_stored_peeled() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let t1 = fx.tag(c1, ObjectKind::Commit, "v1");
        let mut req = unborn("refs/tags/v1");
        req.set_new_object_id(Some(t1));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        up.apply_update(&req, UpdateResult::New).unwrap();

        let tag = fx.db.exact_ref("refs/tags/v1").unwrap().unwrap();
        assert_eq!(tag.object_id(), Some(t1));
        assert_eq!(tag.peeled_object_id(), Some(c1));
        assert_ne!(tag.peeled_object_id(), tag.object_id());
    }

    #[test]
    fn nested_tag_peels_to_commit() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let inner = fx.tag(c1, ObjectKind::Commit, "inner");
        let outer = fx.tag(inner, ObjectKind::Tag, "outer");
        let mut req = unborn("refs/tags/outer");
        req.set_new_object_id(Some(outer));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        up.apply_update(&req, UpdateResult::New).unwrap();
        let tag = fx.db.exact_ref("refs/tags/outer").unwrap().unwrap();
        assert_eq!(tag.peeled_object_id(), Some(c1));
    }

    #[test]
    fn commit_is_stored_peeled_non_tag() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let mut req = unborn("refs/heads/a");
        req.set_new_object_id(Some(c1));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        up.apply_update(&req, UpdateResult::New).unwrap();

        let a = fx.db.exact_ref("refs/heads/a").unwrap().unwrap();
        assert!(a.is_peeled());
        assert_eq!(a.peeled_object_id(), None);
    }

    #[test]
    fn deref_updates_symbolic_target() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let c2 = fx.commit(vec![c1], "c2");
        fx.set("refs/heads/main", c1);
        fx.link(HEAD, "refs/heads/main");

        let mut req = existing(&fx, HEAD);
        req.set_new_object_id(Some(c2));
        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        assert_eq!(req.old_object_id(), Some(c1));
        up.apply_update(&req, UpdateResult::FastForward).unwrap();

        let head = fx.db.exact_ref(HEAD).unwrap().unwrap();
        assert_eq!(head.symbolic_target_name(), Some("refs/heads/main"));
        assert_eq!(fx.id_of("refs/heads/main"), Some(c2));
    }

    #[test]
    fn ref_log_settings_reach_the_batch() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let mut req = unborn("refs/heads/a");
        req.set_new_object_id(Some(c1));
        req.set_ref_log_ident(Some(Fixture::ident()));
        req.set_ref_log_message(Some("branch: Created from c1".into()), true);

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        up.apply_update(&req, UpdateResult::New).unwrap();

        let log = fx.db.log_entries().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].ref_name, "refs/heads/a");
        assert_eq!(log[0].new_id, Some(c1));
        assert_eq!(log[0].who, Some(Fixture::ident()));
        assert_eq!(log[0].message, "branch: Created from c1: created");
    }

    #[test]
    fn release_without_acquire_is_harmless() {
        let fx = Fixture::new();
        let mut up = adapter(&fx);
        up.release();
        up.release();
        assert_eq!(up.lifecycle(), Lifecycle::Unacquired);

        let c1 = fx.commit(vec![], "c1");
        let mut req = unborn("refs/heads/a");
        req.set_new_object_id(Some(c1));
        assert!(up.acquire(&mut req, true).unwrap());
        assert_eq!(
            up.apply_update(&req, UpdateResult::New).unwrap(),
            UpdateResult::New
        );
    }

    #[test]
    fn release_is_idempotent_and_ends_the_attempt() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let mut req = unborn("refs/heads/a");
        req.set_new_object_id(Some(c1));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        assert_eq!(up.lifecycle(), Lifecycle::Acquired);
        up.release();
        up.release();
        assert_eq!(up.lifecycle(), Lifecycle::Released);

        let err = up.apply_update(&req, UpdateResult::New).unwrap_err();
        assert!(matches!(
            err,
            UpdateError::InvalidState {
                state: Lifecycle::Released,
                operation: "apply_update"
            }
        ));
        assert!(up.acquire(&mut req, true).is_err());
    }

    #[test]
    fn operations_before_acquire_are_rejected() {
        let fx = Fixture::new();
        let req = unborn("refs/heads/a");
        let mut up = adapter(&fx);
        for err in [
            up.apply_delete(&req, UpdateResult::Forced).unwrap_err(),
            up.apply_link(&req, "refs/heads/main").unwrap_err(),
        ] {
            assert!(matches!(
                err,
                UpdateError::InvalidState {
                    state: Lifecycle::Unacquired,
                    ..
                }
            ));
        }
    }

    #[test]
    fn second_acquire_is_rejected_and_keeps_the_attempt() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        let mut req = unborn("refs/heads/a");
        req.set_new_object_id(Some(c1));

        let mut up = adapter(&fx);
        up.acquire(&mut req, true).unwrap();
        assert!(matches!(
            up.acquire(&mut req, true),
            Err(UpdateError::InvalidState {
                state: Lifecycle::Acquired,
                operation: "acquire"
            })
        ));
        assert_eq!(
            up.apply_update(&req, UpdateResult::New).unwrap(),
            UpdateResult::New
        );
    }

    #[test]
    fn for_name_reads_prior_value() {
        let fx = Fixture::new();
        let c1 = fx.commit(vec![], "c1");
        fx.set("refs/heads/main", c1);
        fx.link(HEAD, "refs/heads/main");

        let absent = RefTreeUpdate::for_name(fx.db.clone(), "refs/heads/x", false).unwrap();
        assert_eq!(absent.request().prior().storage(), Storage::New);

        let head = RefTreeUpdate::for_name(fx.db.clone(), HEAD, false).unwrap();
        assert!(head.request().prior().is_symbolic());
        assert!(!head.request().is_detaching());

        let detached = RefTreeUpdate::for_name(fx.db.clone(), HEAD, true).unwrap();
        assert!(!detached.request().prior().is_symbolic());
        assert_eq!(detached.request().prior().object_id(), Some(c1));
        assert!(detached.request().is_detaching());
    }

    #[test]
    fn closed_resolver_error_is_not_missing_object() {
        let err = UpdateError::from_resolve(StoreError::Closed);
        assert!(matches!(err, UpdateError::Store(StoreError::Closed)));
        let id = ObjectId::from_hash([1; 32]);
        let err = UpdateError::from_resolve(StoreError::MissingObject(id));
        assert!(matches!(err, UpdateError::MissingObject(got) if got == id));
    }
}
