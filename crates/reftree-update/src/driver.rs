//! [`RefUpdate`]: the fixed lifecycle of a single-ref update.
//!
//! The driver validates the request, decides which result a successful
//! write should report, and calls its [`RefUpdateHooks`] in order. Hooks
//! are released on every path, including errors.

use reftree_refs::{validate_link_target, validate_ref_name, Ref, RefTarget, HEAD, R_HEADS, R_TAGS};
use reftree_store::{Resolver, RevObject, StoreError};
use reftree_types::{ObjectId, PersonIdent};
use tracing::debug;

use crate::error::{Result, UpdateError};
use crate::hooks::RefUpdateHooks;
use crate::request::UpdateRequest;
use crate::result::UpdateResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Change {
    Update,
    Delete,
}

/// One update of one ref, driven through a set of [`RefUpdateHooks`].
pub struct RefUpdate<H> {
    hooks: H,
    request: UpdateRequest,
    force: bool,
    result: UpdateResult,
}

impl<H: RefUpdateHooks> RefUpdate<H> {
    pub fn new(hooks: H, request: UpdateRequest) -> Self {
        Self {
            hooks,
            request,
            force: false,
            result: UpdateResult::NotAttempted,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn request(&self) -> &UpdateRequest {
        &self.request
    }

    pub fn name(&self) -> &str {
        self.request.name()
    }

    pub fn set_new_object_id(&mut self, id: ObjectId) {
        self.request.set_new_object_id(Some(id));
    }

    /// Only apply the change if the ref currently holds `id`. The zero id
    /// asks for the ref not to exist.
    pub fn set_expected_old_object_id(&mut self, id: Option<ObjectId>) {
        self.request.set_expected_old_object_id(id);
    }

    /// Id the ref held when the last attempt acquired it.
    pub fn old_object_id(&self) -> Option<ObjectId> {
        self.request.old_object_id()
    }

    /// Skip the fast-forward check.
    pub fn set_force(&mut self, force: bool) {
        self.force = force;
    }

    pub fn set_ref_log_ident(&mut self, ident: Option<PersonIdent>) {
        self.request.set_ref_log_ident(ident);
    }

    /// Set the ref-log message. With `include_result` the outcome is
    /// appended to it.
    pub fn set_ref_log_message(&mut self, message: impl Into<String>, include_result: bool) {
        self.request
            .set_ref_log_message(Some(message.into()), include_result);
    }

    /// Write no ref-log entry for this update.
    pub fn disable_ref_log(&mut self) {
        self.request.set_ref_log_message(None, false);
    }

    /// Outcome of the last completed operation.
    pub fn result(&self) -> UpdateResult {
        self.result
    }

    /// Point the ref at the new object id.
    ///
    /// Without [`set_force`](Self::set_force) an existing ref only moves if
    /// its old commit is an ancestor of the new one, and tags never move.
    pub fn update(&mut self, resolver: &mut Resolver) -> Result<UpdateResult> {
        validate_ref_name(self.name())?;
        let new_id = self
            .request
            .new_object_id()
            .ok_or_else(|| UpdateError::MissingNewObjectId {
                name: self.name().to_string(),
            })?;
        let outcome = self.change(resolver, Change::Update, Some(new_id));
        self.finish(outcome)
    }

    /// Delete the ref. An existing ref is only deleted when forced.
    pub fn delete(&mut self, resolver: &mut Resolver) -> Result<UpdateResult> {
        validate_ref_name(self.name())?;
        let branch = self.target_name().to_string();
        if branch.starts_with(R_HEADS) && self.is_current_branch(&branch)? {
            self.result = UpdateResult::RejectedCurrentBranch;
            return Ok(self.result);
        }
        let outcome = self.change(resolver, Change::Delete, None);
        self.finish(outcome)
    }

    /// Make the ref a symbolic ref pointing at `target`.
    pub fn link(&mut self, target: &str) -> Result<UpdateResult> {
        validate_ref_name(self.name())?;
        validate_link_target(target).map_err(|_| UpdateError::InvalidLinkTarget {
            target: target.to_string(),
        })?;
        let outcome = self.relink(target);
        self.finish(outcome)
    }

    /// Name of the ref that actually changes: the symbolic ref itself when
    /// detaching, otherwise the ref at the end of the chain.
    fn target_name(&self) -> &str {
        if self.request.is_detaching() {
            self.request.name()
        } else {
            self.request.prior().leaf().name()
        }
    }

    fn is_current_branch(&self, branch: &str) -> Result<bool> {
        let Some(head) = self.hooks.exact_ref(HEAD)? else {
            return Ok(false);
        };
        let mut current = &head;
        while let RefTarget::Symbolic(next) = current.target() {
            if next.name() == branch {
                return Ok(true);
            }
            current = next;
        }
        Ok(false)
    }

    fn finish(&mut self, outcome: Result<UpdateResult>) -> Result<UpdateResult> {
        self.hooks.release();
        let result = outcome?;
        self.result = result;
        debug!(name = %self.request.name(), %result, "ref update finished");
        Ok(result)
    }

    fn change(
        &mut self,
        resolver: &mut Resolver,
        change: Change,
        new_id: Option<ObjectId>,
    ) -> Result<UpdateResult> {
        if !self.hooks.acquire(&mut self.request, true)? {
            return Ok(UpdateResult::LockFailure);
        }
        if let Some(expected) = self.request.expected_old_object_id() {
            let observed = self.request.old_object_id().unwrap_or(ObjectId::zero());
            if expected != observed {
                debug!(name = %self.request.name(), %expected, %observed, "old value mismatch");
                return Ok(UpdateResult::RejectedOtherReason);
            }
        }

        let new_obj = match new_id {
            Some(id) => match parse_or_missing(resolver, &id)? {
                Some(obj) => Some(obj),
                None => return Ok(UpdateResult::RejectedMissingObject),
            },
            None => None,
        };

        let Some(old_id) = self.request.old_object_id().filter(|id| !id.is_zero()) else {
            let desired = match change {
                Change::Update => UpdateResult::New,
                Change::Delete => UpdateResult::NoChange,
            };
            return self.apply(change, desired);
        };
        if self.target_name().starts_with(R_TAGS) && !self.force {
            return Ok(UpdateResult::Rejected);
        }
        if new_id == Some(old_id) && !self.request.is_detaching() {
            return Ok(UpdateResult::NoChange);
        }
        if self.force {
            return self.apply(change, UpdateResult::Forced);
        }

        let old_obj = parse_or_missing(resolver, &old_id)?;
        if let (Some(old), Some(new)) = (old_obj, new_obj) {
            if old.is_commit() && new.is_commit() && resolver.is_merged_into(&old.id(), &new.id())? {
                return self.apply(change, UpdateResult::FastForward);
            }
        }
        Ok(UpdateResult::Rejected)
    }

    fn apply(&mut self, change: Change, desired: UpdateResult) -> Result<UpdateResult> {
        match change {
            Change::Update => self.hooks.apply_update(&self.request, desired),
            Change::Delete => self.hooks.apply_delete(&self.request, desired),
        }
    }

    fn relink(&mut self, target: &str) -> Result<UpdateResult> {
        if !self.hooks.acquire(&mut self.request, false)? {
            return Ok(UpdateResult::LockFailure);
        }
        let old = self.hooks.exact_ref(self.request.name())?;
        if old.as_ref().and_then(Ref::symbolic_target_name) == Some(target) {
            return Ok(UpdateResult::NoChange);
        }
        if let Some(id) = old.as_ref().and_then(Ref::object_id) {
            self.request.set_old_object_id(Some(id));
        }
        if let Some(id) = self.hooks.exact_ref(target)?.and_then(|r| r.object_id()) {
            self.request.set_new_object_id(Some(id));
        }
        self.hooks.apply_link(&self.request, target)
    }
}

/// Parse `id`, mapping a missing object to `None`.
fn parse_or_missing(resolver: &mut Resolver, id: &ObjectId) -> Result<Option<RevObject>> {
    match resolver.parse(id) {
        Ok(obj) => Ok(Some(obj)),
        Err(StoreError::MissingObject(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
