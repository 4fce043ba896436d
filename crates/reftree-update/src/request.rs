//! What a single-ref update asks for, as seen by its hooks.

use reftree_refs::Ref;
use reftree_types::{ObjectId, PersonIdent};

/// The state of one single-ref update request.
///
/// The [`RefUpdate`](crate::RefUpdate) driver owns the request and lends it
/// to its hooks: mutably during acquire, so the hooks can record the value
/// they observed, and read-only while applying the change.
#[derive(Clone, Debug)]
pub struct UpdateRequest {
    prior: Ref,
    detaching: bool,
    new_id: Option<ObjectId>,
    expected_old_id: Option<ObjectId>,
    old_id: Option<ObjectId>,
    ref_log_ident: Option<PersonIdent>,
    ref_log_message: Option<String>,
    include_result: bool,
}

impl UpdateRequest {
    /// A request to change `prior`, the ref's value when the update was
    /// opened. A ref that did not exist is passed with storage
    /// [`Storage::New`](reftree_refs::Storage::New).
    pub fn new(prior: Ref) -> Self {
        Self {
            prior,
            detaching: false,
            new_id: None,
            expected_old_id: None,
            old_id: None,
            ref_log_ident: None,
            ref_log_message: None,
            include_result: false,
        }
    }

    /// A request that replaces the symbolic ref `prior` with a direct ref
    /// instead of changing what it points at.
    pub(crate) fn detaching(prior: Ref) -> Self {
        Self {
            detaching: true,
            ..Self::new(prior)
        }
    }

    /// Name of the ref being changed.
    pub fn name(&self) -> &str {
        self.prior.name()
    }

    pub fn prior(&self) -> &Ref {
        &self.prior
    }

    /// Returns `true` if a symbolic ref is being replaced by a direct one.
    pub fn is_detaching(&self) -> bool {
        self.detaching
    }

    /// Id the ref should point at after the update.
    pub fn new_object_id(&self) -> Option<ObjectId> {
        self.new_id
    }

    pub fn set_new_object_id(&mut self, id: Option<ObjectId>) {
        self.new_id = id;
    }

    /// Id the caller expects the ref to hold. `None` accepts any value.
    pub fn expected_old_object_id(&self) -> Option<ObjectId> {
        self.expected_old_id
    }

    pub fn set_expected_old_object_id(&mut self, id: Option<ObjectId>) {
        self.expected_old_id = id;
    }

    /// Id observed when the ref was acquired.
    pub fn old_object_id(&self) -> Option<ObjectId> {
        self.old_id
    }

    pub fn set_old_object_id(&mut self, id: Option<ObjectId>) {
        self.old_id = id;
    }

    pub fn ref_log_ident(&self) -> Option<&PersonIdent> {
        self.ref_log_ident.as_ref()
    }

    pub fn set_ref_log_ident(&mut self, ident: Option<PersonIdent>) {
        self.ref_log_ident = ident;
    }

    /// Ref-log message. `None` writes no ref-log entry.
    pub fn ref_log_message(&self) -> Option<&str> {
        self.ref_log_message.as_deref()
    }

    /// Returns `true` if the outcome is appended to the ref-log message.
    pub fn is_ref_log_including_result(&self) -> bool {
        self.include_result
    }

    pub fn set_ref_log_message(&mut self, message: Option<String>, include_result: bool) {
        self.ref_log_message = message;
        self.include_result = include_result;
    }
}
