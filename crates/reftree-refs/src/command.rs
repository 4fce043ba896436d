//! Commands submitted to a [`BatchEngine`](crate::BatchEngine).

use std::fmt;

use reftree_types::ObjectId;
use serde::{Deserialize, Serialize};

use crate::types::Ref;

/// Outcome of one command after a batch executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandResult {
    /// The batch has not processed this command yet.
    NotAttempted,
    /// Policy forbids creating this ref.
    RejectedNoCreate,
    /// Policy forbids deleting this ref.
    RejectedNoDelete,
    /// The new value does not descend from the old one and policy forbids
    /// rewinds.
    RejectedNonFastForward,
    /// The ref is the currently checked-out branch.
    RejectedCurrentBranch,
    /// The new value names an object the store does not have.
    RejectedMissingObject,
    /// Rejected for any other reason; see the command's message.
    RejectedOtherReason,
    /// The old value no longer matches, or a concurrent batch committed first.
    LockFailure,
    /// Applied.
    Ok,
}

impl CommandResult {
    /// Every variant, in declaration order.
    pub const ALL: [CommandResult; 9] = [
        Self::NotAttempted,
        Self::RejectedNoCreate,
        Self::RejectedNoDelete,
        Self::RejectedNonFastForward,
        Self::RejectedCurrentBranch,
        Self::RejectedMissingObject,
        Self::RejectedOtherReason,
        Self::LockFailure,
        Self::Ok,
    ];
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotAttempted => "not attempted",
            Self::RejectedNoCreate => "rejected: creation prohibited",
            Self::RejectedNoDelete => "rejected: deletion prohibited",
            Self::RejectedNonFastForward => "rejected: non-fast-forward",
            Self::RejectedCurrentBranch => "rejected: current branch",
            Self::RejectedMissingObject => "rejected: missing object",
            Self::RejectedOtherReason => "rejected",
            Self::LockFailure => "lock failure",
            Self::Ok => "ok",
        };
        f.write_str(s)
    }
}

/// The shape of change a command makes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Create,
    Update,
    Delete,
}

/// One ref change: the value the caller last saw and the value it wants.
///
/// `old == None` means the ref is expected not to exist; `new == None`
/// means delete it. With both absent the command asserts the ref is still
/// missing and changes nothing. The batch engine fills in
/// [`Command::result`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    name: String,
    old: Option<Ref>,
    new: Option<Ref>,
    result: CommandResult,
    message: Option<String>,
}

impl Command {
    /// Create a command changing `name` from `old` to `new`.
    pub fn new(name: impl Into<String>, old: Option<Ref>, new: Option<Ref>) -> Self {
        Self {
            name: name.into(),
            old,
            new,
            result: CommandResult::NotAttempted,
            message: None,
        }
    }

    /// The ref this command changes.
    pub fn ref_name(&self) -> &str {
        &self.name
    }

    pub fn old_ref(&self) -> Option<&Ref> {
        self.old.as_ref()
    }

    pub fn new_ref(&self) -> Option<&Ref> {
        self.new.as_ref()
    }

    pub fn old_id(&self) -> Option<ObjectId> {
        self.old.as_ref().and_then(Ref::object_id)
    }

    pub fn new_id(&self) -> Option<ObjectId> {
        self.new.as_ref().and_then(Ref::object_id)
    }

    pub fn kind(&self) -> CommandKind {
        match (&self.old, &self.new) {
            (_, None) => CommandKind::Delete,
            (None, Some(_)) => CommandKind::Create,
            (Some(_), Some(_)) => CommandKind::Update,
        }
    }

    pub fn result(&self) -> CommandResult {
        self.result
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_result(&mut self, result: CommandResult, message: Option<String>) {
        self.result = result;
        self.message = message;
    }

    /// Mark every not-yet-attempted command as rejected, leaving commands
    /// that already carry a result untouched.
    pub fn abort(commands: &mut [Command], why: Option<&str>) {
        let why = why.unwrap_or("transaction aborted");
        for c in commands
            .iter_mut()
            .filter(|c| c.result == CommandResult::NotAttempted)
        {
            c.set_result(CommandResult::RejectedOtherReason, Some(why.to_string()));
        }
    }
}
