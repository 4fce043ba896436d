//! The batch engine for [`RefTreeDatabase`].
//!
//! A batch snapshots the tree when it is initialized and commits only if no
//! other batch committed in between. Commands are then checked one by one
//! against the snapshot and the policy; the first failure aborts the rest
//! and nothing is applied.

use std::collections::BTreeMap;

use reftree_store::{Resolver, RevObject, StoreError};
use reftree_types::{ObjectId, PersonIdent};
use tracing::{debug, warn};

use crate::command::{Command, CommandKind, CommandResult};
use crate::error::{RefError, Result};
use crate::memory::{self, RefLogEntry, RefTreeDatabase, RefTreeState};
use crate::traits::{BatchEngine, RefDatabase};
use crate::types::{Ref, HEAD};

/// A single-use batch commit against a [`RefTreeDatabase`].
pub struct RefTreeBatch {
    db: RefTreeDatabase,
    base: Option<Snapshot>,
    log_identity: Option<PersonIdent>,
    log_message: Option<String>,
    include_result: bool,
}

struct Snapshot {
    version: u64,
    refs: BTreeMap<String, Ref>,
}

type Rejection = (CommandResult, String);

impl RefTreeBatch {
    pub(crate) fn new(db: RefTreeDatabase) -> Self {
        Self {
            db,
            base: None,
            log_identity: None,
            log_message: None,
            include_result: false,
        }
    }

    /// The version of the tree this batch was initialized against.
    pub fn base_version(&self) -> Option<u64> {
        self.base.as_ref().map(|b| b.version)
    }

    fn check(
        &self,
        state: &RefTreeState,
        staged: &BTreeMap<String, Ref>,
        resolver: &mut Resolver,
        cmd: &Command,
    ) -> Result<Option<Rejection>> {
        let name = cmd.ref_name();
        let current = state.refs.get(name);
        let unchanged = match (cmd.old_ref(), current) {
            (None, None) => true,
            (Some(old), Some(cur)) => old.same_value(cur),
            _ => false,
        };
        if !unchanged {
            return Ok(Some((
                CommandResult::LockFailure,
                format!("{name} changed since it was read"),
            )));
        }

        let policy = self.db.policy();
        let kind = cmd.kind();
        if kind == CommandKind::Create && policy.deny_creates {
            return Ok(Some((CommandResult::RejectedNoCreate, "creation prohibited".into())));
        }
        if kind == CommandKind::Delete && policy.deny_deletes {
            return Ok(Some((CommandResult::RejectedNoDelete, "deletion prohibited".into())));
        }
        if policy.deny_current_branch && is_current_branch(state, name) {
            return Ok(Some((
                CommandResult::RejectedCurrentBranch,
                "branch is currently checked out".into(),
            )));
        }

        if cmd.new_ref().is_some_and(Ref::is_symbolic) {
            let mut trial = staged.clone();
            stage(&mut trial, cmd);
            if let Err(e) = memory::lookup(&trial, name) {
                return Ok(Some((CommandResult::RejectedOtherReason, e.to_string())));
            }
        }

        let is_direct = cmd.new_ref().is_some_and(|r| !r.is_symbolic());
        let Some(new_id) = cmd.new_id().filter(|_| is_direct) else {
            return Ok(None);
        };
        if !self.db.object_store().exists(&new_id)? {
            return Ok(Some((
                CommandResult::RejectedMissingObject,
                format!("missing object {new_id}"),
            )));
        }

        if kind == CommandKind::Update && policy.deny_non_fast_forwards {
            if let Some(old_id) = cmd.old_id() {
                let old = parse_or_missing(resolver, &old_id)?;
                let new = resolver.parse(&new_id)?;
                if let Some(old) = old {
                    if old.is_commit()
                        && new.is_commit()
                        && !resolver.is_merged_into(&old.id(), &new.id())?
                    {
                        return Ok(Some((
                            CommandResult::RejectedNonFastForward,
                            "non-fast-forward".into(),
                        )));
                    }
                }
            }
        }

        Ok(None)
    }

    fn log_message_for(&self, cmd: &Command) -> Option<String> {
        let message = self.log_message.as_deref()?;
        if !self.include_result {
            return Some(message.to_string());
        }
        let outcome = match cmd.kind() {
            CommandKind::Create => "created",
            CommandKind::Update => "updated",
            CommandKind::Delete => "deleted",
        };
        Some(if message.is_empty() {
            outcome.to_string()
        } else {
            format!("{message}: {outcome}")
        })
    }
}

impl BatchEngine for RefTreeBatch {
    fn initialize(&mut self, resolver: &mut Resolver) -> Result<()> {
        if resolver.is_closed() {
            return Err(StoreError::Closed.into());
        }
        let state = self.db.read_state()?;
        debug!(version = state.version, refs = state.refs.len(), "batch initialized");
        self.base = Some(Snapshot {
            version: state.version,
            refs: state.refs.clone(),
        });
        Ok(())
    }

    fn lookup(&mut self, _resolver: &mut Resolver, name: &str) -> Result<Option<Ref>> {
        let base = self.base.as_ref().ok_or(RefError::BatchNotInitialized)?;
        memory::lookup(&base.refs, name)
    }

    fn set_log_identity(&mut self, identity: Option<PersonIdent>) {
        self.log_identity = identity;
    }

    fn set_log_message(&mut self, message: Option<String>, include_result: bool) {
        self.log_message = message;
        self.include_result = include_result;
    }

    fn execute(&mut self, resolver: &mut Resolver, commands: &mut [Command]) -> Result<()> {
        if commands
            .iter()
            .any(|c| c.result() != CommandResult::NotAttempted)
        {
            Command::abort(commands, None);
            return Ok(());
        }
        let base_version = self
            .base
            .as_ref()
            .map(|b| b.version)
            .ok_or(RefError::BatchNotInitialized)?;

        let mut state = self.db.write_state()?;
        if state.version != base_version {
            warn!(
                base = base_version,
                current = state.version,
                commands = commands.len(),
                "ref tree moved since batch was initialized"
            );
            for c in commands.iter_mut() {
                c.set_result(
                    CommandResult::LockFailure,
                    Some("concurrent ref tree commit".into()),
                );
            }
            return Ok(());
        }

        let mut staged = state.refs.clone();
        for i in 0..commands.len() {
            if let Some((result, why)) = self.check(&state, &staged, resolver, &commands[i])? {
                debug!(name = %commands[i].ref_name(), %result, reason = %why, "command rejected");
                commands[i].set_result(result, Some(why));
                Command::abort(commands, None);
                return Ok(());
            }
            stage(&mut staged, &commands[i]);
        }

        let mut changed = false;
        for c in commands.iter_mut() {
            // Deleting a ref that was already absent writes nothing.
            if c.old_ref().is_none() && c.new_ref().is_none() {
                c.set_result(CommandResult::Ok, None);
                continue;
            }
            changed = true;
            if let Some(message) = self.log_message_for(c) {
                state.log.push(RefLogEntry {
                    ref_name: c.ref_name().to_string(),
                    old_id: c.old_id(),
                    new_id: c.new_id(),
                    who: self.log_identity.clone(),
                    message,
                });
            }
            c.set_result(CommandResult::Ok, None);
        }
        if !changed {
            debug!(version = state.version, commands = commands.len(), "batch changed nothing");
            return Ok(());
        }
        state.refs = staged;
        state.version += 1;
        debug!(version = state.version, commands = commands.len(), "batch committed");
        Ok(())
    }
}

/// Apply `cmd` to `refs` as it would be committed.
fn stage(refs: &mut BTreeMap<String, Ref>, cmd: &Command) {
    match cmd.new_ref() {
        Some(new) => {
            refs.insert(cmd.ref_name().to_string(), memory::stored_form(new));
        }
        None => {
            refs.remove(cmd.ref_name());
        }
    }
}

fn is_current_branch(state: &RefTreeState, name: &str) -> bool {
    state
        .refs
        .get(HEAD)
        .and_then(Ref::symbolic_target_name)
        .is_some_and(|target| target == name)
}

/// Parse `id`, mapping a missing object to `None`.
fn parse_or_missing(resolver: &mut Resolver, id: &ObjectId) -> Result<Option<RevObject>> {
    match resolver.parse(id) {
        Ok(obj) => Ok(Some(obj)),
        Err(StoreError::MissingObject(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
