//! The seam between the [`RefUpdate`](crate::RefUpdate) driver and a
//! storage backend.

use reftree_refs::Ref;

use crate::error::Result;
use crate::request::UpdateRequest;
use crate::result::UpdateResult;

/// Storage-specific steps of a single-ref update.
///
/// The driver calls these in a fixed order for one attempt: `acquire`, then
/// at most one of the `apply_*` methods, then `release`. `release` runs
/// even when an earlier step failed.
pub trait RefUpdateHooks {
    /// Prepare the attempt and record the ref's current id on `request`
    /// with [`UpdateRequest::set_old_object_id`].
    ///
    /// With `deref` a symbolic ref is followed to the ref it points at.
    /// Returns `Ok(false)` if the ref could not be locked.
    fn acquire(&mut self, request: &mut UpdateRequest, deref: bool) -> Result<bool>;

    /// End the attempt. Safe to call more than once. Without a successful
    /// `acquire` it does nothing, and a later `acquire` may still succeed.
    fn release(&mut self);

    /// Point the ref at [`UpdateRequest::new_object_id`], reporting
    /// `desired` on success.
    fn apply_update(&mut self, request: &UpdateRequest, desired: UpdateResult)
        -> Result<UpdateResult>;

    /// Delete the ref, reporting `desired` on success.
    fn apply_delete(&mut self, request: &UpdateRequest, desired: UpdateResult)
        -> Result<UpdateResult>;

    /// Make the ref a symbolic ref pointing at `target`.
    fn apply_link(&mut self, request: &UpdateRequest, target: &str) -> Result<UpdateResult>;

    /// Read a ref by exact name, outside of the attempt.
    fn exact_ref(&self, name: &str) -> Result<Option<Ref>>;
}
