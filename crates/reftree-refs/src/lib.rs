//! Named references over a batch-committed ref tree.
//!
//! Refs here can only change through a [`BatchEngine`]: a list of
//! [`Command`]s is applied atomically or not at all, and concurrent batches
//! against the same tree are serialized. Single-ref updates are built on top
//! of this in `reftree-update`.
//!
//! # Modules
//!
//! - [`types`]: [`Ref`], its [`RefTarget`] and [`Storage`] classification
//! - [`command`]: [`Command`] and the per-command [`CommandResult`]
//! - [`traits`]: the [`BatchEngine`] and [`RefDatabase`] boundaries
//! - [`memory`]: the in-memory [`RefTreeDatabase`]
//! - [`batch`]: [`RefTreeBatch`], the engine for [`RefTreeDatabase`]
//! - [`config`]: [`BatchPolicy`] loaded from TOML
//! - [`names`]: ref name validation

pub mod batch;
pub mod command;
pub mod config;
pub mod error;
pub mod memory;
pub mod names;
pub mod traits;
pub mod types;

pub use batch::RefTreeBatch;
pub use command::{Command, CommandKind, CommandResult};
pub use config::BatchPolicy;
pub use error::{RefError, Result};
pub use memory::{RefLogEntry, RefTreeDatabase, MAX_SYMBOLIC_REF_DEPTH};
pub use names::{validate_link_target, validate_ref_name};
pub use traits::{BatchEngine, RefDatabase};
pub use types::{Peel, Ref, RefTarget, Storage, HEAD, R_HEADS, R_REFS, R_TAGS};
