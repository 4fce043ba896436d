//! Foundation types for RefTree.
//!
//! This crate provides the identifier and identity types shared by every
//! other RefTree crate.
//!
//! # Key Types
//!
//! - [`ObjectId`]: content-addressed identifier (BLAKE3 hash); the all-zero
//!   id is the "no object" sentinel used by compare-and-swap checks
//! - [`PersonIdent`]: who performed a ref change and when, recorded in the
//!   ref-log

pub mod error;
pub mod ident;
pub mod object;

pub use error::TypeError;
pub use ident::PersonIdent;
pub use object::ObjectId;
