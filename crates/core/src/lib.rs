//! Domain primitives shared across the Jotter backend.
//!
//! - [`error`] -- the domain-level error taxonomy.
//! - [`types`] -- id and timestamp aliases used by every crate.
//! - [`validate`] -- field validation helpers for notes, categories, and tags.

pub mod error;
pub mod types;
pub mod validate;
