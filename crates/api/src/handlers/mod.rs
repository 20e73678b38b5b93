//! HTTP handler functions, grouped by resource.

pub mod ai;
pub mod auth;
pub mod categories;
pub mod notes;
pub mod tags;
pub mod templates;
