//! Tag entity model and DTOs.
//!
//! Tags are global labels with an optional display color; the relationship
//! to notes is many-to-many through `note_tags`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use jotter_core::types::DbId;

/// A row from the `tags` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
}

/// DTO for creating (or idempotently fetching) a tag by name.
#[derive(Debug, Deserialize)]
pub struct CreateTag {
    pub name: String,
    pub color: Option<String>,
}
