//! Note template model and DTOs.
//!
//! Templates are user-owned named content blocks; picking one pre-fills a
//! new note. They reference a category optionally, detached when the
//! category goes away.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use jotter_core::types::DbId;

/// A row from the `templates` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Template {
    pub id: DbId,
    pub name: String,
    pub content: String,
    pub category_id: Option<DbId>,
    pub user_id: DbId,
}

/// DTO for creating a new template.
#[derive(Debug, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub content: String,
    pub category_id: Option<DbId>,
}
