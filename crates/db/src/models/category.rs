//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use jotter_core::types::DbId;

/// A row from the `categories` table.
///
/// Names are not unique within a user; two categories called "Work" are
/// allowed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub user_id: DbId,
}

/// DTO for creating a new category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}
