//! Repository for the `templates` table.

use sqlx::PgPool;

use jotter_core::types::DbId;

use crate::models::template::{CreateTemplate, Template};

/// Column list for `templates` queries.
const COLUMNS: &str = "id, name, content, category_id, user_id";

/// Provides template lookup and creation.
pub struct TemplateRepo;

impl TemplateRepo {
    /// List a user's templates, alphabetical by name.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates WHERE user_id = $1 ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Create a new template for the user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTemplate,
    ) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates (name, content, category_id, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.name)
            .bind(&input.content)
            .bind(input.category_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
