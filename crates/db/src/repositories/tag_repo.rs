//! Repository for the `tags` table.
//!
//! Tags are global rows keyed by unique name; creation is idempotent via
//! `ON CONFLICT`. Orphaned tags (zero remaining note associations) are left
//! in place deliberately.

use sqlx::PgPool;

use jotter_core::types::DbId;

use crate::models::tag::Tag;

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name, color";

/// Provides tag lookup and idempotent creation.
pub struct TagRepo;

impl TagRepo {
    /// List all tags, alphabetical by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name ASC");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Find a tag by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a tag, or return the existing one when the name is taken.
    ///
    /// On conflict the color is updated so the most recent choice wins.
    pub async fn create_or_get(
        pool: &PgPool,
        name: &str,
        color: Option<&str>,
    ) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, color) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET color = COALESCE(EXCLUDED.color, tags.color)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .bind(color)
            .fetch_one(pool)
            .await
    }

    /// Count how many of the given ids exist. Used to validate tag id lists
    /// supplied on note create/update before touching associations.
    pub async fn count_existing(pool: &PgPool, ids: &[DbId]) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tags WHERE id = ANY($1)")
                .bind(ids)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
