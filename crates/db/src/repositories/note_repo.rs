//! Repository for the `notes` and `note_tags` tables.
//!
//! All queries are scoped to the owning user. The multi-row operations
//! (create with tags, update with tag replacement, reorder, delete) run
//! inside transactions so partial application is never observable.

use sqlx::{PgPool, Postgres, Transaction};

use jotter_core::types::DbId;

use crate::models::note::{CreateNote, Note, NoteTagLink, UpdateNote};

/// Column list for `notes` queries.
const COLUMNS: &str =
    "id, title, content, category_id, color, position, created_at, updated_at, user_id";

/// Provides CRUD, tag-association, and reorder operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// List a user's notes ordered by manual position ascending, newest
    /// creation first as the tie-break.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE user_id = $1
             ORDER BY position ASC, created_at DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a note by id, scoped to the owning user.
    ///
    /// Returns `None` both when the id does not exist and when it belongs to
    /// someone else.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a note at the end of the user's list (position = current note
    /// count) and attach any supplied tags, as one transaction.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateNote,
    ) -> Result<Note, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO notes (title, content, category_id, color, position, user_id)
             VALUES ($1, $2, $3, $4,
                     (SELECT COUNT(*) FROM notes WHERE user_id = $5), $5)
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id)
            .bind(&input.color)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(tag_ids) = &input.tags {
            Self::insert_tag_links(&mut tx, note.id, tag_ids).await?;
        }

        tx.commit().await?;
        Ok(note)
    }

    /// Update a note, bumping `updated_at`. When `tags` is provided the
    /// entire association set is replaced (delete-all, then insert) in the
    /// same transaction.
    ///
    /// `category_id` and `color` use the double-`Option` convention: absent
    /// leaves the column unchanged, explicit `null` clears it.
    ///
    /// Returns `None` if the note does not exist or is not owned by the user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE notes SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                category_id = CASE WHEN $5 THEN $6 ELSE category_id END,
                color = CASE WHEN $7 THEN $8 ELSE color END,
                updated_at = now()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(input.color.is_some())
            .bind(input.color.clone().flatten())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(note) = note else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(tag_ids) = &input.tags {
            sqlx::query("DELETE FROM note_tags WHERE note_id = $1")
                .bind(note.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_tag_links(&mut tx, note.id, tag_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(note))
    }

    /// Delete a note (tag links cascade). Returns `true` if a row was
    /// deleted. Surviving notes keep their positions; gaps are tolerated.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reassign positions from an ordered id list: position = index.
    ///
    /// Applied as a single all-or-nothing transaction. Returns `Ok(false)`
    /// without touching any row when an id is missing or owned by another
    /// user.
    pub async fn reorder(
        pool: &PgPool,
        user_id: DbId,
        note_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (owned,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notes WHERE user_id = $1 AND id = ANY($2)",
        )
        .bind(user_id)
        .bind(note_ids)
        .fetch_one(&mut *tx)
        .await?;

        if owned as usize != note_ids.len() {
            tx.rollback().await?;
            return Ok(false);
        }

        for (index, note_id) in note_ids.iter().enumerate() {
            sqlx::query("UPDATE notes SET position = $1 WHERE id = $2 AND user_id = $3")
                .bind(index as i32)
                .bind(note_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Tag ids associated with a single note, ascending.
    pub async fn tags_for_note(pool: &PgPool, note_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT tag_id FROM note_tags WHERE note_id = $1 ORDER BY tag_id")
                .bind(note_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// All note-to-tag links for a user's notes, for assembling list
    /// responses in one extra query instead of one per note.
    pub async fn tag_links_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<NoteTagLink>, sqlx::Error> {
        sqlx::query_as::<_, NoteTagLink>(
            "SELECT nt.note_id, nt.tag_id
             FROM note_tags nt
             JOIN notes n ON n.id = nt.note_id
             WHERE n.user_id = $1
             ORDER BY nt.note_id, nt.tag_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Insert `note_tags` rows for the given tag ids. Duplicate ids in the
    /// input are collapsed by the ON CONFLICT clause.
    async fn insert_tag_links(
        tx: &mut Transaction<'_, Postgres>,
        note_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO note_tags (note_id, tag_id) VALUES ($1, $2)
                 ON CONFLICT (note_id, tag_id) DO NOTHING",
            )
            .bind(note_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
