//! Note entity model and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use jotter_core::types::{DbId, Timestamp};

/// A row from the `notes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub category_id: Option<DbId>,
    pub color: Option<String>,
    /// Manual sort position within the owning user's notes. Unique per user
    /// once a reorder settles; gaps after deletes are tolerated.
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub user_id: DbId,
}

/// A note together with its associated tag ids, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct NoteWithTags {
    #[serde(flatten)]
    pub note: Note,
    pub tags: Vec<DbId>,
}

/// One `note_tags` association row.
#[derive(Debug, Clone, FromRow)]
pub struct NoteTagLink {
    pub note_id: DbId,
    pub tag_id: DbId,
}

/// DTO for creating a new note.
#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category_id: Option<DbId>,
    pub color: Option<String>,
    /// Tag ids to associate. Missing means no tags.
    pub tags: Option<Vec<DbId>>,
}

/// DTO for updating a note.
///
/// `category_id` and `color` distinguish "absent" (leave unchanged) from an
/// explicit `null` (clear the field) via the double-`Option` pattern.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "provided")]
    pub category_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "provided")]
    pub color: Option<Option<String>>,
    /// When present, the whole association set is replaced (not merged).
    pub tags: Option<Vec<DbId>>,
}

/// Request body for the reorder batch: note ids in their new display order.
/// Position is assigned by index within this list.
#[derive(Debug, Deserialize)]
pub struct ReorderNotes {
    pub note_ids: Vec<DbId>,
}

/// Deserialize a field that was present in the JSON, keeping explicit `null`
/// distinguishable from a missing key (handled by `#[serde(default)]`).
fn provided<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
