//! Handlers for the `/notes` resource.
//!
//! Every operation is scoped to the authenticated user; a note id that
//! belongs to someone else behaves exactly like a missing id (404).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use jotter_core::error::CoreError;
use jotter_core::types::DbId;
use jotter_core::validate::{validate_color, validate_content, validate_title};
use jotter_db::models::note::{CreateNote, NoteWithTags, ReorderNotes, UpdateNote};
use jotter_db::repositories::{CategoryRepo, NoteRepo, TagRepo};
use jotter_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/notes
///
/// List the caller's notes ordered by manual position, each with its tag
/// ids. One extra query fetches all tag links instead of one per note.
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let payload = list_with_tags(&state.pool, auth.user_id).await?;
    Ok(Json(payload))
}

/// Assemble a user's full note list with tag ids attached, in display order.
async fn list_with_tags(pool: &DbPool, user_id: DbId) -> AppResult<Vec<NoteWithTags>> {
    let notes = NoteRepo::list(pool, user_id).await?;
    let links = NoteRepo::tag_links_for_user(pool, user_id).await?;

    let mut tags_by_note: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for link in links {
        tags_by_note.entry(link.note_id).or_default().push(link.tag_id);
    }

    Ok(notes
        .into_iter()
        .map(|note| {
            let tags = tags_by_note.remove(&note.id).unwrap_or_default();
            NoteWithTags { note, tags }
        })
        .collect())
}

/// POST /api/v1/notes
///
/// Create a note at the end of the caller's list.
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_content(&input.content)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if let Some(ref color) = input.color {
        validate_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    if let Some(category_id) = input.category_id {
        ensure_category_owned(&state.pool, auth.user_id, category_id).await?;
    }
    if let Some(ref tag_ids) = input.tags {
        ensure_tags_exist(&state.pool, tag_ids).await?;
    }

    let note = NoteRepo::create(&state.pool, auth.user_id, &input).await?;
    let tags = NoteRepo::tags_for_note(&state.pool, note.id).await?;

    tracing::info!(
        user_id = auth.user_id,
        note_id = note.id,
        position = note.position,
        "Note created"
    );

    Ok((StatusCode::CREATED, Json(NoteWithTags { note, tags })))
}

/// GET /api/v1/notes/{id}
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = NoteRepo::find_by_id(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Note", id }))?;
    let tags = NoteRepo::tags_for_note(&state.pool, note.id).await?;

    Ok(Json(NoteWithTags { note, tags }))
}

/// PUT /api/v1/notes/{id}
///
/// Merge the provided fields into the note. A supplied `tags` array
/// replaces the whole association set.
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNote>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(ref content) = input.content {
        validate_content(content).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(Some(ref color)) = input.color {
        validate_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    if let Some(Some(category_id)) = input.category_id {
        ensure_category_owned(&state.pool, auth.user_id, category_id).await?;
    }
    if let Some(ref tag_ids) = input.tags {
        ensure_tags_exist(&state.pool, tag_ids).await?;
    }

    let note = NoteRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Note", id }))?;
    let tags = NoteRepo::tags_for_note(&state.pool, note.id).await?;

    tracing::info!(user_id = auth.user_id, note_id = id, "Note updated");

    Ok(Json(NoteWithTags { note, tags }))
}

/// DELETE /api/v1/notes/{id}
///
/// Remove the note and its tag links. Surviving positions are not
/// renumbered.
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = NoteRepo::delete(&state.pool, auth.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Note", id }));
    }

    tracing::info!(user_id = auth.user_id, note_id = id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/notes/reorder
///
/// Reassign positions from the ordered id list, all-or-nothing. Returns
/// the full re-ordered list in the same shape as `GET /notes` so the
/// client can reconcile without a second fetch.
pub async fn reorder_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReorderNotes>,
) -> AppResult<impl IntoResponse> {
    if input.note_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "note_ids must not be empty".into(),
        )));
    }

    let applied = NoteRepo::reorder(&state.pool, auth.user_id, &input.note_ids).await?;
    if !applied {
        return Err(AppError::Core(CoreError::Validation(
            "One or more note ids do not belong to the caller; no positions changed".into(),
        )));
    }

    tracing::info!(
        user_id = auth.user_id,
        count = input.note_ids.len(),
        "Notes reordered"
    );

    let notes = list_with_tags(&state.pool, auth.user_id).await?;
    Ok(Json(notes))
}

/// Resolve a category id against the caller's categories, mapping a miss
/// to 404 without revealing whether the id exists for another user.
pub(crate) async fn ensure_category_owned(
    pool: &DbPool,
    user_id: DbId,
    category_id: DbId,
) -> AppResult<()> {
    CategoryRepo::find_by_id(pool, user_id, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;
    Ok(())
}

/// Reject the request when any supplied tag id does not exist. Repeated ids
/// in the input are collapsed before the count so they cannot skew it.
async fn ensure_tags_exist(pool: &DbPool, tag_ids: &[DbId]) -> AppResult<()> {
    let mut unique = tag_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let existing = TagRepo::count_existing(pool, &unique).await?;
    if existing as usize != unique.len() {
        return Err(AppError::Core(CoreError::Validation(
            "One or more tag ids do not exist".into(),
        )));
    }
    Ok(())
}
