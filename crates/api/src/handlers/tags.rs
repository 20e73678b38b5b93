//! Handlers for the `/tags` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use jotter_core::error::CoreError;
use jotter_core::validate::{validate_color, validate_name};
use jotter_db::models::tag::CreateTag;
use jotter_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/tags
///
/// List all tags, alphabetical by name.
pub async fn list_tags(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(tags))
}

/// POST /api/v1/tags
///
/// Create a tag, or return the existing one when the name is taken.
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if let Some(ref color) = input.color {
        validate_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let tag = TagRepo::create_or_get(&state.pool, &input.name, input.color.as_deref()).await?;

    tracing::info!(user_id = auth.user_id, tag_id = tag.id, "Tag created");

    Ok((StatusCode::CREATED, Json(tag)))
}
