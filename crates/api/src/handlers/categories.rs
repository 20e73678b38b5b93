//! Handlers for the `/categories` resource.
//!
//! Deleting a category detaches its notes rather than deleting them; the
//! detach and the row delete are one transaction in the repository.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use jotter_core::error::CoreError;
use jotter_core::types::DbId;
use jotter_core::validate::{validate_color, validate_name};
use jotter_db::models::category::{CreateCategory, UpdateCategory};
use jotter_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// List the caller's categories, alphabetical by name.
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool, auth.user_id).await?;
    Ok(Json(categories))
}

/// POST /api/v1/categories
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if let Some(ref color) = input.color {
        validate_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let category = CategoryRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        category_id = category.id,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/{id}
///
/// Rename/recolor/re-describe a category.
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        validate_name(name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    if let Some(ref color) = input.color {
        validate_color(color).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let category = CategoryRepo::update(&state.pool, auth.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, category_id = id, "Category updated");

    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Detach every referencing note, then delete the category, atomically.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CategoryRepo::delete(&state.pool, auth.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, category_id = id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
