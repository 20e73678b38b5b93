//! Handlers for the `/templates` resource.
//!
//! Templates are named content blocks used to pre-fill new notes. Creation
//! requires both a name and non-empty content.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use jotter_core::error::CoreError;
use jotter_core::validate::{validate_content, validate_name};
use jotter_db::models::template::CreateTemplate;
use jotter_db::repositories::TemplateRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::notes::ensure_category_owned;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/templates
///
/// List the caller's templates, alphabetical by name.
pub async fn list_templates(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let templates = TemplateRepo::list(&state.pool, auth.user_id).await?;
    Ok(Json(templates))
}

/// POST /api/v1/templates
pub async fn create_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Template content must not be empty".into(),
        )));
    }
    validate_content(&input.content)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    if let Some(category_id) = input.category_id {
        ensure_category_owned(&state.pool, auth.user_id, category_id).await?;
    }

    let template = TemplateRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        template_id = template.id,
        "Template created"
    );

    Ok((StatusCode::CREATED, Json(template)))
}
