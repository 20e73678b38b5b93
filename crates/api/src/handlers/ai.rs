//! Handler for the AI draft proxy.
//!
//! Stateless pass-through: the prompt goes to the upstream as-is and the
//! generated text comes back verbatim in `{ "content": ... }`. No retries,
//! no caching; upstream detail is logged, never leaked.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use jotter_core::error::CoreError;
use jotter_core::validate::validate_prompt;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /ai/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Response body: the generated text, unmodified.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
}

/// POST /api/v1/ai/generate
pub async fn generate(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    validate_prompt(&input.prompt)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let content = state.ai.generate(&input.prompt).await?;

    tracing::info!(
        user_id = auth.user_id,
        prompt_chars = input.prompt.chars().count(),
        content_chars = content.chars().count(),
        "AI draft generated"
    );

    Ok(Json(GenerateResponse { content }))
}
