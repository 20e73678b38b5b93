//! Route definition for the AI draft proxy.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// AI routes, mounted at `/ai`.
///
/// ```text
/// POST /generate   -> generate (single-shot draft proxy)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(ai::generate))
}
