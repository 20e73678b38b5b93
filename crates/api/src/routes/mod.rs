//! Route definitions, grouped by resource and mounted under `/api/v1`.

pub mod ai;
pub mod auth;
pub mod categories;
pub mod health;
pub mod notes;
pub mod tags;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register        register (public)
/// /auth/login           login (public)
/// /auth/refresh         refresh (public)
/// /auth/logout          logout
///
/// /notes                list, create
/// /notes/reorder        batch reposition (PUT, all-or-nothing)
/// /notes/{id}           get, update, delete
///
/// /categories           list, create
/// /categories/{id}      update, delete
///
/// /tags                 list, create
///
/// /templates            list, create
///
/// /ai/generate          forward a prompt to the generative-text upstream
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/notes", notes::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
        .nest("/templates", templates::router())
        .nest("/ai", ai::router())
}
