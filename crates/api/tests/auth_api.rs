//! Integration tests for registration, login, refresh, and logout.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get, post_json, register_user};
use jotter_api::auth::jwt::hash_refresh_token;
use jotter_db::repositories::SessionRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_tokens_and_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        &app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "analytical-engine",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["username"], "ada");
    // The password hash must never appear in responses.
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_weak_password_and_duplicates(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "short",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    register_user(&app, "carol").await;
    let response = post_json(
        &app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": "carol",
            "email": "carol2@example.com",
            "password": "long-enough-password",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_rejects_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(&app, "dave").await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({
            "username": "dave",
            "password": "not-the-password",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({
            "username": "dave",
            "password": "correct-horse-battery-staple",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_routes_require_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/notes", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&app, "/api/v1/notes", Some("not-a-real-token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": "erin",
            "email": "erin@example.com",
            "password": "long-enough-password",
        }),
    )
    .await;
    let json = body_json(response).await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds and yields a new pair.
    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], refresh_token.as_str());

    // The consumed token is dead.
    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_miss_purges_expired_sessions(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": "grace",
            "email": "grace@example.com",
            "password": "long-enough-password",
        }),
    )
    .await;
    let user_id = body_json(response).await["user"]["id"].as_i64().unwrap();

    // A session whose expiry has already passed, as if the user stopped
    // refreshing weeks ago.
    let stale_hash = hash_refresh_token("stale-token");
    SessionRepo::create(&pool, user_id, &stale_hash, Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({ "refresh_token": "stale-token" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The failed refresh swept the expired row out of the table.
    let (stale_rows,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE refresh_token_hash = $1")
            .bind(&stale_hash)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stale_rows, 0);

    // The live session from registration is untouched.
    let (live_rows,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(live_rows, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_invalidates_the_session(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": "frank",
            "email": "frank@example.com",
            "password": "long-enough-password",
        }),
    )
    .await;
    let json = body_json(response).await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        &app,
        "/api/v1/auth/logout",
        None,
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
