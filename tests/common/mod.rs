// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use coach_api::config::Config;
use coach_api::db::Database;
use coach_api::middleware::auth::create_session_token;
use coach_api::models::User;
use coach_api::routes::create_router;
use coach_api::AppState;
use std::sync::Arc;

/// Create a test app backed by a fresh in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Database::in_memory()
        .await
        .expect("Failed to open in-memory database");

    let state = Arc::new(AppState { config, db });

    (create_router(state.clone()), state)
}

/// Seed a user row the way the identity layer would at first sign-in.
#[allow(dead_code)]
pub async fn seed_user(state: &AppState, email: &str) -> User {
    state.db.create_user(email).await.expect("Failed to seed user")
}

/// Create a session token for a seeded user.
#[allow(dead_code)]
pub fn session_for(state: &AppState, user: &User) -> String {
    create_session_token(Some(&user.id), &user.email, &state.config.session_secret)
        .expect("Failed to create session token")
}

/// Build a GET request, optionally authenticated.
#[allow(dead_code)]
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Build a JSON request with the given method, optionally authenticated.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body was not JSON")
}

/// Count rows in a plan table for one user.
#[allow(dead_code)]
pub async fn plan_count(state: &AppState, table: &str, user_id: &str) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as(&format!("SELECT COUNT(*) FROM {} WHERE user_id = ?", table))
            .bind(user_id)
            .fetch_one(state.db.pool())
            .await
            .expect("Failed to count plans");
    count
}
