// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. Session-guarded routes reject requests without valid tokens
//! 2. Rejected requests never touch the store
//! 3. Public routes and CORS preflight work without a session

use axum::http::{header, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_protected_routes_without_token() {
    let (app, _) = common::create_test_app().await;

    for (method, uri) in [
        ("GET", "/user/profile"),
        ("PUT", "/user/profile"),
        ("POST", "/user/complete-onboarding"),
        ("GET", "/user/workout/plan"),
        ("GET", "/user/nutrition/plan"),
        ("POST", "/user/workout/update"),
        ("POST", "/user/nutrition/update"),
        ("POST", "/user/weight/update"),
        ("POST", "/user/reset-progress"),
        ("POST", "/user/reset"),
        ("GET", "/user/status"),
    ] {
        let request = if method == "GET" {
            common::get(uri, None)
        } else {
            common::json_request(method, uri, None, &json!({}))
        };

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should require a session",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(common::get("/user/status", Some("invalid.token.here")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unauthorized_body_shape() {
    let (app, _) = common::create_test_app().await;

    let response = app.oneshot(common::get("/user/status", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = common::body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_rejected_request_performs_no_mutation() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state, "athlete@example.com").await;

    // Unauthenticated plan submission must not insert a row
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/user/workout/update",
            None,
            &json!({"plan": {"days": ["mon"]}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(common::plan_count(&state, "workout_plans", &user.id).await, 0);

    // Unauthenticated profile update must not change the row
    let response = app
        .oneshot(common::json_request(
            "PUT",
            "/user/profile",
            None,
            &json!({"name": "Mallory"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stored = state
        .db
        .get_user_by_email("athlete@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, None);
}

#[tokio::test]
async fn test_session_cookie_accepted() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state, "athlete@example.com").await;
    let token = common::session_for(&state, &user);

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/user/status")
        .header(header::COOKIE, format!("coach_session={}", token))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_routes_no_auth_required() {
    let (app, _) = common::create_test_app().await;

    let response = app.clone().oneshot(common::get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(common::get("/tips/training", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("OPTIONS")
                .uri("/user/status")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}
