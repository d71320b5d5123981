// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static tip content tests.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_list_categories() {
    let (app, _) = common::create_test_app().await;

    let response = app.oneshot(common::get("/tips", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let categories = body["categories"].as_array().unwrap();
    assert!(categories.contains(&json!("nutrition")));
    assert!(categories.contains(&json!("training")));
}

#[tokio::test]
async fn test_category_tips_returned() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(common::get("/tips/nutrition", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["category"], json!("nutrition"));
    assert!(!body["tips"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_category_is_empty_list_not_error() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(common::get("/tips/crossfit", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["tips"], json!([]));
}
