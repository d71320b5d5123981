// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Status endpoint tests: onboarding flag and latest-plan existence.

use axum::http::StatusCode;
use coach_api::models::PlanKind;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_status_for_fresh_user() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state, "athlete@example.com").await;
    let token = common::session_for(&state, &user);

    let response = app
        .oneshot(common::get("/user/status", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(
        body,
        json!({
            "hasCompletedOnboarding": false,
            "hasWorkoutPlan": false,
            "hasNutritionPlan": false,
            "workoutPlan": null,
            "nutritionPlan": null,
        })
    );
}

#[tokio::test]
async fn test_status_reflects_onboarding_and_plans() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state, "athlete@example.com").await;
    let token = common::session_for(&state, &user);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/user/complete-onboarding",
            Some(&token),
            &json!({"name": "Sam"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/user/workout/update",
            Some(&token),
            &json!({"plan": {"split": "ppl"}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(common::get("/user/status", Some(&token)))
        .await
        .unwrap();
    let body = common::body_json(response).await;

    assert_eq!(body["hasCompletedOnboarding"], json!(true));
    assert_eq!(body["hasWorkoutPlan"], json!(true));
    assert_eq!(body["workoutPlan"], json!({"split": "ppl"}));
    // No nutrition plan yet
    assert_eq!(body["hasNutritionPlan"], json!(false));
    assert_eq!(body["nutritionPlan"], json!(null));
}

#[tokio::test]
async fn test_status_treats_empty_document_as_no_plan() {
    let (app, state) = common::create_test_app().await;
    let user = common::seed_user(&state, "athlete@example.com").await;
    let token = common::session_for(&state, &user);

    // A row can hold a null or empty document; the API cannot create
    // one, so insert at the store layer.
    let now = chrono::Utc::now();
    state
        .db
        .insert_plan(
            PlanKind::Workout,
            &user.id,
            "Workout Plan",
            json!(null),
            now,
            None,
        )
        .await
        .unwrap();
    state
        .db
        .insert_plan(
            PlanKind::Nutrition,
            &user.id,
            "Nutrition Plan",
            json!({}),
            now,
            None,
        )
        .await
        .unwrap();

    let response = app
        .oneshot(common::get("/user/status", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    // Rows exist, but neither document is usable
    assert_eq!(body["hasWorkoutPlan"], json!(false));
    assert_eq!(body["hasNutritionPlan"], json!(false));
    assert_eq!(body["workoutPlan"], json!(null));
    assert_eq!(body["nutritionPlan"], json!({}));
}

#[tokio::test]
async fn test_status_unknown_user_is_404() {
    let (app, state) = common::create_test_app().await;
    let token = coach_api::middleware::auth::create_session_token(
        Some("no-such-id"),
        "ghost@example.com",
        &state.config.session_secret,
    )
    .unwrap();

    let response = app
        .oneshot(common::get("/user/status", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], json!("User not found"));
}
