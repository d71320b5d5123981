// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes: fetch/update profile, onboarding completion, weight.

use crate::error::{AppError, Result};
use crate::middleware::auth::Principal;
use crate::models::user::{
    OnboardingRequest, ProfileResponse, UpdateProfileRequest, UpdateProfileResponse,
};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json as SqlJson;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/profile", get(get_profile).put(update_profile))
        .route("/user/complete-onboarding", post(complete_onboarding))
        .route("/user/weight/update", post(update_weight))
}

// ─── Profile ─────────────────────────────────────────────────

/// Get current user profile.
///
/// This is the one read that goes through the principal's stable id
/// rather than the email; a token without a `sub` claim cannot use it.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ProfileResponse>> {
    let user_id = principal.user_id.ok_or(AppError::Unauthorized)?;

    let user = state
        .db
        .get_user_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse::from(&user)))
}

/// Update a subset of profile fields.
///
/// Fetch-modify-write: only the keys present in the payload are changed,
/// each with unconditional last-write-wins semantics.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>> {
    let mut user = state
        .db
        .get_user_by_email(&principal.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(name) = payload.name {
        user.name = Some(name);
    }
    if let Some(height) = payload.height {
        user.height = Some(height);
    }
    if let Some(weight) = payload.weight {
        user.weight = Some(weight);
    }
    if let Some(goal_type) = payload.goal_type {
        user.goal_type = Some(goal_type);
    }
    if let Some(experience_level) = payload.experience_level {
        user.experience_level = Some(experience_level);
    }
    if let Some(target_weight) = payload.target_weight {
        user.target_weight = Some(target_weight);
    }
    if let Some(target_date) = payload.target_date {
        user.target_date = Some(target_date);
    }

    state.db.save_profile(&user).await?;

    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(Json(UpdateProfileResponse {
        name: user.name,
        height: user.height,
        weight: user.weight,
        goal_type: user.goal_type,
        experience_level: user.experience_level,
        target_weight: user.target_weight,
        target_date: user.target_date,
    }))
}

// ─── Onboarding ──────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub success: bool,
    pub user: ProfileResponse,
    /// The frontend re-fetches its session after onboarding completes.
    pub refresh_session: bool,
}

/// Complete onboarding: fill profile fields and set the flag.
async fn complete_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<OnboardingRequest>,
) -> Result<Json<OnboardingResponse>> {
    let mut user = state
        .db
        .get_user_by_email(&principal.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(name) = payload.name {
        user.name = Some(name);
    }
    if let Some(age) = payload.age {
        user.age = Some(age);
    }
    if let Some(sex) = payload.sex {
        user.sex = Some(sex);
    }
    if let Some(height) = payload.height {
        user.height = Some(height);
    }
    if let Some(weight) = payload.weight {
        user.weight = Some(weight);
    }
    if let Some(target_weight) = payload.target_weight {
        user.target_weight = Some(target_weight);
    }
    if let Some(starting_weight) = payload.starting_weight {
        user.starting_weight = Some(starting_weight);
    }
    if let Some(goal_type) = payload.goal_type {
        user.goal_type = Some(goal_type);
    }
    if let Some(experience_level) = payload.experience_level {
        user.experience_level = Some(experience_level);
    }
    if let Some(days) = payload.preferred_workout_days {
        user.preferred_workout_days = SqlJson(days);
    }
    if let Some(weak_points) = payload.weak_points {
        user.weak_points = SqlJson(weak_points);
    }
    if let Some(favorite_foods) = payload.favorite_foods {
        user.favorite_foods = SqlJson(favorite_foods);
    }
    if let Some(allergies) = payload.allergies {
        user.allergies = SqlJson(allergies);
    }
    if let Some(target_date) = payload.target_date {
        user.target_date = Some(target_date);
    }
    user.has_completed_onboarding = true;

    state.db.save_profile(&user).await?;

    tracing::info!(user_id = %user.id, "Onboarding completed");

    Ok(Json(OnboardingResponse {
        success: true,
        user: ProfileResponse::from(&user),
        refresh_session: true,
    }))
}

// ─── Weight ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct WeightRequest {
    /// Accepted as a JSON number or a numeric string; anything else is
    /// rejected before the store is touched.
    weight: Option<Value>,
}

#[derive(Serialize)]
pub struct WeightResponse {
    pub message: String,
    pub weight: f64,
}

fn parse_weight(raw: Option<&Value>) -> Option<f64> {
    let parsed = match raw? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|w| w.is_finite())
}

/// Record a new current weight.
async fn update_weight(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<WeightRequest>,
) -> Result<Json<WeightResponse>> {
    let weight = parse_weight(payload.weight.as_ref())
        .ok_or_else(|| AppError::BadRequest("Invalid weight value".to_string()))?;

    let user = state
        .db
        .get_user_by_email(&principal.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    state.db.set_weight(&user.id, weight).await?;

    tracing::info!(user_id = %user.id, weight, "Weight updated");

    Ok(Json(WeightResponse {
        message: "Weight updated successfully".to_string(),
        weight,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numeric_weight_forms() {
        assert_eq!(parse_weight(Some(&json!(82.5))), Some(82.5));
        assert_eq!(parse_weight(Some(&json!("82.5"))), Some(82.5));
        assert_eq!(parse_weight(Some(&json!(" 90 "))), Some(90.0));
    }

    #[test]
    fn rejects_non_numeric_weight() {
        assert_eq!(parse_weight(None), None);
        assert_eq!(parse_weight(Some(&json!("abc"))), None);
        assert_eq!(parse_weight(Some(&json!(null))), None);
        assert_eq!(parse_weight(Some(&json!("NaN"))), None);
        assert_eq!(parse_weight(Some(&json!([80]))), None);
    }
}
