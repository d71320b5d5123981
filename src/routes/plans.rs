// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout and nutrition plan routes.
//!
//! Both plan kinds share the same handler logic, parameterized by
//! [`PlanKind`]. Plan documents are opaque: the server stores what the
//! generator produced and returns it untouched, flattened into the
//! response alongside the row's bookkeeping fields.

use crate::error::{AppError, Result};
use crate::middleware::auth::Principal;
use crate::models::plan::{PlanKind, PlanRecord};
use crate::models::user::User;
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// New plans are valid for a fixed window from submission.
const PLAN_VALIDITY_DAYS: i64 = 30;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/workout/plan", get(get_workout_plan))
        .route("/user/nutrition/plan", get(get_nutrition_plan))
        .route("/user/workout/update", post(create_workout_plan))
        .route("/user/nutrition/update", post(create_nutrition_plan))
}

async fn resolve_user(state: &AppState, principal: &Principal) -> Result<User> {
    state
        .db
        .get_user_by_email(&principal.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

// ─── Fetch Latest Plan ───────────────────────────────────────

/// Flatten the stored document's top-level keys into the response and
/// overlay the row's bookkeeping fields. Bookkeeping wins on collision;
/// a non-object document contributes no keys of its own.
fn flatten_plan(record: &PlanRecord) -> Value {
    let mut body = match record.plan.as_ref().map(|j| &j.0) {
        Some(Value::Object(map)) => map.clone(),
        _ => serde_json::Map::new(),
    };

    body.insert("id".to_string(), json!(record.id));
    body.insert("planName".to_string(), json!(record.plan_name));
    body.insert("startDate".to_string(), json!(record.start_date));
    body.insert("endDate".to_string(), json!(record.end_date));
    body.insert("createdAt".to_string(), json!(record.created_at));
    body.insert("updatedAt".to_string(), json!(record.updated_at));

    Value::Object(body)
}

async fn get_plan(
    state: Arc<AppState>,
    principal: Principal,
    kind: PlanKind,
) -> Result<impl IntoResponse> {
    let user = resolve_user(&state, &principal).await?;

    let record = state
        .db
        .latest_plan(kind, &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(kind.not_found_message().to_string()))?;

    tracing::debug!(user_id = %user.id, plan_id = %record.id, ?kind, "Returning latest plan");

    // Plan reads must always reflect the latest write, so caching is
    // disabled end to end.
    let no_cache = [
        (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
    ];

    Ok((no_cache, Json(flatten_plan(&record))))
}

/// Get the user's current workout plan.
async fn get_workout_plan(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    get_plan(state, principal, PlanKind::Workout).await
}

/// Get the user's current nutrition plan.
async fn get_nutrition_plan(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    get_plan(state, principal, PlanKind::Nutrition).await
}

// ─── Create Plan ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePlanRequest {
    plan: Option<Value>,
    plan_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanCreated {
    pub workout_plan: PlanRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPlanCreated {
    pub nutrition_plan: PlanRecord,
}

async fn create_plan(
    state: Arc<AppState>,
    principal: Principal,
    kind: PlanKind,
    payload: CreatePlanRequest,
) -> Result<PlanRecord> {
    let plan = match payload.plan {
        Some(Value::Null) | None => {
            return Err(AppError::BadRequest(
                kind.missing_payload_message().to_string(),
            ))
        }
        Some(plan) => plan,
    };

    let user = resolve_user(&state, &principal).await?;

    let plan_name = payload
        .plan_name
        .unwrap_or_else(|| kind.default_plan_name().to_string());

    let start_date = chrono::Utc::now();
    let end_date = start_date + chrono::Duration::days(PLAN_VALIDITY_DAYS);

    let record = state
        .db
        .insert_plan(kind, &user.id, &plan_name, plan, start_date, Some(end_date))
        .await?;

    tracing::info!(user_id = %user.id, plan_id = %record.id, ?kind, "Plan created");

    Ok(record)
}

/// Store a newly generated workout plan.
async fn create_workout_plan(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreatePlanRequest>,
) -> Result<Json<WorkoutPlanCreated>> {
    let record = create_plan(state, principal, PlanKind::Workout, payload).await?;
    Ok(Json(WorkoutPlanCreated {
        workout_plan: record,
    }))
}

/// Store a newly generated nutrition plan.
async fn create_nutrition_plan(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreatePlanRequest>,
) -> Result<Json<NutritionPlanCreated>> {
    let record = create_plan(state, principal, PlanKind::Nutrition, payload).await?;
    Ok(Json(NutritionPlanCreated {
        nutrition_plan: record,
    }))
}
