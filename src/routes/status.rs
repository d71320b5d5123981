// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregate user status: onboarding flag plus latest-plan existence.

use crate::error::{AppError, Result};
use crate::middleware::auth::Principal;
use crate::models::plan::{plan_doc_is_usable, PlanKind, PlanRecord};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/user/status", get(get_status))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub has_completed_onboarding: bool,
    pub has_workout_plan: bool,
    pub has_nutrition_plan: bool,
    /// Raw stored document of the latest plan row, or null.
    pub workout_plan: Value,
    pub nutrition_plan: Value,
}

fn doc_of(record: &Option<PlanRecord>) -> Value {
    record
        .as_ref()
        .and_then(|r| r.plan.as_ref())
        .map(|j| j.0.clone())
        .unwrap_or(Value::Null)
}

/// A plan counts only when the row exists and its document is usable; a
/// row whose document is null or empty reports as "no plan".
fn has_plan(record: &Option<PlanRecord>) -> bool {
    record
        .as_ref()
        .is_some_and(|r| plan_doc_is_usable(r.plan.as_ref().map(|j| &j.0)))
}

/// Get onboarding/plan status for the current user.
async fn get_status(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<StatusResponse>> {
    let user = state
        .db
        .get_user_by_email(&principal.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let workout = state.db.latest_plan(PlanKind::Workout, &user.id).await?;
    let nutrition = state.db.latest_plan(PlanKind::Nutrition, &user.id).await?;

    Ok(Json(StatusResponse {
        has_completed_onboarding: user.has_completed_onboarding,
        has_workout_plan: has_plan(&workout),
        has_nutrition_plan: has_plan(&nutrition),
        workout_plan: doc_of(&workout),
        nutrition_plan: doc_of(&nutrition),
    }))
}
