// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress reset routes.
//!
//! Two variants with different scope: the shallow reset clears progress
//! fields and plans as independent statements, the deep reset also wipes
//! body stats and runs as a single transaction. The reset endpoints only
//! advertise 401/500; a missing user row falls through to the generic
//! internal error rather than a 404.

use crate::error::{AppError, Result};
use crate::middleware::auth::Principal;
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/reset-progress", post(reset_progress))
        .route("/user/reset", post(full_reset))
}

async fn resolve_user_id(state: &AppState, principal: &Principal) -> Result<String> {
    let user = state
        .db
        .get_user_by_email(&principal.email)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "user row missing for reset: {}",
                principal.email
            ))
        })?;
    Ok(user.id)
}

#[derive(Serialize)]
pub struct ResetProgressResponse {
    pub success: bool,
}

/// Shallow reset: clear progress fields and delete all plans.
async fn reset_progress(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ResetProgressResponse>> {
    let user_id = resolve_user_id(&state, &principal).await?;

    state.db.reset_progress(&user_id).await?;

    tracing::info!(user_id = %user_id, "Progress reset");

    Ok(Json(ResetProgressResponse { success: true }))
}

#[derive(Serialize)]
pub struct FullResetResponse {
    pub message: String,
}

/// Deep reset: wipe the full profile and all plans atomically.
async fn full_reset(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<FullResetResponse>> {
    let user_id = resolve_user_id(&state, &principal).await?;

    state.db.full_reset(&user_id).await?;

    tracing::info!(user_id = %user_id, "Full reset");

    Ok(Json(FullResetResponse {
        message: "User progress has been reset".to_string(),
    }))
}
