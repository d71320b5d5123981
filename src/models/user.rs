//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// User row as stored in the `users` table.
///
/// Profile attributes are nullable: a freshly signed-in user has only an
/// id and email until onboarding fills the rest in. The four list fields
/// are JSON text columns and default to empty lists.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub starting_weight: Option<f64>,
    pub goal_type: Option<String>,
    pub experience_level: Option<String>,
    pub preferred_workout_days: Json<Vec<String>>,
    pub weak_points: Json<Vec<String>>,
    pub favorite_foods: Json<Vec<String>>,
    pub allergies: Json<Vec<String>>,
    pub target_date: Option<DateTime<Utc>>,
    pub has_completed_onboarding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile projection returned to the frontend.
///
/// `current_weight` intentionally duplicates `weight`; the frontend reads
/// both names depending on the view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub starting_weight: Option<f64>,
    pub goal_type: Option<String>,
    pub experience_level: Option<String>,
    pub preferred_workout_days: Vec<String>,
    pub weak_points: Vec<String>,
    pub favorite_foods: Vec<String>,
    pub allergies: Vec<String>,
    pub target_date: Option<DateTime<Utc>>,
    pub has_completed_onboarding: bool,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            age: user.age,
            sex: user.sex.clone(),
            height: user.height,
            weight: user.weight,
            current_weight: user.weight,
            target_weight: user.target_weight,
            starting_weight: user.starting_weight,
            goal_type: user.goal_type.clone(),
            experience_level: user.experience_level.clone(),
            preferred_workout_days: user.preferred_workout_days.0.clone(),
            weak_points: user.weak_points.0.clone(),
            favorite_foods: user.favorite_foods.0.clone(),
            allergies: user.allergies.0.clone(),
            target_date: user.target_date,
            has_completed_onboarding: user.has_completed_onboarding,
        }
    }
}

/// Partial profile update payload for `PUT /user/profile`.
///
/// Only the keys present in the request are written; everything else keeps
/// its stored value (last write wins per key, no merge beyond that).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal_type: Option<String>,
    pub experience_level: Option<String>,
    pub target_weight: Option<f64>,
    pub target_date: Option<DateTime<Utc>>,
}

/// The subset of fields `PUT /user/profile` manages, echoed back after the
/// update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub name: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal_type: Option<String>,
    pub experience_level: Option<String>,
    pub target_weight: Option<f64>,
    pub target_date: Option<DateTime<Utc>>,
}

/// Onboarding payload for `POST /user/complete-onboarding`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub starting_weight: Option<f64>,
    pub goal_type: Option<String>,
    pub experience_level: Option<String>,
    pub preferred_workout_days: Option<Vec<String>>,
    pub weak_points: Option<Vec<String>>,
    pub favorite_foods: Option<Vec<String>>,
    pub allergies: Option<Vec<String>>,
    pub target_date: Option<DateTime<Utc>>,
}
