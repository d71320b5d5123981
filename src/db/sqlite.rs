// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite store wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage, onboarding flag)
//! - Workout/nutrition plans (insert-only rows, latest-wins reads)
//! - Progress resets (shallow and fully transactional deep variant)
//!
//! The pool is created once at startup and shared by every handler
//! through `AppState`; nothing here closes it between requests.

use crate::error::AppError;
use crate::models::plan::{PlanKind, PlanRecord};
use crate::models::user::User;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, name, age, sex, height, weight, \
     target_weight, starting_weight, goal_type, experience_level, \
     preferred_workout_days, weak_points, favorite_foods, allergies, \
     target_date, has_completed_onboarding, created_at, updated_at";

const PLAN_COLUMNS: &str =
    "id, user_id, plan_name, plan, start_date, end_date, created_at, updated_at";

/// SQLite database client.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database at `url` and apply the schema.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let db = Self { pool };
        db.apply_schema().await?;

        tracing::info!(url, "Connected to SQLite");
        Ok(db)
    }

    /// In-memory database for tests.
    ///
    /// A `:memory:` database exists per connection, so the pool is pinned
    /// to a single connection that never expires.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::Database(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<std::time::Duration>)
            .max_lifetime(None::<std::time::Duration>)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self { pool };
        db.apply_schema().await?;
        Ok(db)
    }

    async fn apply_schema(&self) -> Result<(), AppError> {
        sqlx::raw_sql(include_str!("schema.sql"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Get connection pool reference.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user row with an empty profile.
    ///
    /// User creation belongs to the identity layer at first sign-in; this
    /// is the seam it (and the test suite) goes through.
    pub async fn create_user(&self, email: &str) -> Result<User, AppError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: None,
            age: None,
            sex: None,
            height: None,
            weight: None,
            target_weight: None,
            starting_weight: None,
            goal_type: None,
            experience_level: None,
            preferred_workout_days: Json(Vec::new()),
            weak_points: Json(Vec::new()),
            favorite_foods: Json(Vec::new()),
            allergies: Json(Vec::new()),
            target_date: None,
            has_completed_onboarding: false,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO users (id, email, preferred_workout_days, weak_points, \
             favorite_foods, allergies, has_completed_onboarding, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.preferred_workout_days)
        .bind(&user.weak_points)
        .bind(&user.favorite_foods)
        .bind(&user.allergies)
        .bind(user.has_completed_onboarding)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by id.
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Write a user's profile columns back to the row.
    ///
    /// Callers fetch, modify the struct, and save; each write is an
    /// unconditional last-write-wins update (no version check).
    pub async fn save_profile(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET name = ?, age = ?, sex = ?, height = ?, weight = ?, \
             target_weight = ?, starting_weight = ?, goal_type = ?, experience_level = ?, \
             preferred_workout_days = ?, weak_points = ?, favorite_foods = ?, allergies = ?, \
             target_date = ?, has_completed_onboarding = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.sex)
        .bind(user.height)
        .bind(user.weight)
        .bind(user.target_weight)
        .bind(user.starting_weight)
        .bind(&user.goal_type)
        .bind(&user.experience_level)
        .bind(&user.preferred_workout_days)
        .bind(&user.weak_points)
        .bind(&user.favorite_foods)
        .bind(&user.allergies)
        .bind(user.target_date)
        .bind(user.has_completed_onboarding)
        .bind(Utc::now())
        .bind(&user.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Update only the stored weight.
    pub async fn set_weight(&self, user_id: &str, weight: f64) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET weight = ?, updated_at = ? WHERE id = ?")
            .bind(weight)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ─── Plan Operations ─────────────────────────────────────────

    /// Insert a new plan row. Plans are never updated in place; each
    /// submission creates a fresh row and reads pick the most recent.
    pub async fn insert_plan(
        &self,
        kind: PlanKind,
        user_id: &str,
        plan_name: &str,
        plan: Value,
        start_date: chrono::DateTime<Utc>,
        end_date: Option<chrono::DateTime<Utc>>,
    ) -> Result<PlanRecord, AppError> {
        let now = Utc::now();
        let record = PlanRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            plan_name: plan_name.to_string(),
            plan: Some(Json(plan)),
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO {} ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            kind.table(),
            PLAN_COLUMNS
        ))
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(&record.plan_name)
        .bind(&record.plan)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Fetch the user's most recent plan of the given kind.
    ///
    /// "Current plan" is purely a recency derivation; there is no
    /// active-plan pointer to consult.
    pub async fn latest_plan(
        &self,
        kind: PlanKind,
        user_id: &str,
    ) -> Result<Option<PlanRecord>, AppError> {
        let record = sqlx::query_as::<_, PlanRecord>(&format!(
            "SELECT {} FROM {} WHERE user_id = ? ORDER BY created_at DESC LIMIT 1",
            PLAN_COLUMNS,
            kind.table()
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    // ─── Reset Operations ────────────────────────────────────────

    /// Shallow reset: clear progress fields and drop all plan rows.
    ///
    /// Issued as independent statements; a mid-sequence failure can leave
    /// some steps applied. The deep variant below is the transactional
    /// one.
    pub async fn reset_progress(&self, user_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM workout_plans WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        sqlx::query("DELETE FROM nutrition_plans WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "UPDATE users SET weight = NULL, height = NULL, goal_type = NULL, \
             experience_level = NULL, target_date = NULL, \
             weak_points = '[]', favorite_foods = '[]', allergies = '[]', \
             has_completed_onboarding = 0, updated_at = ? \
             WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deep reset: delete every plan row and null the full profile, as a
    /// single transaction.
    ///
    /// Invariant: all-or-nothing. A concurrent reader sees either the
    /// fully-old or fully-new state, never plans gone with the profile
    /// still filled in (or the reverse).
    pub async fn full_reset(&self, user_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM workout_plans WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM nutrition_plans WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE users SET age = NULL, sex = NULL, weight = NULL, height = NULL, \
             target_weight = NULL, starting_weight = NULL, goal_type = NULL, \
             experience_level = NULL, target_date = NULL, \
             preferred_workout_days = '[]', weak_points = '[]', favorite_foods = '[]', \
             allergies = '[]', has_completed_onboarding = 0, updated_at = ? \
             WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
