// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout and nutrition plan models.
//!
//! The two plan tables have identical shapes; handlers and store
//! operations are parameterized by [`PlanKind`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;

/// Which plan table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    Workout,
    Nutrition,
}

impl PlanKind {
    /// Table name. Only ever interpolated from these fixed strings.
    pub fn table(self) -> &'static str {
        match self {
            PlanKind::Workout => "workout_plans",
            PlanKind::Nutrition => "nutrition_plans",
        }
    }

    pub fn default_plan_name(self) -> &'static str {
        match self {
            PlanKind::Workout => "Workout Plan",
            PlanKind::Nutrition => "Nutrition Plan",
        }
    }

    pub fn not_found_message(self) -> &'static str {
        match self {
            PlanKind::Workout => "No workout plan found",
            PlanKind::Nutrition => "No nutrition plan found",
        }
    }

    pub fn missing_payload_message(self) -> &'static str {
        match self {
            PlanKind::Workout => "Workout plan data is required",
            PlanKind::Nutrition => "Nutrition plan data is required",
        }
    }
}

/// Plan row as stored in `workout_plans` / `nutrition_plans`.
///
/// The `plan` column is an opaque JSON document; the server stores and
/// returns it without interpreting its internal structure.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub id: String,
    pub user_id: String,
    pub plan_name: String,
    pub plan: Option<Json<Value>>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether a stored plan document counts as present.
///
/// A row can exist while its document is effectively empty; such a row
/// does not count as having a plan. SQL NULL, JSON null, `""`, and `{}`
/// are all treated as absent.
pub fn plan_doc_is_usable(doc: Option<&Value>) -> bool {
    match doc {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn usable_doc_detection() {
        assert!(!plan_doc_is_usable(None));
        assert!(!plan_doc_is_usable(Some(&Value::Null)));
        assert!(!plan_doc_is_usable(Some(&json!({}))));
        assert!(!plan_doc_is_usable(Some(&json!(""))));
        assert!(plan_doc_is_usable(Some(&json!({"days": []}))));
        assert!(plan_doc_is_usable(Some(&json!([1, 2, 3]))));
    }
}
