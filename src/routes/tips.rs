// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static coaching tips, keyed by category.
//!
//! Pure in-memory lookup with no store access. An unknown category is an
//! empty list, never an error.

use axum::{extract::Path, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

struct TipTable {
    category: &'static str,
    tips: &'static [&'static str],
}

const TIP_TABLES: &[TipTable] = &[
    TipTable {
        category: "nutrition",
        tips: &[
            "Eat protein with every meal to support muscle repair.",
            "Plan meals ahead; most diet slips happen when you're improvising hungry.",
            "Hydrate before reaching for a snack; thirst often reads as hunger.",
            "Whole foods keep you fuller per calorie than processed ones.",
            "Track portions for a week before changing anything else.",
        ],
    },
    TipTable {
        category: "training",
        tips: &[
            "Progressive overload beats novelty; add small amounts of weight or reps weekly.",
            "Warm up with lighter sets of the movement you're about to train.",
            "Train a movement pattern at least twice a week to learn it.",
            "Stop sets one or two reps short of failure on most working sets.",
            "Log every session; memory flatters last week's numbers.",
        ],
    },
    TipTable {
        category: "recovery",
        tips: &[
            "Sleep is the highest-leverage recovery tool you have.",
            "Schedule a lighter week every four to six weeks of hard training.",
            "Soreness is not a requirement for progress.",
            "Walking on rest days keeps you moving without adding fatigue.",
        ],
    },
    TipTable {
        category: "mindset",
        tips: &[
            "Consistency over intensity: a mediocre workout done beats a perfect one skipped.",
            "Set process goals (sessions per week), not just outcome goals.",
            "Expect plateaus; they are part of every long training career.",
            "Compare yourself to last month's you, not to anyone else.",
        ],
    },
];

fn tips_for(category: &str) -> &'static [&'static str] {
    TIP_TABLES
        .iter()
        .find(|t| t.category == category)
        .map(|t| t.tips)
        .unwrap_or(&[])
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tips", get(list_categories))
        .route("/tips/{category}", get(get_tips))
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<&'static str>,
}

/// List the available tip categories.
async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: TIP_TABLES.iter().map(|t| t.category).collect(),
    })
}

#[derive(Serialize)]
pub struct TipsResponse {
    pub category: String,
    pub tips: Vec<&'static str>,
}

/// Get the tips for one category.
async fn get_tips(Path(category): Path<String>) -> Json<TipsResponse> {
    let tips = tips_for(&category).to_vec();
    Json(TipsResponse { category, tips })
}
