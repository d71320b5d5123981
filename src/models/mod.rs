// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod plan;
pub mod user;

pub use plan::{PlanKind, PlanRecord};
pub use user::User;
