// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the progress derivation engine.
//!
//! Everything here is a pure function over an in-memory snapshot: derived
//! views are rebuilt from the base collections on every call and collection
//! operations return new collections instead of mutating their input.

pub mod habit;
pub mod hike;
pub mod milestone;
pub mod score_log;

pub use habit::{derive_habit, derive_habits};
pub use hike::{create_hike, derive_hike, derive_hikes, select_open_hike};
pub use milestone::{project_milestones, MilestoneProjection, MILESTONE_NAMES};
pub use score_log::log_score;
