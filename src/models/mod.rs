// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.
//!
//! Each entity has a persisted base type and, where the engine derives
//! progress from it, a separate `*WithDetails` view type.

pub mod habit;
pub mod hike;
pub mod milestone;
pub mod score_log;

pub use habit::{Habit, HabitTemplate, HabitWithDetails, NewHabit};
pub use hike::{Hike, HikeStatus, HikeWithDetails, NewHike};
pub use milestone::Milestone;
pub use score_log::{DailyScoreLog, DayScore};

/// Generate a fresh, time-ordered identifier for a new record.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
