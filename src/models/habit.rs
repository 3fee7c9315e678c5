// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Habit model: a recurring action tracked inside one hike.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::DailyScoreLog;

/// Points awarded for a completed day on habits created from a template.
pub const DEFAULT_POSITIVE_SCORE: i64 = 10;
/// Points applied for a missed day on habits created from a template.
pub const DEFAULT_NEGATIVE_SCORE: i64 = -5;
/// Weight assigned to habits created from a template.
pub const DEFAULT_WEIGHT: f64 = 1.0;
/// Largest magnitude allowed for `positive_score` and `negative_score`.
pub const MAX_SCORE_MAGNITUDE: i64 = 1_000_000;

/// Stored habit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    /// Owning hike
    pub hike_id: String,
    pub name: String,
    /// Symbolic icon tag (e.g. "run", "book")
    pub icon: String,
    #[serde(default)]
    pub notes: String,
    /// Display multiplier. Not part of the score sum.
    pub weight: f64,
    /// Points for a completed day
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub positive_score: i64,
    /// Points (usually negative) for a missed day
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub negative_score: i64,
}

/// Caller-supplied fields for a new habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub notes: String,
    pub weight: f64,
    pub positive_score: i64,
    pub negative_score: i64,
}

/// Reusable habit shape offered when building a new hike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct HabitTemplate {
    /// Id of the habit the template was taken from
    pub id: String,
    pub name: String,
    pub icon: String,
    pub notes: String,
    pub weight: f64,
}

impl HabitTemplate {
    /// Build a new habit from this template with the default scoring.
    pub fn to_new_habit(&self) -> NewHabit {
        NewHabit {
            name: self.name.clone(),
            icon: self.icon.clone(),
            notes: self.notes.clone(),
            weight: DEFAULT_WEIGHT,
            positive_score: DEFAULT_POSITIVE_SCORE,
            negative_score: DEFAULT_NEGATIVE_SCORE,
        }
    }
}

/// A habit with totals derived from its score logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithDetails {
    #[serde(flatten)]
    pub habit: Habit,
    pub score_logs: Vec<DailyScoreLog>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_score: i64,
    pub completed_days: u32,
    pub missed_days: u32,
    pub total_days: u32,
    /// Percentage of logged days that were completed (0 when nothing is logged)
    pub completion_rate: f64,
    pub current_streak: u32,
}
