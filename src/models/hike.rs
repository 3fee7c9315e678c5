// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Hike model: a time-boxed goal that groups habits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;
use crate::models::{HabitWithDetails, Milestone};

/// Lifecycle status of a hike.
///
/// `Draft` and `Active` are open; `Completed` and `Abandoned` are terminal
/// and no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HikeStatus {
    Draft,
    Active,
    Completed,
    Abandoned,
}

impl HikeStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, HikeStatus::Completed | HikeStatus::Abandoned)
    }

    /// DRAFT -> ACTIVE.
    pub fn start(self) -> Result<Self, ValidationError> {
        match self {
            HikeStatus::Draft => Ok(HikeStatus::Active),
            from => Err(ValidationError::Transition {
                from,
                to: HikeStatus::Active,
            }),
        }
    }

    /// Any open status -> COMPLETED.
    pub fn complete(self) -> Result<Self, ValidationError> {
        self.close(HikeStatus::Completed)
    }

    /// Any open status -> ABANDONED.
    pub fn abandon(self) -> Result<Self, ValidationError> {
        self.close(HikeStatus::Abandoned)
    }

    fn close(self, to: HikeStatus) -> Result<Self, ValidationError> {
        if self.is_terminal() {
            return Err(ValidationError::Transition { from: self, to });
        }
        Ok(to)
    }
}

impl fmt::Display for HikeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HikeStatus::Draft => "DRAFT",
            HikeStatus::Active => "ACTIVE",
            HikeStatus::Completed => "COMPLETED",
            HikeStatus::Abandoned => "ABANDONED",
        };
        f.write_str(s)
    }
}

/// Stored hike record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Hike {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    /// 0 means the hike has no tracked target.
    pub target_score: f64,
    pub status: HikeStatus,
}

/// Caller-supplied fields for a new hike. Id and status are assigned by
/// `services::hike::create_hike`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHike {
    pub title: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub target_score: f64,
}

/// A hike with its progress derived from habits and score logs.
///
/// Never persisted; rebuilt from the base collections on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct HikeWithDetails {
    #[serde(flatten)]
    pub hike: Hike,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_score: i64,
    pub progress_percentage: f64,
    pub habits: Vec<HabitWithDetails>,
    pub milestones: Vec<Milestone>,
    pub next_milestone: Option<Milestone>,
}
