// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Daily score log model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;

/// Outcome of one habit on one day. Stored as `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum DayScore {
    Missed,
    Completed,
}

impl TryFrom<i64> for DayScore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DayScore::Missed),
            1 => Ok(DayScore::Completed),
            other => Err(ValidationError::Score(other)),
        }
    }
}

impl From<DayScore> for i64 {
    fn from(score: DayScore) -> Self {
        match score {
            DayScore::Missed => 0,
            DayScore::Completed => 1,
        }
    }
}

/// One completed/missed event for a habit on a calendar day.
///
/// At most one log exists per (habit_id, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct DailyScoreLog {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "0 | 1"))]
    pub score: DayScore,
}
