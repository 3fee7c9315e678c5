// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily score log ledger.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::models::{new_id, DailyScoreLog, DayScore};

/// Record `score` for `habit_id` on `date`.
///
/// An existing log for the same (habit, date) is replaced in place and keeps
/// its id and position; otherwise a new log is appended. The input slice is
/// never modified.
pub fn log_score(
    logs: &[DailyScoreLog],
    habit_id: &str,
    date: NaiveDate,
    score: i64,
) -> Result<Vec<DailyScoreLog>, ValidationError> {
    let score = DayScore::try_from(score)?;
    let mut next = logs.to_vec();

    match next
        .iter_mut()
        .find(|log| log.habit_id == habit_id && log.date == date)
    {
        Some(existing) => existing.score = score,
        None => next.push(DailyScoreLog {
            id: new_id(),
            habit_id: habit_id.to_string(),
            date,
            score,
        }),
    }

    Ok(next)
}
