// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit aggregation and habit collection operations.
//!
//! Scoring law: a completed day adds the habit's `positive_score`, a missed
//! day adds its `negative_score`. `weight` is carried on the habit but does
//! not enter the sum.

use std::collections::HashSet;

use crate::error::{EngineError, ValidationError};
use crate::models::habit::MAX_SCORE_MAGNITUDE;
use crate::models::{
    new_id, DailyScoreLog, DayScore, Habit, HabitTemplate, HabitWithDetails, NewHabit,
};

/// Fold a habit's score logs into its detail record.
pub fn derive_habit(habit: &Habit, logs: &[DailyScoreLog]) -> HabitWithDetails {
    let score_logs: Vec<DailyScoreLog> = logs
        .iter()
        .filter(|log| log.habit_id == habit.id)
        .cloned()
        .collect();

    let mut total_score = 0i64;
    let mut completed_days = 0u32;
    let mut missed_days = 0u32;
    for log in &score_logs {
        match log.score {
            DayScore::Completed => {
                total_score = total_score.saturating_add(habit.positive_score);
                completed_days += 1;
            }
            DayScore::Missed => {
                total_score = total_score.saturating_add(habit.negative_score);
                missed_days += 1;
            }
        }
    }

    let total_days = completed_days + missed_days;
    let completion_rate = if total_days > 0 {
        f64::from(completed_days) / f64::from(total_days) * 100.0
    } else {
        0.0
    };
    let current_streak = streak_of(&score_logs);

    HabitWithDetails {
        habit: habit.clone(),
        score_logs,
        total_score,
        completed_days,
        missed_days,
        total_days,
        completion_rate,
        current_streak,
    }
}

/// Derive every habit, in collection order.
///
/// Logs whose habit no longer exists are left out of every total.
pub fn derive_habits(habits: &[Habit], logs: &[DailyScoreLog]) -> Vec<HabitWithDetails> {
    let orphaned = orphaned_logs(habits, logs);
    if orphaned > 0 {
        tracing::debug!(orphaned, "Ignoring score logs without a habit");
    }

    habits.iter().map(|habit| derive_habit(habit, logs)).collect()
}

/// Number of logs that reference a habit not present in `habits`.
pub fn orphaned_logs(habits: &[Habit], logs: &[DailyScoreLog]) -> usize {
    let ids: HashSet<&str> = habits.iter().map(|h| h.id.as_str()).collect();
    logs.iter()
        .filter(|log| !ids.contains(log.habit_id.as_str()))
        .count()
}

/// Consecutive completed days counted back from the most recent log.
pub fn current_streak(habit_id: &str, logs: &[DailyScoreLog]) -> u32 {
    let habit_logs: Vec<DailyScoreLog> = logs
        .iter()
        .filter(|log| log.habit_id == habit_id)
        .cloned()
        .collect();
    streak_of(&habit_logs)
}

fn streak_of(habit_logs: &[DailyScoreLog]) -> u32 {
    let mut by_date: Vec<&DailyScoreLog> = habit_logs.iter().collect();
    by_date.sort_by(|a, b| b.date.cmp(&a.date));

    by_date
        .iter()
        .take_while(|log| log.score == DayScore::Completed)
        .count() as u32
}

fn validate_habit_fields(
    name: &str,
    weight: f64,
    positive_score: i64,
    negative_score: i64,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::field("name", "must not be empty"));
    }
    if !weight.is_finite() || weight < 0.0 {
        return Err(ValidationError::field(
            "weight",
            format!("must be a non-negative number, got {}", weight),
        ));
    }
    for (field, score) in [
        ("positiveScore", positive_score),
        ("negativeScore", negative_score),
    ] {
        if !(-MAX_SCORE_MAGNITUDE..=MAX_SCORE_MAGNITUDE).contains(&score) {
            return Err(ValidationError::field(
                field,
                format!("must be within ±{}, got {}", MAX_SCORE_MAGNITUDE, score),
            ));
        }
    }
    Ok(())
}

/// Append a new habit owned by `hike_id`.
pub fn add_habit(
    habits: &[Habit],
    hike_id: &str,
    data: NewHabit,
) -> Result<Vec<Habit>, ValidationError> {
    validate_habit_fields(
        &data.name,
        data.weight,
        data.positive_score,
        data.negative_score,
    )?;

    let habit = Habit {
        id: new_id(),
        hike_id: hike_id.to_string(),
        name: data.name.trim().to_string(),
        icon: data.icon,
        notes: data.notes,
        weight: data.weight,
        positive_score: data.positive_score,
        negative_score: data.negative_score,
    };

    let mut next = habits.to_vec();
    next.push(habit);
    Ok(next)
}

/// Replace a habit in place. Its id selects the record and its owning hike
/// may not change.
pub fn update_habit(habits: &[Habit], mut updated: Habit) -> Result<Vec<Habit>, EngineError> {
    let index = habits
        .iter()
        .position(|h| h.id == updated.id)
        .ok_or_else(|| EngineError::not_found("Habit", &updated.id))?;

    if habits[index].hike_id != updated.hike_id {
        return Err(ValidationError::field("hikeId", "cannot be reassigned").into());
    }
    validate_habit_fields(
        &updated.name,
        updated.weight,
        updated.positive_score,
        updated.negative_score,
    )?;
    updated.name = updated.name.trim().to_string();

    let mut next = habits.to_vec();
    next[index] = updated;
    Ok(next)
}

/// Remove a habit together with all of its score logs.
pub fn delete_habit(
    habits: &[Habit],
    logs: &[DailyScoreLog],
    habit_id: &str,
) -> (Vec<Habit>, Vec<DailyScoreLog>) {
    let remaining_habits = habits
        .iter()
        .filter(|h| h.id != habit_id)
        .cloned()
        .collect();
    let remaining_logs = logs
        .iter()
        .filter(|log| log.habit_id != habit_id)
        .cloned()
        .collect();
    (remaining_habits, remaining_logs)
}

/// Distinct habit shapes across all hikes, keyed by name and icon.
pub fn habit_templates(habits: &[Habit]) -> Vec<HabitTemplate> {
    let mut seen = HashSet::new();
    habits
        .iter()
        .filter(|h| seen.insert((h.name.as_str(), h.icon.as_str())))
        .map(|h| HabitTemplate {
            id: h.id.clone(),
            name: h.name.clone(),
            icon: h.icon.clone(),
            notes: h.notes.clone(),
            weight: h.weight,
        })
        .collect()
}
