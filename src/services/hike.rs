// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hike aggregation, open-hike selection and hike lifecycle operations.

use chrono::NaiveDate;

use crate::error::{EngineError, ValidationError};
use crate::models::{new_id, HabitWithDetails, Hike, HikeStatus, HikeWithDetails, NewHike};
use crate::services::milestone::project_milestones;

/// Combine a hike with its derived habits and milestone projection.
pub fn derive_hike(hike: &Hike, derived_habits: &[HabitWithDetails]) -> HikeWithDetails {
    let habits: Vec<HabitWithDetails> = derived_habits
        .iter()
        .filter(|h| h.habit.hike_id == hike.id)
        .cloned()
        .collect();

    let total_score = habits
        .iter()
        .fold(0i64, |sum, h| sum.saturating_add(h.total_score));
    let progress_percentage = if hike.target_score > 0.0 {
        total_score as f64 / hike.target_score * 100.0
    } else {
        0.0
    };

    let projection = project_milestones(
        hike.start_date,
        hike.target_date,
        hike.target_score,
        total_score,
    );

    HikeWithDetails {
        hike: hike.clone(),
        total_score,
        progress_percentage,
        habits,
        milestones: projection.milestones,
        next_milestone: projection.next_milestone,
    }
}

/// Derive every hike, in collection order.
pub fn derive_hikes(hikes: &[Hike], derived_habits: &[HabitWithDetails]) -> Vec<HikeWithDetails> {
    hikes
        .iter()
        .map(|hike| derive_hike(hike, derived_habits))
        .collect()
}

/// The hike currently in a non-terminal status.
///
/// Normally there is at most one. If the data holds several, the most
/// recently created (last in collection order) wins.
pub fn select_open_hike(derived_hikes: &[HikeWithDetails]) -> Option<&HikeWithDetails> {
    let open: Vec<&HikeWithDetails> = derived_hikes
        .iter()
        .filter(|h| !h.hike.status.is_terminal())
        .collect();

    if open.len() > 1 {
        tracing::warn!(
            count = open.len(),
            ids = ?open.iter().map(|h| h.hike.id.as_str()).collect::<Vec<_>>(),
            "More than one open hike; selecting the most recent"
        );
    }

    open.last().copied()
}

fn validate_new_hike(data: &NewHike) -> Result<(), ValidationError> {
    if data.title.trim().is_empty() {
        return Err(ValidationError::field("title", "must not be empty"));
    }
    if !data.target_score.is_finite() || data.target_score < 0.0 {
        return Err(ValidationError::field(
            "targetScore",
            format!("must be a non-negative number, got {}", data.target_score),
        ));
    }
    if data.target_date < data.start_date {
        return Err(ValidationError::field(
            "targetDate",
            "must not be before startDate",
        ));
    }
    Ok(())
}

/// Start a new hike in DRAFT.
///
/// Every hike that is still open is retired to COMPLETED first, so on
/// success the new hike is the only open one.
pub fn create_hike(hikes: &[Hike], data: NewHike) -> Result<Vec<Hike>, ValidationError> {
    validate_new_hike(&data)?;

    let mut next: Vec<Hike> = hikes.to_vec();
    for hike in next.iter_mut().filter(|h| !h.status.is_terminal()) {
        hike.status = hike.status.complete()?;
        tracing::info!(hike_id = %hike.id, "Retired open hike");
    }

    next.push(Hike {
        id: new_id(),
        title: data.title.trim().to_string(),
        start_date: data.start_date,
        target_date: data.target_date,
        target_score: data.target_score,
        status: HikeStatus::Draft,
    });

    debug_assert_eq!(
        next.iter().filter(|h| !h.status.is_terminal()).count(),
        1
    );
    Ok(next)
}

fn transition(
    hikes: &[Hike],
    hike_id: &str,
    apply: impl FnOnce(HikeStatus) -> Result<HikeStatus, ValidationError>,
) -> Result<Vec<Hike>, EngineError> {
    let index = hikes
        .iter()
        .position(|h| h.id == hike_id)
        .ok_or_else(|| EngineError::not_found("Hike", hike_id))?;

    let mut next = hikes.to_vec();
    next[index].status = apply(next[index].status)?;
    Ok(next)
}

/// DRAFT -> ACTIVE.
pub fn start_hike(hikes: &[Hike], hike_id: &str) -> Result<Vec<Hike>, EngineError> {
    transition(hikes, hike_id, HikeStatus::start)
}

/// Open -> COMPLETED.
pub fn complete_hike(hikes: &[Hike], hike_id: &str) -> Result<Vec<Hike>, EngineError> {
    transition(hikes, hike_id, HikeStatus::complete)
}

/// Open -> ABANDONED.
pub fn abandon_hike(hikes: &[Hike], hike_id: &str) -> Result<Vec<Hike>, EngineError> {
    transition(hikes, hike_id, HikeStatus::abandon)
}

/// 1-based day counter of a hike as of `today`.
pub fn hike_day_number(hike: &Hike, today: NaiveDate) -> i64 {
    (today - hike.start_date).num_days() + 1
}
