// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Milestone projection.
//!
//! Splits a hike's target score into ten evenly spaced checkpoints and
//! projects when each one is reached if points accrue at a constant daily
//! rate between the start date and the target date.

use chrono::{Days, NaiveDate};

use crate::models::Milestone;

/// Checkpoint names, lowest threshold first.
pub const MILESTONE_NAMES: [&str; 10] = [
    "Base Camp",
    "Foothills",
    "Ridge Line",
    "Ice Fall",
    "The Ledge",
    "Crevasse Field",
    "High Camp",
    "The Traverse",
    "Hillary Step",
    "Summit",
];

/// Projected milestone schedule for one hike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilestoneProjection {
    /// Either empty or exactly one entry per name in [`MILESTONE_NAMES`].
    pub milestones: Vec<Milestone>,
    /// First milestone whose score is above the current total.
    pub next_milestone: Option<Milestone>,
}

/// Project the milestone schedule for a hike.
///
/// A hike without a positive target score, or whose target date is not
/// after its start date, gets no milestones. That is the untracked case,
/// not an error.
pub fn project_milestones(
    start_date: NaiveDate,
    target_date: NaiveDate,
    target_score: f64,
    total_score: i64,
) -> MilestoneProjection {
    let duration_days = (target_date - start_date).num_days();
    if !target_score.is_finite() || target_score <= 0.0 || duration_days <= 0 {
        return MilestoneProjection::default();
    }

    let expected_rate = target_score / duration_days as f64;
    let steps = MILESTONE_NAMES.len() as f64;

    let milestones: Vec<Milestone> = MILESTONE_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            // Each threshold is rounded on its own, not accumulated.
            let score = (target_score / steps * (i + 1) as f64).round() as i64;
            let days_to_reach = ((score as f64 / expected_rate).round() as i64).max(1);
            let expected_date = start_date
                .checked_add_days(Days::new(days_to_reach as u64))
                .unwrap_or(target_date);

            Milestone {
                name: (*name).to_string(),
                score,
                expected_date,
            }
        })
        .collect();

    let next_milestone = milestones.iter().find(|m| m.score > total_score).cloned();

    MilestoneProjection {
        milestones,
        next_milestone,
    }
}
