// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Milestone model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A projected progress checkpoint on the way to a hike's target score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    /// Cumulative score threshold
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub score: i64,
    /// Date the threshold is reached at the hike's linear pace
    pub expected_date: NaiveDate,
}
