// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API over the session: hikes, habits and score logs.

use crate::error::{AppError, Result};
use crate::models::habit::MAX_SCORE_MAGNITUDE;
use crate::models::{
    Habit, HabitTemplate, HabitWithDetails, Hike, HikeWithDetails, NewHabit, NewHike,
};
use crate::services::hike::hike_day_number;
use crate::time_utils::today;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_NAME_LEN: u64 = 100;
const MAX_ICON_LEN: u64 = 50;
const MAX_NOTES_LEN: u64 = 2000;
const MIN_SCORE: i64 = -MAX_SCORE_MAGNITUDE;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/hikes", get(list_hikes).post(create_hike))
        .route("/api/hikes/open", get(get_open_hike))
        .route("/api/hikes/{id}/start", post(start_hike))
        .route("/api/hikes/{id}/complete", post(complete_hike))
        .route("/api/hikes/{id}/abandon", post(abandon_hike))
        .route("/api/hikes/{id}/habits", post(add_habit))
        .route(
            "/api/hikes/{id}/habits/from-template",
            post(add_habit_from_template),
        )
        .route("/api/habits/templates", get(list_templates))
        .route("/api/habits/{id}", put(update_habit).delete(delete_habit))
        .route("/api/habits/{id}/scores", post(log_score))
}

// ─── Hikes ───────────────────────────────────────────────────

/// All hikes with derived progress.
async fn list_hikes(State(state): State<Arc<AppState>>) -> Json<Vec<HikeWithDetails>> {
    let session = state.session.lock().await;
    let hikes = session.derived_hikes();
    tracing::debug!(count = hikes.len(), "Listing hikes");
    Json(hikes)
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct OpenHikeResponse {
    pub hike: Option<HikeWithDetails>,
    /// 1-based day of the open hike as of today
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub day_number: Option<i64>,
}

/// The hike the user is currently working on, if any.
async fn get_open_hike(State(state): State<Arc<AppState>>) -> Json<OpenHikeResponse> {
    let session = state.session.lock().await;
    let hike = session.open_hike();
    let day_number = hike.as_ref().map(|h| hike_day_number(&h.hike, today()));

    Json(OpenHikeResponse { hike, day_number })
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateHikeRequest {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    title: String,
    /// Defaults to today
    start_date: Option<NaiveDate>,
    target_date: NaiveDate,
    /// 0 (or absent) means no tracked target
    #[serde(default)]
    #[validate(range(min = 0.0))]
    target_score: f64,
}

/// Create a new hike. Any hike still open is marked completed.
async fn create_hike(
    State(state): State<Arc<AppState>>,
    Json(params): Json<CreateHikeRequest>,
) -> Result<Json<Hike>> {
    params.validate()?;

    let data = NewHike {
        title: params.title,
        start_date: params.start_date.unwrap_or_else(today),
        target_date: params.target_date,
        target_score: params.target_score,
    };

    let hike = state.session.lock().await.create_hike(data)?;
    Ok(Json(hike))
}

async fn start_hike(
    State(state): State<Arc<AppState>>,
    Path(hike_id): Path<String>,
) -> Result<Json<Hike>> {
    Ok(Json(state.session.lock().await.start_hike(&hike_id)?))
}

async fn complete_hike(
    State(state): State<Arc<AppState>>,
    Path(hike_id): Path<String>,
) -> Result<Json<Hike>> {
    Ok(Json(state.session.lock().await.complete_hike(&hike_id)?))
}

async fn abandon_hike(
    State(state): State<Arc<AppState>>,
    Path(hike_id): Path<String>,
) -> Result<Json<Hike>> {
    Ok(Json(state.session.lock().await.abandon_hike(&hike_id)?))
}

// ─── Habits ──────────────────────────────────────────────────

fn default_weight() -> f64 {
    crate::models::habit::DEFAULT_WEIGHT
}
fn default_positive_score() -> i64 {
    crate::models::habit::DEFAULT_POSITIVE_SCORE
}
fn default_negative_score() -> i64 {
    crate::models::habit::DEFAULT_NEGATIVE_SCORE
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateHabitRequest {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    name: String,
    #[serde(default)]
    #[validate(length(max = MAX_ICON_LEN))]
    icon: String,
    #[serde(default)]
    #[validate(length(max = MAX_NOTES_LEN))]
    notes: String,
    #[serde(default = "default_weight")]
    #[validate(range(min = 0.0))]
    weight: f64,
    #[serde(default = "default_positive_score")]
    #[validate(range(min = MIN_SCORE, max = MAX_SCORE_MAGNITUDE))]
    positive_score: i64,
    #[serde(default = "default_negative_score")]
    #[validate(range(min = MIN_SCORE, max = MAX_SCORE_MAGNITUDE))]
    negative_score: i64,
}

/// Add a habit to a hike.
async fn add_habit(
    State(state): State<Arc<AppState>>,
    Path(hike_id): Path<String>,
    Json(params): Json<CreateHabitRequest>,
) -> Result<Json<Habit>> {
    params.validate()?;

    let data = NewHabit {
        name: params.name,
        icon: params.icon,
        notes: params.notes,
        weight: params.weight,
        positive_score: params.positive_score,
        negative_score: params.negative_score,
    };

    let habit = state.session.lock().await.add_habit(&hike_id, data)?;
    Ok(Json(habit))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct FromTemplateRequest {
    #[validate(length(min = 1))]
    template_id: String,
}

/// Add a habit to a hike by copying a habit from an earlier hike.
async fn add_habit_from_template(
    State(state): State<Arc<AppState>>,
    Path(hike_id): Path<String>,
    Json(params): Json<FromTemplateRequest>,
) -> Result<Json<Habit>> {
    params.validate()?;

    let habit = state
        .session
        .lock()
        .await
        .add_habit_from_template(&hike_id, &params.template_id)?;
    Ok(Json(habit))
}

/// Habit shapes that can be reused in a new hike.
async fn list_templates(State(state): State<Arc<AppState>>) -> Json<Vec<HabitTemplate>> {
    Json(state.session.lock().await.habit_templates())
}

/// Partial habit update. The owning hike cannot be changed.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateHabitRequest {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    name: Option<String>,
    #[validate(length(max = MAX_ICON_LEN))]
    icon: Option<String>,
    #[validate(length(max = MAX_NOTES_LEN))]
    notes: Option<String>,
    #[validate(range(min = 0.0))]
    weight: Option<f64>,
    #[validate(range(min = MIN_SCORE, max = MAX_SCORE_MAGNITUDE))]
    positive_score: Option<i64>,
    #[validate(range(min = MIN_SCORE, max = MAX_SCORE_MAGNITUDE))]
    negative_score: Option<i64>,
}

async fn update_habit(
    State(state): State<Arc<AppState>>,
    Path(habit_id): Path<String>,
    Json(params): Json<UpdateHabitRequest>,
) -> Result<Json<Habit>> {
    params.validate()?;

    let mut session = state.session.lock().await;
    let mut habit = session
        .find_habit(&habit_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Habit {} not found", habit_id)))?;

    if let Some(name) = params.name {
        habit.name = name;
    }
    if let Some(icon) = params.icon {
        habit.icon = icon;
    }
    if let Some(notes) = params.notes {
        habit.notes = notes;
    }
    if let Some(weight) = params.weight {
        habit.weight = weight;
    }
    if let Some(positive_score) = params.positive_score {
        habit.positive_score = positive_score;
    }
    if let Some(negative_score) = params.negative_score {
        habit.negative_score = negative_score;
    }

    Ok(Json(session.update_habit(habit)?))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct DeleteHabitResponse {
    pub success: bool,
    /// Score logs removed along with the habit
    pub removed_logs: usize,
}

/// Delete a habit and all of its score logs.
async fn delete_habit(
    State(state): State<Arc<AppState>>,
    Path(habit_id): Path<String>,
) -> Result<Json<DeleteHabitResponse>> {
    let removed_logs = state.session.lock().await.delete_habit(&habit_id)?;
    Ok(Json(DeleteHabitResponse {
        success: true,
        removed_logs,
    }))
}

// ─── Score Logs ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LogScoreRequest {
    /// Defaults to today
    date: Option<NaiveDate>,
    /// 0 = missed, 1 = completed
    score: i64,
}

/// Record a day's outcome for a habit. Re-logging a day replaces it.
async fn log_score(
    State(state): State<Arc<AppState>>,
    Path(habit_id): Path<String>,
    Json(params): Json<LogScoreRequest>,
) -> Result<Json<HabitWithDetails>> {
    let date = params.date.unwrap_or_else(today);
    tracing::debug!(habit_id = %habit_id, %date, score = params.score, "Logging score");

    let details = state
        .session
        .lock()
        .await
        .log_score(&habit_id, date, params.score)?;
    Ok(Json(details))
}
