// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use chrono::NaiveDate;
use habit_hike::config::Config;
use habit_hike::db::MemoryStore;
use habit_hike::models::{NewHabit, NewHike};
use habit_hike::routes::create_router;
use habit_hike::session::Session;
use habit_hike::AppState;
use serde_json::Value;
use std::sync::Arc;

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(dead_code)]
pub fn new_hike(title: &str, target_score: f64) -> NewHike {
    NewHike {
        title: title.to_string(),
        start_date: date(2024, 1, 1),
        target_date: date(2024, 4, 10),
        target_score,
    }
}

#[allow(dead_code)]
pub fn new_habit(name: &str, icon: &str) -> NewHabit {
    NewHabit {
        name: name.to_string(),
        icon: icon.to_string(),
        notes: String::new(),
        weight: 1.0,
        positive_score: 10,
        negative_score: -5,
    }
}

/// Create a test app backed by an empty in-memory store.
/// Returns the router, the shared state and a handle on the store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryStore) {
    create_test_app_with(MemoryStore::new())
}

/// Create a test app over an existing store, e.g. one built with
/// `MemoryStore::with_data`.
#[allow(dead_code)]
pub fn create_test_app_with(store: MemoryStore) -> (axum::Router, Arc<AppState>, MemoryStore) {
    let session = Session::open(Box::new(store.clone()));
    let state = Arc::new(AppState::new(Config::default(), session));

    (create_router(state.clone()), state, store)
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
