// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! HabitHike: habits grouped under time-boxed goals ("hikes").
//!
//! The core of this crate is a pure derivation engine that turns hikes,
//! habits and daily score logs into progress views: per-habit totals and
//! streaks, hike totals, and a projected ten-step milestone schedule. A
//! session object owns the snapshot and persists it; an HTTP API exposes it.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod time_utils;

use config::Config;
use session::Session;
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Single writer: every request takes the lock for the whole mutation.
    pub session: Mutex<Session>,
}

impl AppState {
    pub fn new(config: Config, session: Session) -> Self {
        Self {
            config,
            session: Mutex::new(session),
        }
    }
}
