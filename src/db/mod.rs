// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer for the three base collections.
//!
//! Each collection is loaded and saved independently as an ordered list of
//! plain records. Order is insertion order and survives a round trip.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{DailyScoreLog, Habit, Hike};

/// Collection names as constants.
pub mod collections {
    pub const HIKES: &str = "hikes";
    pub const HABITS: &str = "habits";
    pub const DAILY_SCORES: &str = "dailyScores";
}

/// Load/save contract between the engine's session and a storage backend.
pub trait SnapshotStore: Send + Sync {
    fn load_hikes(&self) -> Result<Vec<Hike>, StoreError>;
    fn save_hikes(&self, hikes: &[Hike]) -> Result<(), StoreError>;

    fn load_habits(&self) -> Result<Vec<Habit>, StoreError>;
    fn save_habits(&self, habits: &[Habit]) -> Result<(), StoreError>;

    fn load_score_logs(&self) -> Result<Vec<DailyScoreLog>, StoreError>;
    fn save_score_logs(&self, logs: &[DailyScoreLog]) -> Result<(), StoreError>;
}

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {collection}: {message}")]
    Io {
        collection: &'static str,
        message: String,
    },

    #[error("Failed to parse {collection}: {message}")]
    Parse {
        collection: &'static str,
        message: String,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
