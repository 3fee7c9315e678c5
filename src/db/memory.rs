// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for tests and offline runs.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::db::{SnapshotStore, StoreError};
use crate::models::{DailyScoreLog, Habit, Hike};

#[derive(Debug, Default)]
struct Collections {
    hikes: Vec<Hike>,
    habits: Vec<Habit>,
    score_logs: Vec<DailyScoreLog>,
    fail_loads: bool,
    fail_saves: bool,
}

/// Shared in-memory store. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given collections.
    pub fn with_data(hikes: Vec<Hike>, habits: Vec<Habit>, score_logs: Vec<DailyScoreLog>) -> Self {
        let store = Self::new();
        if let Ok(mut c) = store.inner.lock() {
            c.hikes = hikes;
            c.habits = habits;
            c.score_logs = score_logs;
        }
        store
    }

    /// Make every load fail, simulating an unavailable backend.
    pub fn set_fail_loads(&self, fail: bool) {
        if let Ok(mut c) = self.inner.lock() {
            c.fail_loads = fail;
        }
    }

    /// Make every save fail.
    pub fn set_fail_saves(&self, fail: bool) {
        if let Ok(mut c) = self.inner.lock() {
            c.fail_saves = fail;
        }
    }

    pub fn hikes(&self) -> Vec<Hike> {
        self.inner.lock().map(|c| c.hikes.clone()).unwrap_or_default()
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.inner.lock().map(|c| c.habits.clone()).unwrap_or_default()
    }

    pub fn score_logs(&self) -> Vec<DailyScoreLog> {
        self.inner
            .lock()
            .map(|c| c.score_logs.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn for_load(&self) -> Result<MutexGuard<'_, Collections>, StoreError> {
        let c = self.lock()?;
        if c.fail_loads {
            return Err(StoreError::Unavailable("loads disabled".to_string()));
        }
        Ok(c)
    }

    fn for_save(&self) -> Result<MutexGuard<'_, Collections>, StoreError> {
        let c = self.lock()?;
        if c.fail_saves {
            return Err(StoreError::Unavailable("saves disabled".to_string()));
        }
        Ok(c)
    }
}

impl SnapshotStore for MemoryStore {
    fn load_hikes(&self) -> Result<Vec<Hike>, StoreError> {
        Ok(self.for_load()?.hikes.clone())
    }

    fn save_hikes(&self, hikes: &[Hike]) -> Result<(), StoreError> {
        self.for_save()?.hikes = hikes.to_vec();
        Ok(())
    }

    fn load_habits(&self) -> Result<Vec<Habit>, StoreError> {
        Ok(self.for_load()?.habits.clone())
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StoreError> {
        self.for_save()?.habits = habits.to_vec();
        Ok(())
    }

    fn load_score_logs(&self) -> Result<Vec<DailyScoreLog>, StoreError> {
        Ok(self.for_load()?.score_logs.clone())
    }

    fn save_score_logs(&self, logs: &[DailyScoreLog]) -> Result<(), StoreError> {
        self.for_save()?.score_logs = logs.to_vec();
        Ok(())
    }
}
