// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session: the explicit context that owns the current snapshot.
//!
//! Collections are loaded once when the session opens. Every mutation runs
//! one of the pure collection operations from [`crate::services`], swaps
//! in the result and saves the collections it touched. Derived views are
//! recomputed on each read and never cached.

use chrono::NaiveDate;

use crate::db::{SnapshotStore, StoreError};
use crate::error::EngineError;
use crate::models::{
    DailyScoreLog, Habit, HabitTemplate, HabitWithDetails, Hike, HikeWithDetails, NewHabit,
    NewHike,
};
use crate::services::{habit, hike, score_log};

/// The three base collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub hikes: Vec<Hike>,
    pub habits: Vec<Habit>,
    pub score_logs: Vec<DailyScoreLog>,
}

/// Errors from session mutations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The mutation was applied in memory but could not be saved.
    #[error("Failed to persist changes: {0}")]
    Persistence(#[from] StoreError),
}

impl From<crate::error::ValidationError> for SessionError {
    fn from(err: crate::error::ValidationError) -> Self {
        SessionError::Engine(err.into())
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Which collections a mutation changed.
#[derive(Debug, Clone, Copy, Default)]
struct Dirty {
    hikes: bool,
    habits: bool,
    score_logs: bool,
}

pub struct Session {
    snapshot: Snapshot,
    store: Box<dyn SnapshotStore>,
}

impl Session {
    /// Open a session by loading every collection from `store`.
    ///
    /// A collection that cannot be loaded starts out empty, the same as a
    /// fresh install.
    pub fn open(store: Box<dyn SnapshotStore>) -> Self {
        let hikes = load_or_empty("hikes", store.load_hikes());
        let habits = load_or_empty("habits", store.load_habits());
        let score_logs = load_or_empty("score_logs", store.load_score_logs());

        tracing::info!(
            hikes = hikes.len(),
            habits = habits.len(),
            score_logs = score_logs.len(),
            "Session opened"
        );

        Self {
            snapshot: Snapshot {
                hikes,
                habits,
                score_logs,
            },
            store,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    // ─── Derived Views ───────────────────────────────────────────

    pub fn derived_habits(&self) -> Vec<HabitWithDetails> {
        habit::derive_habits(&self.snapshot.habits, &self.snapshot.score_logs)
    }

    pub fn derived_hikes(&self) -> Vec<HikeWithDetails> {
        hike::derive_hikes(&self.snapshot.hikes, &self.derived_habits())
    }

    pub fn open_hike(&self) -> Option<HikeWithDetails> {
        hike::select_open_hike(&self.derived_hikes()).cloned()
    }

    pub fn habit_templates(&self) -> Vec<HabitTemplate> {
        habit::habit_templates(&self.snapshot.habits)
    }

    pub fn find_hike(&self, hike_id: &str) -> Option<&Hike> {
        self.snapshot.hikes.iter().find(|h| h.id == hike_id)
    }

    pub fn find_habit(&self, habit_id: &str) -> Option<&Habit> {
        self.snapshot.habits.iter().find(|h| h.id == habit_id)
    }

    // ─── Hikes ───────────────────────────────────────────────────

    /// Create a new hike, retiring any open one. Returns the new hike.
    pub fn create_hike(&mut self, data: NewHike) -> SessionResult<Hike> {
        let hikes = hike::create_hike(&self.snapshot.hikes, data)?;
        let created = hikes
            .last()
            .cloned()
            .ok_or_else(|| EngineError::not_found("Hike", "newly created"))?;
        tracing::info!(hike_id = %created.id, title = %created.title, "Hike created");

        self.snapshot.hikes = hikes;
        self.persist(Dirty {
            hikes: true,
            ..Dirty::default()
        })?;
        Ok(created)
    }

    pub fn start_hike(&mut self, hike_id: &str) -> SessionResult<Hike> {
        self.apply_hike_transition(hike_id, hike::start_hike)
    }

    pub fn complete_hike(&mut self, hike_id: &str) -> SessionResult<Hike> {
        self.apply_hike_transition(hike_id, hike::complete_hike)
    }

    pub fn abandon_hike(&mut self, hike_id: &str) -> SessionResult<Hike> {
        self.apply_hike_transition(hike_id, hike::abandon_hike)
    }

    fn apply_hike_transition(
        &mut self,
        hike_id: &str,
        op: fn(&[Hike], &str) -> Result<Vec<Hike>, EngineError>,
    ) -> SessionResult<Hike> {
        let hikes = op(&self.snapshot.hikes, hike_id)?;
        self.snapshot.hikes = hikes;

        let updated = self
            .find_hike(hike_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("Hike", hike_id))?;
        tracing::info!(hike_id, status = %updated.status, "Hike status changed");

        self.persist(Dirty {
            hikes: true,
            ..Dirty::default()
        })?;
        Ok(updated)
    }

    // ─── Habits ──────────────────────────────────────────────────

    pub fn add_habit(&mut self, hike_id: &str, data: NewHabit) -> SessionResult<Habit> {
        if self.find_hike(hike_id).is_none() {
            return Err(EngineError::not_found("Hike", hike_id).into());
        }

        let habits = habit::add_habit(&self.snapshot.habits, hike_id, data)?;
        let added = habits
            .last()
            .cloned()
            .ok_or_else(|| EngineError::not_found("Habit", "newly created"))?;
        tracing::info!(hike_id, habit_id = %added.id, name = %added.name, "Habit added");

        self.snapshot.habits = habits;
        self.persist(Dirty {
            habits: true,
            ..Dirty::default()
        })?;
        Ok(added)
    }

    /// Add a habit to `hike_id` copied from the habit `template_id`.
    pub fn add_habit_from_template(
        &mut self,
        hike_id: &str,
        template_id: &str,
    ) -> SessionResult<Habit> {
        let template = self
            .habit_templates()
            .into_iter()
            .find(|t| t.id == template_id)
            .ok_or_else(|| EngineError::not_found("Habit template", template_id))?;

        self.add_habit(hike_id, template.to_new_habit())
    }

    pub fn update_habit(&mut self, updated: Habit) -> SessionResult<Habit> {
        let habit_id = updated.id.clone();
        let habits = habit::update_habit(&self.snapshot.habits, updated)?;
        self.snapshot.habits = habits;

        let stored = self
            .find_habit(&habit_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("Habit", &habit_id))?;
        tracing::info!(habit_id = %stored.id, "Habit updated");

        self.persist(Dirty {
            habits: true,
            ..Dirty::default()
        })?;
        Ok(stored)
    }

    /// Delete a habit and its score logs. Returns how many logs went with it.
    pub fn delete_habit(&mut self, habit_id: &str) -> SessionResult<usize> {
        if self.find_habit(habit_id).is_none() {
            return Err(EngineError::not_found("Habit", habit_id).into());
        }

        let (habits, logs) =
            habit::delete_habit(&self.snapshot.habits, &self.snapshot.score_logs, habit_id);
        let removed_logs = self.snapshot.score_logs.len() - logs.len();
        tracing::info!(habit_id, removed_logs, "Habit deleted");

        self.snapshot.habits = habits;
        self.snapshot.score_logs = logs;
        self.persist(Dirty {
            habits: true,
            score_logs: true,
            ..Dirty::default()
        })?;
        Ok(removed_logs)
    }

    // ─── Score Logs ──────────────────────────────────────────────

    /// Record a day's outcome for a habit and return the habit's new details.
    pub fn log_score(
        &mut self,
        habit_id: &str,
        date: NaiveDate,
        score: i64,
    ) -> SessionResult<HabitWithDetails> {
        let owner = self
            .find_habit(habit_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("Habit", habit_id))?;

        let logs = score_log::log_score(&self.snapshot.score_logs, habit_id, date, score)?;
        tracing::info!(habit_id, %date, score, "Score logged");

        self.snapshot.score_logs = logs;
        self.persist(Dirty {
            score_logs: true,
            ..Dirty::default()
        })?;
        Ok(habit::derive_habit(&owner, &self.snapshot.score_logs))
    }

    fn persist(&self, dirty: Dirty) -> Result<(), StoreError> {
        let result = self.save_dirty(dirty);
        if let Err(e) = &result {
            tracing::error!(error = %e, "Failed to save snapshot");
        }
        result
    }

    fn save_dirty(&self, dirty: Dirty) -> Result<(), StoreError> {
        if dirty.hikes {
            self.store.save_hikes(&self.snapshot.hikes)?;
        }
        if dirty.habits {
            self.store.save_habits(&self.snapshot.habits)?;
        }
        if dirty.score_logs {
            self.store.save_score_logs(&self.snapshot.score_logs)?;
        }
        Ok(())
    }
}

fn load_or_empty<T>(collection: &'static str, loaded: Result<Vec<T>, StoreError>) -> Vec<T> {
    loaded.unwrap_or_else(|e| {
        tracing::warn!(collection, error = %e, "Collection unavailable, starting empty");
        Vec::new()
    })
}
