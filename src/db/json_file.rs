// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON file store: one array file per collection under a data directory.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::db::{collections, SnapshotStore, StoreError};
use crate::models::{DailyScoreLog, Habit, Hike};

/// File-backed store.
///
/// A missing file reads as an empty collection. Records that fail to decode
/// are skipped so a single bad entry does not hide the rest of the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    fn load<T: DeserializeOwned>(&self, collection: &'static str) -> Result<Vec<T>, StoreError> {
        let path = self.path_for(collection);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(collection, path = %path.display(), "No data file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Io {
                    collection,
                    message: e.to_string(),
                })
            }
        };

        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&data).map_err(|e| StoreError::Parse {
                collection,
                message: e.to_string(),
            })?;

        let total = raw.len();
        let records: Vec<T> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(collection, index, error = %e, "Skipping undecodable record");
                    None
                }
            })
            .collect();

        tracing::debug!(collection, count = records.len(), total, "Loaded collection");
        Ok(records)
    }

    fn save<T: Serialize>(&self, collection: &'static str, records: &[T]) -> Result<(), StoreError> {
        let io_err = |e: std::io::Error| StoreError::Io {
            collection,
            message: e.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let json = serde_json::to_string_pretty(records).map_err(|e| StoreError::Parse {
            collection,
            message: e.to_string(),
        })?;

        // Write-then-rename so readers never observe a half-written file.
        let path = self.path_for(collection);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(io_err)?;
        fs::rename(&tmp_path, &path).map_err(io_err)?;

        tracing::debug!(collection, count = records.len(), "Saved collection");
        Ok(())
    }
}

impl SnapshotStore for JsonFileStore {
    fn load_hikes(&self) -> Result<Vec<Hike>, StoreError> {
        self.load(collections::HIKES)
    }

    fn save_hikes(&self, hikes: &[Hike]) -> Result<(), StoreError> {
        self.save(collections::HIKES, hikes)
    }

    fn load_habits(&self) -> Result<Vec<Habit>, StoreError> {
        self.load(collections::HABITS)
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StoreError> {
        self.save(collections::HABITS, habits)
    }

    fn load_score_logs(&self) -> Result<Vec<DailyScoreLog>, StoreError> {
        self.load(collections::DAILY_SCORES)
    }

    fn save_score_logs(&self, logs: &[DailyScoreLog]) -> Result<(), StoreError> {
        self.save(collections::DAILY_SCORES, logs)
    }
}
