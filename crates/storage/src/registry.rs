// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The global worker registry: `state.json`.

use crate::document;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use swarm_core::{SwarmError, WorkerRecord};

/// The worker registry, as persisted — `{"workers": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerRegistry {
    #[serde(default)]
    pub workers: Vec<WorkerRecord>,
}

impl WorkerRegistry {
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        document::load_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        document::save(path, self)
    }

    pub fn find(&self, name: &str) -> Option<&WorkerRecord> {
        self.workers.iter().find(|w| w.name.as_str() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut WorkerRecord> {
        self.workers.iter_mut().find(|w| w.name.as_str() == name)
    }

    /// Insert a new record, failing if the name is already registered.
    pub fn insert(&mut self, record: WorkerRecord) -> Result<(), SwarmError> {
        if self.find(record.name.as_str()).is_some() {
            return Err(SwarmError::Duplicate(record.name.to_string()));
        }
        self.workers.push(record);
        Ok(())
    }

    /// Replace an existing record in place (used by `respawn`).
    pub fn replace(&mut self, record: WorkerRecord) {
        if let Some(slot) = self.find_mut(record.name.as_str()) {
            *slot = record;
        } else {
            self.workers.push(record);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<WorkerRecord> {
        let idx = self.workers.iter().position(|w| w.name.as_str() == name)?;
        Some(self.workers.remove(idx))
    }

    pub fn iter_matching<'a>(
        &'a self,
        tag: Option<&'a str>,
    ) -> impl Iterator<Item = &'a WorkerRecord> {
        self.workers
            .iter()
            .filter(move |w| match tag {
                Some(t) => w.tags.iter().any(|x| x == t),
                None => true,
            })
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
