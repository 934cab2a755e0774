// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-workflow `state.json`: a workflow's runtime state has no natural
//! "empty" default the way the registry does, so a missing file loads as
//! `None` rather than a fabricated `WorkflowState`.

use crate::document;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use swarm_core::WorkflowState;

#[derive(Default, Serialize, Deserialize)]
struct Slot(Option<WorkflowState>);

pub fn load(path: &Path) -> Result<Option<WorkflowState>, StorageError> {
    let slot: Slot = document::load_or_default(path)?;
    Ok(slot.0)
}

pub fn save(path: &Path, state: &WorkflowState) -> Result<(), StorageError> {
    document::save(path, &Slot(Some(state.clone())))
}

pub fn exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "workflow_store_tests.rs"]
mod tests;
