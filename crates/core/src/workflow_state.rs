// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow runtime state: the persisted progress of a workflow run.

use crate::ids::WorkerName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overall workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Scheduled,
    Running,
    Completed,
    Failed,
    Cancelled,
}

crate::simple_display! {
    WorkflowStatus {
        Scheduled => "scheduled",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

impl WorkflowStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            WorkflowStatus::Completed | WorkflowStatus::Failed | WorkflowStatus::Cancelled
        )
    }
}

/// One entry in the stage transition history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub stage: String,
    pub event: String,
    pub at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl HistoryEntry {
    pub fn new(stage: impl Into<String>, event: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self { stage: stage.into(), event: event.into(), at, detail: None }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Persisted runtime state for one workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    pub name: String,
    pub status: WorkflowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
    pub current_stage: usize,
    #[serde(default)]
    pub attempts: BTreeMap<String, u32>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Worker currently bound to the active stage, if any — represented as
    /// a name (a State Store lookup key), not a live handle, to keep this
    /// type plain-data and serializable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_worker: Option<WorkerName>,
}

impl WorkflowState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: WorkflowStatus::Running,
            scheduled_for: None,
            current_stage: 0,
            attempts: BTreeMap::new(),
            history: Vec::new(),
            active_worker: None,
        }
    }

    pub fn scheduled(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        let mut s = Self::new(name);
        s.status = WorkflowStatus::Scheduled;
        s.scheduled_for = Some(at);
        s
    }

    pub fn attempt_for(&self, stage: &str) -> u32 {
        self.attempts.get(stage).copied().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "workflow_state_tests.rs"]
mod tests;
