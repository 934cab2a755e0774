// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker record: the unit of supervision.

use crate::ids::WorkerName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observed lifecycle status of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Running,
    Stopped,
}

crate::simple_display! {
    WorkerStatus {
        Running => "running",
        Stopped => "stopped",
    }
}

/// Handle into a detached terminal-multiplexer session.
///
/// Recorded so a later, independent CLI invocation can reconnect to the
/// same session (the CLI process is short-lived; the session is not).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmuxHandle {
    pub socket: String,
    pub session: String,
    pub window: String,
}

/// Which backend is currently bound to a worker.
///
/// Exactly one of `Pid`/`Session` is ever present on a stored
/// [`WorkerRecord`] — enforced by [`WorkerRecord::new`], not by the wire
/// shape itself (the record stores `pid`/`tmux` as sibling nullable fields
/// so the JSON round-trips through tools that don't know about this enum).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Direct { pid: u32 },
    Session(TmuxHandle),
}

impl Backend {
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Direct { .. } => BackendKind::Direct,
            Backend::Session(_) => BackendKind::Session,
        }
    }
}

/// Backend kind alone, independent of the live handle — used by `respawn`
/// to preserve "how this worker is started" across a stop/start cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Direct,
    Session,
}

/// A supervised worker's durable record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub name: WorkerName,
    pub status: WorkerStatus,
    pub cmd: Vec<String>,
    pub started: DateTime<Utc>,
    pub cwd: String,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tmux: Option<TmuxHandle>,
    /// Out-of-scope git-worktree integration: the field is part of the
    /// wire shape for forward-compat with collaborating tooling but this
    /// crate never populates it.
    #[serde(default)]
    pub worktree: Option<String>,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub exit_code: Option<i32>,
}

impl WorkerRecord {
    pub fn new(
        name: WorkerName,
        cmd: Vec<String>,
        cwd: String,
        env: BTreeMap<String, String>,
        tags: Vec<String>,
        backend: Backend,
        started: DateTime<Utc>,
    ) -> Self {
        let (pid, tmux) = match backend {
            Backend::Direct { pid } => (Some(pid), None),
            Backend::Session(handle) => (None, Some(handle)),
        };
        let record = Self {
            name,
            status: WorkerStatus::Running,
            cmd,
            started,
            cwd,
            env,
            tags,
            tmux,
            worktree: None,
            pid,
            exit_code: None,
        };
        debug_assert!(record.has_exclusive_binding(), "a new record must bind exactly one backend");
        record
    }

    /// Backend kind this record was started with — preserved verbatim
    /// across a `respawn`.
    pub fn backend_kind(&self) -> BackendKind {
        if self.tmux.is_some() {
            BackendKind::Session
        } else {
            BackendKind::Direct
        }
    }

    /// True iff exactly one of `pid`/`tmux` is populated — required for
    /// every `running` record.
    pub fn has_exclusive_binding(&self) -> bool {
        self.pid.is_some() != self.tmux.is_some()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
