// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State-root resolution and the fixed layout beneath it.

use crate::error::StorageError;
use std::path::PathBuf;

/// Resolve the state root: `SWARM_DIR` if set, else `<home>/.swarm`.
pub fn state_root() -> Result<PathBuf, StorageError> {
    if let Ok(dir) = std::env::var("SWARM_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".swarm"))
        .ok_or_else(|| StorageError::NoStateDir("no home directory and SWARM_DIR unset".into()))
}

/// The worker registry file under a given state root.
pub fn registry_path(root: &std::path::Path) -> PathBuf {
    root.join("state.json")
}

/// The direct-backend log file for a worker name.
pub fn worker_log_path(root: &std::path::Path, worker_name: &str) -> PathBuf {
    root.join("logs").join(format!("{worker_name}.log"))
}

/// The per-workflow directory.
pub fn workflow_dir(root: &std::path::Path, workflow_name: &str) -> PathBuf {
    root.join("workflows").join(workflow_name)
}

/// The per-workflow state document.
pub fn workflow_state_path(root: &std::path::Path, workflow_name: &str) -> PathBuf {
    workflow_dir(root, workflow_name).join("state.json")
}

/// The per-workflow stage-capture log directory.
pub fn workflow_logs_dir(root: &std::path::Path, workflow_name: &str) -> PathBuf {
    workflow_dir(root, workflow_name).join("logs")
}

/// The capture log for one stage of one workflow.
pub fn workflow_stage_log_path(root: &std::path::Path, workflow_name: &str, stage_name: &str) -> PathBuf {
    workflow_logs_dir(root, workflow_name).join(format!("{stage_name}.log"))
}

/// The top-level directory holding all per-workflow subdirectories.
pub fn workflows_root(root: &std::path::Path) -> PathBuf {
    root.join("workflows")
}

/// The session backend's tmux server socket name for this state root.
///
/// Derived from the root path so every `SWARM_DIR` (in particular, every
/// isolated per-test-run tempdir) gets its own tmux server — concurrent
/// integration test runs cannot collide (spec.md §4.2: "an isolated
/// multiplexer server socket").
pub fn tmux_socket_name(root: &std::path::Path) -> String {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    root.hash(&mut hasher);
    format!("swarm-{:016x}", hasher.finish())
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
