// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness reconciliation: a worker's `status = running` in the registry
//! is "eventually checked, not continuously enforced" (spec.md §3). Every
//! supervisor read that cares about current status calls this first.

use swarm_backends::BoundBackend;
use swarm_core::{WorkerRecord, WorkerStatus};

/// Refresh `record.status` against the live backend if it claims to be
/// running. Returns `true` if the record was changed (caller must persist).
pub fn reconcile(record: &mut WorkerRecord) -> bool {
    if record.status != WorkerStatus::Running {
        return false;
    }
    let Some(backend) = BoundBackend::from_record_fields(record.pid, record.tmux.clone()) else {
        // Malformed binding (spec invariant violated) — treat as stopped
        // rather than trusting a status we cannot verify.
        record.status = WorkerStatus::Stopped;
        return true;
    };
    match BoundBackend::alive(&backend) {
        Ok(true) => false,
        Ok(false) | Err(_) => {
            record.status = WorkerStatus::Stopped;
            true
        }
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
