// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single dispatch seam over the two backend implementations.
//!
//! Design note (spec.md §9): "model backends as a variant with a
//! capability set... dispatch at supervisor call sites, not via
//! inheritance." `swarm-supervisor` never matches on `Backend` itself —
//! every operation goes through [`BoundBackend`].

use crate::direct::DirectBackend;
use crate::error::BackendError;
use crate::session::SessionBackend;
use crate::spawn::{SignalKind, SpawnRequest};
use std::path::Path;
use swarm_core::{Backend, BackendKind, TmuxHandle};

/// Stateless dispatcher over [`DirectBackend`]/[`SessionBackend`].
pub struct BoundBackend;

impl BoundBackend {
    /// Start a worker on the requested backend kind, returning the bound
    /// handle to record on the [`swarm_core::WorkerRecord`].
    pub fn start(kind: BackendKind, req: &SpawnRequest) -> Result<Backend, BackendError> {
        match kind {
            BackendKind::Direct => {
                let pid = DirectBackend.start(req)?;
                Ok(Backend::Direct { pid })
            }
            BackendKind::Session => {
                let handle = SessionBackend.start(req)?;
                Ok(Backend::Session(handle))
            }
        }
    }

    /// Capture output. `log_path`/`since` are only meaningful for the
    /// direct backend (`since` is a byte offset into its log file); the
    /// session backend always returns the full pane including scrollback.
    pub fn capture(
        backend: &Backend,
        log_path: &Path,
        since: Option<u64>,
    ) -> Result<Vec<u8>, BackendError> {
        match backend {
            Backend::Direct { .. } => DirectBackend.capture(log_path, since),
            Backend::Session(handle) => SessionBackend.capture(handle),
        }
    }

    pub fn send(backend: &Backend, payload: &str) -> Result<(), BackendError> {
        match backend {
            Backend::Direct { pid } => DirectBackend.send(*pid, payload),
            Backend::Session(handle) => SessionBackend.send(handle, payload),
        }
    }

    /// Signal with grace: direct backend sends `TERM` then, after a grace
    /// period, `KILL`; the session backend has no graduated signal and
    /// tears the session down on the first call.
    pub fn signal(backend: &Backend, kind: SignalKind) -> Result<(), BackendError> {
        match backend {
            Backend::Direct { pid } => match kind {
                SignalKind::Term => DirectBackend.signal_with_grace(*pid),
                SignalKind::Kill => DirectBackend.signal(*pid, SignalKind::Kill),
            },
            Backend::Session(handle) => SessionBackend.signal(handle, kind),
        }
    }

    pub fn alive(backend: &Backend) -> Result<bool, BackendError> {
        match backend {
            Backend::Direct { pid } => DirectBackend.alive(*pid),
            Backend::Session(handle) => SessionBackend.alive(handle),
        }
    }

    /// Non-blocking exit-code reap. Only the direct backend can report an
    /// exit code; a session has no single process to reap.
    pub fn wait_exit(backend: &Backend) -> Result<Option<i32>, BackendError> {
        match backend {
            Backend::Direct { pid } => DirectBackend.wait_exit(*pid),
            Backend::Session(_) => Err(BackendError::NotSupported(
                "session backend has no single process exit code".to_string(),
            )),
        }
    }

    /// Reconstruct the backend handle as persisted in a [`WorkerRecord`] —
    /// the CLI's liveness decisions are always rebuilt from disk, never
    /// carried in memory across invocations (spec.md §9).
    pub fn from_record_fields(pid: Option<u32>, tmux: Option<TmuxHandle>) -> Option<Backend> {
        match (pid, tmux) {
            (Some(pid), None) => Some(Backend::Direct { pid }),
            (None, Some(handle)) => Some(Backend::Session(handle)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
