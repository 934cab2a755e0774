// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Worker Supervisor (spec.md §4.4): spawn, status, list, send, logs,
//! kill, respawn, clean. Every call reloads the registry from disk,
//! mutates it, and saves it back under atomic replace — no supervisor
//! state survives between calls.

use crate::reconcile::reconcile;
use crate::readiness::{self, ReadyOutcome};
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use swarm_backends::{BoundBackend, SignalKind, SpawnRequest};
use swarm_core::{validate_name, BackendKind, Result, SwarmError, WorkerName, WorkerRecord, WorkerStatus};
use swarm_storage::{paths, WorkerRegistry};

/// Caller-supplied spawn parameters (spec.md §4.4 `spawn`'s argument list).
#[derive(Debug, Clone)]
pub struct SpawnOptions {
    pub name: String,
    pub cmd: Vec<String>,
    pub env: std::collections::BTreeMap<String, String>,
    pub cwd: String,
    pub tags: Vec<String>,
    pub backend: BackendKind,
    pub ready_wait: bool,
    pub ready_timeout: Option<Duration>,
}

/// Outcome of `status(name)` — the CLI maps this to exit codes 0/1/2.
#[derive(Debug, Clone)]
pub enum StatusReport {
    Running(WorkerRecord),
    Stopped(WorkerRecord),
    NotFound,
}

pub struct Supervisor {
    root: PathBuf,
}

impl Supervisor {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn registry_path(&self) -> PathBuf {
        paths::registry_path(&self.root)
    }

    fn load_registry(&self) -> Result<WorkerRegistry> {
        Ok(WorkerRegistry::load(&self.registry_path())?)
    }

    fn save_registry(&self, registry: &WorkerRegistry) -> Result<()> {
        Ok(registry.save(&self.registry_path())?)
    }

    fn spawn_request(&self, name: &str, cmd: &[String], env: &std::collections::BTreeMap<String, String>, cwd: &str) -> SpawnRequest {
        SpawnRequest {
            name: name.to_string(),
            cmd: cmd.to_vec(),
            env: env.clone(),
            cwd: cwd.to_string(),
            log_path: paths::worker_log_path(&self.root, name),
            tmux_socket: paths::tmux_socket_name(&self.root),
        }
    }

    /// Spawn a new worker. Rejects a duplicate name before ever touching
    /// a backend. A `ready_wait` timeout is reported (not returned as an
    /// error) and the worker is left `running` (spec.md §4.4).
    pub fn spawn(&self, opts: SpawnOptions) -> Result<WorkerRecord> {
        validate_name(&opts.name).map_err(SwarmError::InvalidInput)?;
        let mut registry = self.load_registry()?;
        if registry.find(&opts.name).is_some() {
            return Err(SwarmError::Duplicate(opts.name));
        }

        let req = self.spawn_request(&opts.name, &opts.cmd, &opts.env, &opts.cwd);
        let backend = BoundBackend::start(opts.backend, &req)?;
        let record = WorkerRecord::new(
            WorkerName::new(opts.name.clone()),
            opts.cmd.clone(),
            opts.cwd.clone(),
            opts.env.clone(),
            opts.tags.clone(),
            backend.clone(),
            Utc::now(),
        );
        registry.insert(record.clone())?;
        self.save_registry(&registry)?;

        if opts.ready_wait {
            let log_path = req.log_path.clone();
            let outcome = readiness::wait_ready(
                move || BoundBackend::capture(&backend, &log_path, None),
                opts.ready_timeout.unwrap_or(readiness::DEFAULT_READY_TIMEOUT),
                readiness::DEFAULT_POLL_INTERVAL,
            );
            if outcome == ReadyOutcome::TimedOut {
                tracing::warn!(worker = %opts.name, "readiness timeout, worker left running");
            }
        }

        Ok(record)
    }

    /// Current status, reconciled against the live backend.
    pub fn status(&self, name: &str) -> Result<StatusReport> {
        let mut registry = self.load_registry()?;
        let Some(record) = registry.find_mut(name) else {
            return Ok(StatusReport::NotFound);
        };
        let changed = reconcile(record);
        let report = if record.status == WorkerStatus::Running {
            StatusReport::Running(record.clone())
        } else {
            StatusReport::Stopped(record.clone())
        };
        if changed {
            self.save_registry(&registry)?;
        }
        Ok(report)
    }

    /// All workers, reconciled, optionally filtered by tag.
    pub fn list(&self, tag: Option<&str>) -> Result<Vec<WorkerRecord>> {
        let mut registry = self.load_registry()?;
        let mut changed = false;
        for worker in &mut registry.workers {
            changed |= reconcile(worker);
        }
        if changed {
            self.save_registry(&registry)?;
        }
        Ok(registry.iter_matching(tag).cloned().collect())
    }

    /// Send input to a running worker. Fails if stopped or the backend
    /// doesn't support input (direct-backend workers never keep stdin open).
    pub fn send(&self, name: &str, payload: &str) -> Result<()> {
        let mut registry = self.load_registry()?;
        let record =
            registry.find_mut(name).ok_or_else(|| SwarmError::NotFound(name.to_string()))?;
        let changed = reconcile(record);
        if record.status != WorkerStatus::Running {
            if changed {
                self.save_registry(&registry)?;
            }
            return Err(SwarmError::InvalidInput(format!("worker '{name}' is not running")));
        }
        let backend = BoundBackend::from_record_fields(record.pid, record.tmux.clone())
            .ok_or_else(|| SwarmError::BackendFailure(format!("worker '{name}' has no backend binding")))?;
        BoundBackend::send(&backend, payload)?;
        if changed {
            self.save_registry(&registry)?;
        }
        Ok(())
    }

    /// Captured output — full direct-backend log or full tmux pane
    /// (including scrollback), tailed to the last `tail` lines if given.
    pub fn logs(&self, name: &str, tail: Option<usize>) -> Result<Vec<u8>> {
        let registry = self.load_registry()?;
        let record =
            registry.find(name).ok_or_else(|| SwarmError::NotFound(name.to_string()))?;
        let bytes = match BoundBackend::from_record_fields(record.pid, record.tmux.clone()) {
            Some(backend) => {
                let log_path = paths::worker_log_path(&self.root, name);
                BoundBackend::capture(&backend, &log_path, None)?
            }
            None => Vec::new(),
        };
        Ok(match tail {
            Some(n) => tail_lines(&bytes, n),
            None => bytes,
        })
    }

    /// Stop a worker. Idempotent on an already-stopped worker (success,
    /// no-op); fails on a not-found worker.
    pub fn kill(&self, name: &str) -> Result<()> {
        let mut registry = self.load_registry()?;
        let record =
            registry.find_mut(name).ok_or_else(|| SwarmError::NotFound(name.to_string()))?;
        if record.status == WorkerStatus::Stopped {
            return Ok(());
        }
        if let Some(backend) = BoundBackend::from_record_fields(record.pid, record.tmux.clone()) {
            BoundBackend::signal(&backend, SignalKind::Term)?;
        }
        record.status = WorkerStatus::Stopped;
        self.save_registry(&registry)?;
        Ok(())
    }

    /// Re-run `spawn` with the original `cmd`/`env`/`cwd`/`tags`/backend
    /// kind. Requires the worker to be currently stopped.
    pub fn respawn(&self, name: &str) -> Result<WorkerRecord> {
        let mut registry = self.load_registry()?;
        let existing =
            registry.find(name).cloned().ok_or_else(|| SwarmError::NotFound(name.to_string()))?;
        if existing.status != WorkerStatus::Stopped {
            return Err(SwarmError::InvalidInput(format!(
                "worker '{name}' must be stopped before respawn"
            )));
        }

        let req = self.spawn_request(name, &existing.cmd, &existing.env, &existing.cwd);
        let backend = BoundBackend::start(existing.backend_kind(), &req)?;
        let record = WorkerRecord::new(
            existing.name.clone(),
            existing.cmd.clone(),
            existing.cwd.clone(),
            existing.env.clone(),
            existing.tags.clone(),
            backend,
            Utc::now(),
        );
        registry.replace(record.clone());
        self.save_registry(&registry)?;
        Ok(record)
    }

    /// Poll a direct-backend worker for exit without blocking, reaping it
    /// if it has exited. Returns `None` while still running. Used by the
    /// workflow engine's stage loop, which is the only caller long-lived
    /// enough to reap its own stage workers (spec.md §9: a CLI-spawned
    /// worker is reparented to init once the spawning invocation exits,
    /// but `workflow run`'s monitor loop never exits mid-stage).
    pub fn wait_for_exit(&self, name: &str) -> Result<Option<i32>> {
        let mut registry = self.load_registry()?;
        let record =
            registry.find_mut(name).ok_or_else(|| SwarmError::NotFound(name.to_string()))?;
        if record.status != WorkerStatus::Running {
            return Ok(record.exit_code);
        }
        let Some(backend) = BoundBackend::from_record_fields(record.pid, record.tmux.clone())
        else {
            record.status = WorkerStatus::Stopped;
            self.save_registry(&registry)?;
            return Ok(None);
        };
        match BoundBackend::wait_exit(&backend)? {
            Some(code) => {
                let record = registry
                    .find_mut(name)
                    .ok_or_else(|| SwarmError::NotFound(name.to_string()))?;
                record.status = WorkerStatus::Stopped;
                record.exit_code = Some(code);
                self.save_registry(&registry)?;
                Ok(Some(code))
            }
            None => Ok(None),
        }
    }

    /// Remove a worker from the registry and its log artifacts. Kills a
    /// still-running session/process first.
    pub fn clean(&self, name: &str) -> Result<()> {
        let mut registry = self.load_registry()?;
        let existing =
            registry.find(name).cloned().ok_or_else(|| SwarmError::NotFound(name.to_string()))?;
        if existing.status == WorkerStatus::Running {
            if let Some(backend) =
                BoundBackend::from_record_fields(existing.pid, existing.tmux.clone())
            {
                // Best-effort: a backend that's already gone must not
                // block the record's removal.
                let _ = BoundBackend::signal(&backend, SignalKind::Term);
            }
        }
        registry.remove(name);
        self.save_registry(&registry)?;
        let _ = std::fs::remove_file(paths::worker_log_path(&self.root, name));
        Ok(())
    }
}

/// Return the last `n` lines of `bytes`, splitting on `\n`.
fn tail_lines(bytes: &[u8], n: usize) -> Vec<u8> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n").into_bytes()
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
