// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Direct backend: a plain OS child process, stdout/stderr redirected to
//! a log file under the state directory.

use crate::error::BackendError;
use crate::spawn::{SignalKind, SpawnRequest};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Grace period between `TERM` and `KILL` on `signal`.
pub const TERM_GRACE: Duration = Duration::from_secs(2);

pub struct DirectBackend;

impl DirectBackend {
    /// Spawn the command, redirecting stdout/stderr into `req.log_path`.
    /// Returns the child's PID. Non-blocking: the child is launched and
    /// this returns immediately without waiting on it.
    pub fn start(&self, req: &SpawnRequest) -> Result<u32, BackendError> {
        if let Some(parent) = req.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let log_out = File::create(&req.log_path)?;
        let log_err = log_out.try_clone()?;

        let mut command = Command::new(&req.cmd[0]);
        command
            .args(&req.cmd[1..])
            .current_dir(&req.cwd)
            .envs(&req.env)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_out))
            .stderr(Stdio::from(log_err));

        let child = command.spawn()?;
        Ok(child.id())
    }

    /// Read the log file from byte offset `since` (0 if absent) to EOF.
    pub fn capture(&self, log_path: &Path, since: Option<u64>) -> Result<Vec<u8>, BackendError> {
        let mut file = match File::open(log_path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if let Some(offset) = since {
            file.seek(SeekFrom::Start(offset))?;
        }
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Direct-backend workers never retain an open stdin, so input cannot
    /// be delivered this way (spec's open question (a), resolved in favor
    /// of the simpler non-interactive spawn).
    pub fn send(&self, _pid: u32, _payload: &str) -> Result<(), BackendError> {
        Err(BackendError::NotSupported(
            "direct backend does not keep stdin open for send".to_string(),
        ))
    }

    pub fn signal(&self, pid: u32, kind: SignalKind) -> Result<(), BackendError> {
        let sig = match kind {
            SignalKind::Term => Signal::SIGTERM,
            SignalKind::Kill => Signal::SIGKILL,
        };
        match signal::kill(Pid::from_raw(pid as i32), sig) {
            Ok(()) => Ok(()),
            // Already gone is success, not a backend failure.
            Err(nix::errno::Errno::ESRCH) => Ok(()),
            Err(e) => Err(BackendError::Rejected(e.to_string())),
        }
    }

    /// Send `TERM`, wait up to `TERM_GRACE`, then `KILL` if still alive.
    pub fn signal_with_grace(&self, pid: u32) -> Result<(), BackendError> {
        self.signal(pid, SignalKind::Term)?;
        let deadline = std::time::Instant::now() + TERM_GRACE;
        while std::time::Instant::now() < deadline {
            if !self.alive(pid)? {
                return Ok(());
            }
            std::thread::sleep(Duration::from_millis(100));
        }
        if self.alive(pid)? {
            self.signal(pid, SignalKind::Kill)?;
        }
        Ok(())
    }

    pub fn alive(&self, pid: u32) -> Result<bool, BackendError> {
        match signal::kill(Pid::from_raw(pid as i32), None) {
            Ok(()) => Ok(true),
            Err(nix::errno::Errno::ESRCH) => Ok(false),
            Err(e) => Err(BackendError::Rejected(e.to_string())),
        }
    }

    /// Non-blocking reap: `Some(code)` if the child has exited (the zombie
    /// is reaped in the process), `None` if still running.
    ///
    /// Only meaningful when called by the same process that spawned the
    /// child (a CLI-spawned worker outlives the short-lived `spawn`
    /// invocation and is reparented to init, which reaps it — but the
    /// workflow monitor loop calls `start` and stays alive for the
    /// worker's whole lifetime, so it must reap its own stage workers or
    /// `alive` would see a zombie as live forever).
    pub fn wait_exit(&self, pid: u32) -> Result<Option<i32>, BackendError> {
        use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
        match waitpid(Pid::from_raw(pid as i32), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(_, code)) => Ok(Some(code)),
            Ok(WaitStatus::Signaled(..)) => Ok(Some(-1)),
            Ok(_) => Ok(None),
            // Not our child (e.g. a different CLI invocation spawned it) —
            // fall back to a liveness probe; if it's gone we can't recover
            // its exit code, so report a generic non-zero.
            Err(nix::errno::Errno::ECHILD) => {
                if self.alive(pid)? {
                    Ok(None)
                } else {
                    Ok(Some(-1))
                }
            }
            Err(e) => Err(BackendError::Rejected(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "direct_tests.rs"]
mod tests;
