// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session backend: a detached terminal-multiplexer (tmux) session
//! running a single window, on an isolated server socket so concurrent
//! integration test runs cannot collide with each other or a developer's
//! own tmux server.
//!
//! Grounded on `crates/daemon/src/listener/tmux.rs`'s
//! `capture_tmux_pane`/`kill_state_sessions`, adapted from an always-on
//! daemon's async event loop to this crate's short-lived, synchronous CLI
//! invocations: each call drives `tokio::process::Command` on a small
//! dedicated current-thread runtime rather than requiring every caller to
//! be `async fn`.

use crate::error::BackendError;
use crate::spawn::{SignalKind, SpawnRequest};
use std::process::Output;
use swarm_core::TmuxHandle;
use tokio::process::Command;

/// Scrollback lines requested on every pane capture — generous enough that
/// a prompt which has scrolled off the visible pane is still returned to
/// the Readiness Detector (spec.md §4.3: "scrollback must be included").
const CAPTURE_SCROLLBACK_LINES: &str = "-2000";

fn block_on<T, F>(fut: F) -> Result<T, BackendError>
where
    F: std::future::Future<Output = Result<T, BackendError>>,
{
    // Session backend calls are one-shot and short-lived; a full
    // multi-thread runtime would outlive its usefulness for a single
    // `tmux` invocation per call.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(BackendError::Io)?;
    runtime.block_on(fut)
}

async fn run_tmux(socket: &str, args: &[&str]) -> Result<Output, BackendError> {
    Command::new("tmux")
        .arg("-L")
        .arg(socket)
        .args(args)
        .output()
        .await
        .map_err(BackendError::Io)
}

pub struct SessionBackend;

impl SessionBackend {
    /// Create a detached session with a single window running `req.cmd`,
    /// on `req.tmux_socket`. The session and window are named after the
    /// worker so a later invocation can reconstruct the handle from the
    /// worker's own name alone.
    pub fn start(&self, req: &SpawnRequest) -> Result<TmuxHandle, BackendError> {
        let session = req.name.clone();
        let window = "main".to_string();
        let cmd_line = shell_join(&req.cmd);

        block_on(async {
            let mut args: Vec<String> = vec![
                "new-session".into(),
                "-d".into(),
                "-s".into(),
                session.clone(),
                "-n".into(),
                window.clone(),
                "-c".into(),
                req.cwd.clone(),
            ];
            for (k, v) in &req.env {
                args.push("-e".into());
                args.push(format!("{k}={v}"));
            }
            args.push(cmd_line);

            let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
            let output = run_tmux(&req.tmux_socket, &arg_refs).await?;
            if !output.status.success() {
                return Err(BackendError::Rejected(format!(
                    "tmux new-session failed: {}",
                    String::from_utf8_lossy(&output.stderr)
                )));
            }
            Ok(())
        })?;

        Ok(TmuxHandle { socket: req.tmux_socket.clone(), session, window })
    }

    /// Capture the pane's content including scrollback, with ANSI color
    /// sequences preserved (the Readiness Detector needs them to test its
    /// ANSI-aware anchor).
    pub fn capture(&self, handle: &TmuxHandle) -> Result<Vec<u8>, BackendError> {
        let target = format!("{}:{}", handle.session, handle.window);
        block_on(async {
            let output = run_tmux(
                &handle.socket,
                &["capture-pane", "-t", &target, "-p", "-e", "-S", CAPTURE_SCROLLBACK_LINES],
            )
            .await?;
            if !output.status.success() {
                return Err(BackendError::Rejected(format!(
                    "session not found: {}",
                    handle.session
                )));
            }
            Ok(output.stdout)
        })
    }

    /// Type `payload` into the pane followed by Enter.
    pub fn send(&self, handle: &TmuxHandle, payload: &str) -> Result<(), BackendError> {
        let target = format!("{}:{}", handle.session, handle.window);
        block_on(async {
            let output =
                run_tmux(&handle.socket, &["send-keys", "-t", &target, payload, "Enter"]).await?;
            if !output.status.success() {
                return Err(BackendError::Rejected(format!(
                    "tmux send-keys failed: {}",
                    String::from_utf8_lossy(&output.stderr)
                )));
            }
            Ok(())
        })
    }

    /// Kill the window's session. Both `TERM` and `KILL` tear down the
    /// whole session — the multiplexer has no graduated signal delivery,
    /// only "ask the process group to exit" via destroying its pane.
    pub fn signal(&self, handle: &TmuxHandle, _kind: SignalKind) -> Result<(), BackendError> {
        block_on(async {
            let output =
                run_tmux(&handle.socket, &["kill-session", "-t", &handle.session]).await?;
            // A session that's already gone is success, matching the
            // direct backend's "already gone" tolerance on `signal`.
            if !output.status.success() && !already_gone(&output) {
                return Err(BackendError::Rejected(format!(
                    "tmux kill-session failed: {}",
                    String::from_utf8_lossy(&output.stderr)
                )));
            }
            Ok(())
        })
    }

    pub fn alive(&self, handle: &TmuxHandle) -> Result<bool, BackendError> {
        block_on(async {
            let output =
                run_tmux(&handle.socket, &["has-session", "-t", &handle.session]).await?;
            Ok(output.status.success())
        })
    }
}

fn already_gone(output: &Output) -> bool {
    String::from_utf8_lossy(&output.stderr).contains("can't find session")
}

/// Join argv into a single shell command line for `tmux new-session`'s
/// trailing command argument, quoting each word.
fn shell_join(argv: &[String]) -> String {
    argv.iter().map(|w| shell_quote(w)).collect::<Vec<_>>().join(" ")
}

fn shell_quote(word: &str) -> String {
    if word.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')) {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
