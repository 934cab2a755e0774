// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Readiness Detector: polls captured terminal output and decides whether
//! a supervised interactive program has reached an input prompt.
//!
//! Pattern semantics are pinned by `examples/original_source/test_pattern_edge_cases.py`
//! (EDGE-1 through EDGE-7): patterns are tested per logical line
//! (`str::split('\n')`, a bare `\r` is just a character, not a line
//! break), the sigil patterns are anchored to either the start of the
//! line or immediately after one ANSI SGR escape sequence, and the
//! banner/explicit-text patterns are unanchored substring matches.

use regex::Regex;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Default poll interval between captures (spec.md §4.3: "≈100–250 ms").
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(150);

/// Default readiness timeout when a caller doesn't specify one.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(30);

#[allow(clippy::expect_used)] // patterns are fixed string literals, compilation cannot fail
fn patterns() -> &'static [Regex; 5] {
    static PATTERNS: OnceLock<[Regex; 5]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // Agent prompt.
            Regex::new(r"(?:^|\x1b\[[0-9;]*m)> ").expect("agent prompt pattern compiles"),
            // Shell prompt.
            Regex::new(r"(?:^|\x1b\[[0-9;]*m)\$ ").expect("shell prompt pattern compiles"),
            // Python prompt.
            Regex::new(r"(?:^|\x1b\[[0-9;]*m)>>> ").expect("python prompt pattern compiles"),
            // Banner.
            Regex::new(r"Claude Code v\d+\.\d+").expect("banner pattern compiles"),
            // Explicit text.
            Regex::new(r"bypass\s+permissions\s+on").expect("explicit-text pattern compiles"),
        ]
    })
}

/// True if any readiness pattern matches any logical line of `text`.
pub fn is_ready(text: &str) -> bool {
    text.split('\n').any(|line| patterns().iter().any(|p| p.is_match(line)))
}

/// Outcome of a `wait_ready` poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyOutcome {
    Ready,
    TimedOut,
}

/// Poll `capture_fn` at `poll_interval` until a readiness pattern matches
/// or `timeout` elapses. A capture error is treated as "not ready yet" —
/// the caller's `timeout` still bounds the loop, so a persistently
/// failing capture surfaces as `TimedOut`, not a hang.
pub fn wait_ready<F, E>(mut capture_fn: F, timeout: Duration, poll_interval: Duration) -> ReadyOutcome
where
    F: FnMut() -> Result<Vec<u8>, E>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(bytes) = capture_fn() {
            if is_ready(&String::from_utf8_lossy(&bytes)) {
                return ReadyOutcome::Ready;
            }
        }
        let now = Instant::now();
        if now >= deadline {
            return ReadyOutcome::TimedOut;
        }
        std::thread::sleep(poll_interval.min(deadline - now));
    }
}

#[cfg(test)]
#[path = "readiness_tests.rs"]
mod tests;
