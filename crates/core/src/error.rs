// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured error kinds shared across the workspace.
//!
//! Every fallible operation in `swarm-backends`, `swarm-storage`,
//! `swarm-supervisor`, and `swarm-workflow` resolves to one of these kinds.
//! The CLI crate maps them to process exit codes at the boundary.

use thiserror::Error;

/// Error kinds from the system design, realized as a single enum.
#[derive(Debug, Error)]
pub enum SwarmError {
    /// Named worker/workflow absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Name collision on create.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Malformed argv, mutually exclusive flags, schema violations.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Multiplexer or OS rejected an operation, not locally recoverable.
    #[error("backend failure: {0}")]
    BackendFailure(String),

    /// Capture/poll I/O error that persisted past the caller's timeout.
    #[error("transient I/O error: {0}")]
    TransientIo(String),

    /// Persisted JSON was unparseable; caller already recovered by
    /// backup-and-reset, this variant exists for callers that need to
    /// surface the recovery as a warning rather than swallow it silently.
    #[error("corrupt state recovered: {0}")]
    CorruptState(String),
}

impl SwarmError {
    /// Exit code this error should produce at the CLI boundary.
    ///
    /// `status`/`kill`/etc. define their own success-path exit codes;
    /// this is only consulted on the error path.
    pub fn exit_code(&self) -> i32 {
        match self {
            SwarmError::NotFound(_) => 2,
            SwarmError::Duplicate(_) => 3,
            SwarmError::InvalidInput(_) => 4,
            SwarmError::BackendFailure(_) => 5,
            SwarmError::TransientIo(_) => 6,
            SwarmError::CorruptState(_) => 0, // recovered, not a failure
        }
    }
}

pub type Result<T> = std::result::Result<T, SwarmError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
