// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use swarm_core::SwarmError;
use thiserror::Error;

/// Failures from the atomic-replace load/save path.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("state directory could not be resolved: {0}")]
    NoStateDir(String),
}

impl From<StorageError> for SwarmError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => SwarmError::TransientIo(e.to_string()),
            StorageError::Json(e) => SwarmError::CorruptState(e.to_string()),
            StorageError::NoStateDir(msg) => SwarmError::InvalidInput(msg),
        }
    }
}
