// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use swarm_core::SwarmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend rejected operation: {0}")]
    Rejected(String),

    #[error("not supported by this backend: {0}")]
    NotSupported(String),
}

impl From<BackendError> for SwarmError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Io(e) => SwarmError::TransientIo(e.to_string()),
            BackendError::Rejected(msg) => SwarmError::BackendFailure(msg),
            BackendError::NotSupported(msg) => SwarmError::InvalidInput(msg),
        }
    }
}
