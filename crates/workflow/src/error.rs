// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use swarm_core::SwarmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("workflow document could not be parsed: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("workflow document is invalid: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl From<WorkflowError> for SwarmError {
    fn from(err: WorkflowError) -> Self {
        SwarmError::InvalidInput(err.to_string())
    }
}
