// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! swarm-core: shared types for the worker-fleet orchestrator.
//!
//! Defines the data model for workers and workflow documents/runtime
//! state, and nothing that touches the filesystem, a process, or a
//! terminal multiplexer — those live in `swarm-storage` and
//! `swarm-backends`.

pub mod macros;

pub mod duration_spec;
pub mod error;
pub mod ids;
pub mod worker;
pub mod workflow_doc;
pub mod workflow_state;

pub use duration_spec::{LocalTimeOfDay, SpecDuration};
pub use error::{Result, SwarmError};
pub use ids::{validate_name, WorkerName, WorkflowName};
pub use worker::{Backend, BackendKind, TmuxHandle, WorkerRecord, WorkerStatus};
pub use workflow_doc::{OnComplete, OnFailure, PromptSource, StageDoc, StageType, WorkflowDoc};
pub use workflow_state::{HistoryEntry, WorkflowState, WorkflowStatus};
