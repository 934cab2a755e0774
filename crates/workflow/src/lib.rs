// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! swarm-workflow: the Workflow Engine (spec.md §4.5). Parses and
//! validates workflow documents, runs the stage state machine against
//! `swarm-supervisor`, persists workflow state via `swarm-storage`, and
//! implements scheduling, cancellation, resume, and heartbeats.

pub mod engine;
pub mod error;
pub mod scheduling;
pub mod transition;
pub mod validate;

pub use engine::WorkflowEngine;
pub use error::WorkflowError;
pub use scheduling::RunWhen;
pub use transition::{decide_on_complete, decide_on_failure, StageOutcome, StageTransition};
pub use validate::{validate, ValidationReport};
