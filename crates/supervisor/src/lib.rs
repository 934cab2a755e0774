// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! swarm-supervisor: the Worker Supervisor (spec.md §4.4) and the
//! Readiness Detector (spec.md §4.3) it delegates to on `spawn
//! --ready-wait`.
//!
//! Mediates between callers, the two `swarm-backends` implementations,
//! and `swarm-storage`'s atomic registry. Every public operation here
//! reads the registry fresh and saves it back — no in-memory supervisor
//! state survives across calls (spec.md §9: the CLI is short-lived, the
//! supervised children are not).

pub mod readiness;
pub mod reconcile;
pub mod supervisor;

pub use readiness::{wait_ready, ReadyOutcome};
pub use supervisor::{SpawnOptions, StatusReport, Supervisor};
