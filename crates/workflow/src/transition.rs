// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The stage state machine (spec.md §4.5), as a pure decision function.
//!
//! Grounded on the teacher's `Decision`/`Effect` split
//! (`crates/core/src/decision.rs`/`effect.rs`): a transition is computed
//! as a pure function of the current state, then applied by the caller as
//! a sequence of effects (persist state, spawn/kill a worker, log a
//! history entry). The full event-sourced `Effect`/`Event` enum pair
//! isn't needed at this scale, so [`StageTransition`] stands in for it as
//! a single flat enum.

use swarm_core::{OnComplete, OnFailure};

/// What a stage run produced, before the state machine decides what to
/// do about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Completed,
    Failed,
}

/// The pure decision produced by folding a [`StageOutcome`] through a
/// stage's `on-failure`/`on-complete` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageTransition {
    /// Re-run the same stage (attempt count already incremented).
    Retry,
    /// Mark the stage skipped and advance past it.
    SkipTo(Option<usize>),
    /// The stage (and therefore the workflow) failed outright.
    Failed,
    /// Advance to the given stage index, or finish the workflow if `None`
    /// (ran past the last stage, or `on-complete: stop`).
    Advance(Option<usize>),
}

/// Default retry ceiling for stages that set `on-failure: retry` without
/// an explicit `max-retries` (only `ralph` stages require one). Recorded
/// as an explicit design decision: spec.md leaves this case open.
pub const DEFAULT_RETRY_LIMIT: u32 = 1;

/// Decide what happens after a stage fails, given its `on-failure` policy
/// and the attempt number (1-based) just completed. `stage_names`/
/// `current_index` resolve where a `skip` lands — the next stage in
/// sequence, same as `on-complete: next` (spec.md §4.5: "skip → mark
/// skipped, advance").
pub fn decide_on_failure(
    on_failure: OnFailure,
    attempt: u32,
    max_retries: Option<u32>,
    stage_names: &[String],
    current_index: usize,
) -> StageTransition {
    match on_failure {
        OnFailure::Fail => StageTransition::Failed,
        OnFailure::Skip => {
            let next = current_index + 1;
            StageTransition::SkipTo(if next < stage_names.len() { Some(next) } else { None })
        }
        OnFailure::Retry => {
            let limit = max_retries.unwrap_or(DEFAULT_RETRY_LIMIT);
            if attempt < limit {
                StageTransition::Retry
            } else {
                StageTransition::Failed
            }
        }
    }
}

/// Decide what happens after a stage completes, given its `on-complete`
/// policy, the full ordered stage-name list, and the current stage index.
pub fn decide_on_complete(
    on_complete: &OnComplete,
    stage_names: &[String],
    current_index: usize,
) -> StageTransition {
    match on_complete {
        OnComplete::Stop => StageTransition::Advance(None),
        OnComplete::Next => {
            let next = current_index + 1;
            if next < stage_names.len() {
                StageTransition::Advance(Some(next))
            } else {
                StageTransition::Advance(None)
            }
        }
        OnComplete::Goto(target) => {
            let idx = stage_names.iter().position(|n| n == target);
            StageTransition::Advance(idx)
        }
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
