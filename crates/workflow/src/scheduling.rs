// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `workflow run`'s `--at`/`--in` scheduling (spec.md §4.5).

use chrono::{DateTime, Duration as ChronoDuration, Local, TimeZone, Utc};
use swarm_core::{LocalTimeOfDay, SpecDuration};

/// When a workflow run should begin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunWhen {
    Now,
    At(LocalTimeOfDay),
    In(SpecDuration),
}

impl RunWhen {
    /// At most one of `at`/`in_` may be given — both together is a
    /// validation error (spec.md §4.5).
    pub fn from_flags(at: Option<&str>, in_: Option<&str>) -> Result<Self, String> {
        match (at, in_) {
            (Some(_), Some(_)) => {
                Err("--at and --in are mutually exclusive".to_string())
            }
            (Some(at), None) => LocalTimeOfDay::parse(at).map(RunWhen::At),
            (None, Some(in_)) => SpecDuration::parse(in_).map(RunWhen::In),
            (None, None) => Ok(RunWhen::Now),
        }
    }

    /// Resolve to an absolute UTC instant, or `None` if the run starts
    /// immediately. `--at HH:MM` in the past rolls over to tomorrow (a
    /// local wall-clock time is always in the future or the next
    /// occurrence of it).
    pub fn resolve(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            RunWhen::Now => None,
            RunWhen::In(duration) => Some(now + ChronoDuration::from_std(duration.as_duration()).unwrap_or_default()),
            RunWhen::At(time) => Some(next_local_occurrence(*time, now)),
        }
    }
}

fn next_local_occurrence(time: LocalTimeOfDay, now: DateTime<Utc>) -> DateTime<Utc> {
    let local_now = now.with_timezone(&Local);
    let today = local_now.date_naive();
    let candidate_naive = today.and_hms_opt(time.hour, time.minute, 0).unwrap_or(local_now.naive_local());
    let candidate = Local
        .from_local_datetime(&candidate_naive)
        .single()
        .unwrap_or(local_now);
    let candidate = if candidate <= local_now { candidate + ChronoDuration::days(1) } else { candidate };
    candidate.with_timezone(&Utc)
}

#[cfg(test)]
#[path = "scheduling_tests.rs"]
mod tests;
