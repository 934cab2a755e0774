// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Duration/time literals accepted by workflow documents: `Ns`/`Nm`/`Nh`
//! durations and `HH:MM` local times.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// A duration parsed from the `Ns`/`Nm`/`Nh` literal grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecDuration(pub Duration);

impl SpecDuration {
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err("empty duration".to_string());
        }
        let (digits, unit) = input.split_at(input.len() - 1);
        let n: u64 = digits
            .parse()
            .map_err(|_| format!("invalid duration {input:?}: expected digits followed by s/m/h"))?;
        let secs = match unit {
            "s" => n,
            "m" => n * 60,
            "h" => n * 3600,
            other => {
                return Err(format!(
                    "invalid duration unit {other:?} in {input:?}: expected one of s, m, h"
                ))
            }
        };
        Ok(Self(Duration::from_secs(secs)))
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl fmt::Display for SpecDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        if secs % 3600 == 0 && secs != 0 {
            write!(f, "{}h", secs / 3600)
        } else if secs % 60 == 0 && secs != 0 {
            write!(f, "{}m", secs / 60)
        } else {
            write!(f, "{secs}s")
        }
    }
}

impl Serialize for SpecDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SpecDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        SpecDuration::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A local wall-clock time-of-day, `HH:MM`, used by `workflow run --at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl LocalTimeOfDay {
    pub fn parse(input: &str) -> Result<Self, String> {
        let (h, m) = input
            .split_once(':')
            .ok_or_else(|| format!("invalid time {input:?}: expected HH:MM"))?;
        let hour: u32 = h
            .parse()
            .map_err(|_| format!("invalid hour in {input:?}"))?;
        let minute: u32 = m
            .parse()
            .map_err(|_| format!("invalid minute in {input:?}"))?;
        if hour > 23 || minute > 59 {
            return Err(format!("time {input:?} out of range"));
        }
        Ok(Self { hour, minute })
    }
}

#[cfg(test)]
#[path = "duration_spec_tests.rs"]
mod tests;
