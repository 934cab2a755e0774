// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow document model: the parsed, not-yet-validated shape of a
//! workflow YAML/JSON file.

use crate::duration_spec::SpecDuration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What happens when a stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnFailure {
    #[default]
    Fail,
    Retry,
    Skip,
}

/// What happens when a stage completes successfully.
///
/// `goto:<stage-name>` is parsed from a single string, not a map — a
/// custom (de)serializer generalizing the teacher's string-tagged
/// transition fields (`crates/runbook`'s `on_done`/`on_fail` step
/// transitions are maps; here the wire shape fixes a plain string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnComplete {
    Stop,
    Next,
    Goto(String),
}

impl Default for OnComplete {
    fn default() -> Self {
        OnComplete::Next
    }
}

impl Serialize for OnComplete {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = match self {
            OnComplete::Stop => "stop".to_string(),
            OnComplete::Next => "next".to_string(),
            OnComplete::Goto(name) => format!("goto:{name}"),
        };
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for OnComplete {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        OnComplete::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl OnComplete {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "stop" => Ok(OnComplete::Stop),
            "next" => Ok(OnComplete::Next),
            other => match other.strip_prefix("goto:") {
                Some(target) if !target.is_empty() => Ok(OnComplete::Goto(target.to_string())),
                _ => Err(format!(
                    "invalid on-complete {other:?}: expected stop, next, or goto:<stage-name>"
                )),
            },
        }
    }
}

/// Stage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageType {
    Worker,
    Ralph,
}

/// The prompt source for a stage — exactly one of inline or file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    Inline(String),
    File(PathBuf),
}

/// One stage of a workflow document, as parsed (not yet validated).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StageDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub stage_type: StageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(rename = "prompt-file", default, skip_serializing_if = "Option::is_none")]
    pub prompt_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<SpecDuration>,
    #[serde(rename = "on-failure", default)]
    pub on_failure: OnFailure,
    #[serde(rename = "on-complete", default)]
    pub on_complete: OnComplete,
    /// Required and positive when `stage_type == Ralph`. Also recognizes
    /// the original prototype's `max-iterations` spelling as an alias.
    #[serde(
        rename = "max-retries",
        alias = "max-iterations",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_retries: Option<u32>,
    /// Ralph-stage completion marker: a literal substring searched for in
    /// captured worker output.
    #[serde(rename = "done-pattern", default, skip_serializing_if = "Option::is_none")]
    pub done_pattern: Option<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StageDoc {
    pub fn prompt_source(&self) -> Option<PromptSource> {
        match (&self.prompt, &self.prompt_file) {
            (Some(p), None) => Some(PromptSource::Inline(p.clone())),
            (None, Some(p)) => Some(PromptSource::File(p.clone())),
            _ => None,
        }
    }
}

/// A parsed workflow document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowDoc {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat: Option<SpecDuration>,
    #[serde(rename = "heartbeat-expire", default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_expire: Option<SpecDuration>,
    #[serde(rename = "heartbeat-message", default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_message: Option<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub stages: Vec<StageDoc>,
}

impl WorkflowDoc {
    pub fn parse_yaml(input: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(input)
    }

    pub fn stage(&self, name: &str) -> Option<&StageDoc> {
        self.stages.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
#[path = "workflow_doc_tests.rs"]
mod tests;
