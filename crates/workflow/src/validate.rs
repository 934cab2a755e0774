// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow document validation (spec.md §4.5): run before any execution,
//! never as a side effect of `run` or `validate` alone — both call this.

use std::collections::HashSet;
use swarm_core::{OnComplete, StageType, WorkflowDoc};

/// The outcome of validating a document: hard errors (any of which make
/// the document unrunnable) and soft warnings (surfaced but non-fatal —
/// e.g. a `prompt-file` that doesn't exist yet, "to allow packaging
/// flexibility", spec.md §4.5 rule 4).
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a parsed workflow document against spec.md §4.5's five rules.
pub fn validate(doc: &WorkflowDoc) -> ValidationReport {
    let mut report = ValidationReport::default();

    if doc.name.trim().is_empty() {
        report.errors.push("workflow name must not be empty".to_string());
    }
    if doc.stages.is_empty() {
        report.errors.push("workflow must have at least one stage".to_string());
    }

    let mut seen = HashSet::new();
    for stage in &doc.stages {
        if stage.name.trim().is_empty() {
            report.errors.push("stage name must not be empty".to_string());
        } else if !seen.insert(stage.name.as_str()) {
            report.errors.push(format!("duplicate stage name: {}", stage.name));
        }

        if stage.stage_type == StageType::Ralph {
            match stage.max_retries {
                Some(n) if n >= 1 => {}
                Some(_) => report.errors.push(format!(
                    "stage '{}': type ralph requires max-retries >= 1",
                    stage.name
                )),
                None => report.errors.push(format!(
                    "stage '{}': type ralph requires max-retries",
                    stage.name
                )),
            }
        }

        match (&stage.prompt, &stage.prompt_file) {
            (Some(_), None) | (None, Some(_)) => {}
            (Some(_), Some(_)) => report.errors.push(format!(
                "stage '{}': exactly one of prompt or prompt-file is allowed, not both",
                stage.name
            )),
            (None, None) => report.errors.push(format!(
                "stage '{}': exactly one of prompt or prompt-file is required",
                stage.name
            )),
        }

        if let Some(path) = &stage.prompt_file {
            if !path.exists() {
                report.warnings.push(format!(
                    "stage '{}': prompt-file {} does not exist yet",
                    stage.name,
                    path.display()
                ));
            }
        }

        if let OnComplete::Goto(target) = &stage.on_complete {
            if !doc.stages.iter().any(|s| &s.name == target) {
                report.errors.push(format!(
                    "stage '{}': goto target '{target}' is not a declared stage",
                    stage.name
                ));
            }
        }
    }

    report
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
