// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `swarm workflow` — validate, list, run, status, cancel, resume, logs
//! (spec.md §6).

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use swarm_core::WorkflowDoc;
use swarm_workflow::{RunWhen, WorkflowEngine};

use crate::color;
use crate::exit_error::{from_swarm_error, ExitError};
use crate::output::{format_or_json, handle_list, OutputFormat};

#[derive(Args)]
pub struct WorkflowArgs {
    #[command(subcommand)]
    pub command: WorkflowCommand,
}

#[derive(Subcommand)]
pub enum WorkflowCommand {
    /// Validate a workflow document without running it
    Validate {
        /// Path to the workflow YAML/JSON document
        file: PathBuf,
    },
    /// List persisted workflow runs
    List,
    /// Run a workflow document, driving it to completion in the foreground
    Run {
        /// Path to the workflow YAML/JSON document
        file: PathBuf,
        /// Start at a local wall-clock time, HH:MM
        #[arg(long)]
        at: Option<String>,
        /// Start after a duration, Ns/Nm/Nh
        #[arg(long = "in")]
        in_: Option<String>,
        /// Replace a prior run of this workflow name, cancelling it first
        #[arg(long)]
        force: bool,
    },
    /// Show a workflow's persisted runtime state
    Status {
        /// Workflow name
        name: String,
    },
    /// Cancel a scheduled or running workflow
    Cancel {
        /// Workflow name
        name: String,
    },
    /// Resume a cancelled or failed workflow from its last stage
    Resume {
        /// Path to the workflow YAML/JSON document (its `name` identifies
        /// which persisted run to resume)
        file: PathBuf,
    },
    /// Show captured output for a workflow, or one of its stages
    Logs {
        /// Workflow name
        name: String,
        /// Only this stage's captured output
        #[arg(long)]
        stage: Option<String>,
    },
}

pub fn handle(command: WorkflowCommand, root: &Path, format: OutputFormat) -> Result<()> {
    match command {
        WorkflowCommand::Validate { file } => validate(&file),
        WorkflowCommand::List => list(root, format),
        WorkflowCommand::Run { file, at, in_, force } => run(&file, at, in_, force, root, format),
        WorkflowCommand::Status { name } => status(&name, root, format),
        WorkflowCommand::Cancel { name } => cancel(&name, root),
        WorkflowCommand::Resume { file } => resume(&file, root, format),
        WorkflowCommand::Logs { name, stage } => logs(&name, stage.as_deref(), root),
    }
}

fn read_doc(file: &Path) -> Result<WorkflowDoc> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| ExitError::new(4, format!("{}: {e}", file.display())))?;
    WorkflowDoc::parse_yaml(&text).map_err(|e| ExitError::new(4, e.to_string()).into())
}

fn validate(file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| ExitError::new(4, format!("{}: {e}", file.display())))?;
    let report = WorkflowEngine::validate_source(&text)
        .map_err(|e| ExitError::new(4, format!("{}: {e}", file.display())))?;
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    if report.is_valid() {
        println!("{}", color::header("valid"));
        Ok(())
    } else {
        for error in &report.errors {
            eprintln!("error: {error}");
        }
        Err(ExitError::new(4, "workflow document is invalid").into())
    }
}

fn list(root: &Path, format: OutputFormat) -> Result<()> {
    let engine = WorkflowEngine::new(root.to_path_buf());
    let mut states = engine.list().map_err(from_swarm_error)?;
    states.sort_by(|a, b| a.name.cmp(&b.name));
    handle_list(format, &states, "No workflows", |items| {
        for state in items {
            println!(
                "{}  {}  stage {}",
                color::header(&state.name),
                color::literal(&state.status.to_string()),
                state.current_stage
            );
        }
    })
}

fn run(
    file: &Path,
    at: Option<String>,
    in_: Option<String>,
    force: bool,
    root: &Path,
    format: OutputFormat,
) -> Result<()> {
    let doc = read_doc(file)?;
    let when = RunWhen::from_flags(at.as_deref(), in_.as_deref()).map_err(|e| ExitError::new(4, e))?;
    let engine = WorkflowEngine::new(root.to_path_buf());
    let state = engine.run(&doc, when, force).map_err(from_swarm_error)?;
    format_or_json(format, &state, || {
        println!("workflow '{}' {}", color::header(&state.name), color::literal(&state.status.to_string()));
    })
}

fn status(name: &str, root: &Path, format: OutputFormat) -> Result<()> {
    let engine = WorkflowEngine::new(root.to_path_buf());
    let state = engine.status(name).map_err(from_swarm_error)?;
    format_or_json(format, &state, || {
        println!("{}  {}  stage {}", color::header(&state.name), color::literal(&state.status.to_string()), state.current_stage);
        for entry in &state.history {
            println!("  {}  {}  {}", entry.at.to_rfc3339(), entry.stage, entry.event);
        }
    })
}

fn cancel(name: &str, root: &Path) -> Result<()> {
    let engine = WorkflowEngine::new(root.to_path_buf());
    engine.cancel(name).map_err(from_swarm_error)?;
    println!("workflow '{}' cancelled", color::header(name));
    Ok(())
}

fn resume(file: &Path, root: &Path, format: OutputFormat) -> Result<()> {
    let doc = read_doc(file)?;
    let engine = WorkflowEngine::new(root.to_path_buf());
    let state = engine.resume(&doc, &doc.name).map_err(from_swarm_error)?;
    format_or_json(format, &state, || {
        println!("workflow '{}' {}", color::header(&state.name), color::literal(&state.status.to_string()));
    })
}

fn logs(name: &str, stage: Option<&str>, root: &Path) -> Result<()> {
    let engine = WorkflowEngine::new(root.to_path_buf());
    let bytes = engine.logs(name, stage).map_err(from_swarm_error)?;
    std::io::Write::write_all(&mut std::io::stdout(), &bytes)?;
    Ok(())
}
