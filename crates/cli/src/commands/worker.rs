// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker command handlers — the flat `spawn`/`status`/`ls`/`send`/
//! `logs`/`kill`/`respawn`/`clean` surface (spec.md §6).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use swarm_core::{BackendKind, SpecDuration, WorkerRecord};
use swarm_supervisor::{SpawnOptions, StatusReport, Supervisor};

use crate::color;
use crate::exit_error::{from_swarm_error, ExitError};
use crate::output::{format_elapsed, format_or_json, handle_list, OutputFormat};

#[derive(Args)]
pub struct SpawnArgs {
    /// Worker name, unique within the registry
    pub name: String,

    /// Command to run, e.g. `swarm spawn w -- sleep 300`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub cmd: Vec<String>,

    /// Working directory (default: current directory)
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Environment variable overlay, KEY=VALUE (repeatable)
    #[arg(long = "env", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Run inside a detached terminal-multiplexer session instead of a
    /// direct child process
    #[arg(long)]
    pub session: bool,

    /// Wait for the worker to reach an input prompt before returning
    #[arg(long)]
    pub ready_wait: bool,

    /// Readiness timeout (`Ns`/`Nm`/`Nh`, default 30s)
    #[arg(long)]
    pub ready_timeout: Option<String>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) => Ok((k.to_string(), v.to_string())),
        None => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}

pub fn spawn(args: SpawnArgs, root: &Path, format: OutputFormat) -> Result<()> {
    let cwd = args
        .cwd
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let ready_timeout = args
        .ready_timeout
        .as_deref()
        .map(SpecDuration::parse)
        .transpose()
        .map_err(|e| ExitError::new(4, e))?
        .map(SpecDuration::as_duration);

    let supervisor = Supervisor::new(root.to_path_buf());
    let record = supervisor
        .spawn(SpawnOptions {
            name: args.name,
            cmd: args.cmd,
            env: args.env.into_iter().collect::<BTreeMap<_, _>>(),
            cwd: cwd.to_string_lossy().into_owned(),
            tags: args.tags,
            backend: if args.session { BackendKind::Session } else { BackendKind::Direct },
            ready_wait: args.ready_wait,
            ready_timeout,
        })
        .map_err(from_swarm_error)?;

    format_or_json(format, &record, || {
        println!("worker '{}' spawned ({})", color::header(record.name.as_str()), binding_desc(&record));
    })
}

pub fn status(name: &str, root: &Path, format: OutputFormat) -> Result<()> {
    let supervisor = Supervisor::new(root.to_path_buf());
    match supervisor.status(name).map_err(from_swarm_error)? {
        StatusReport::Running(record) => {
            format_or_json(format, &record, || println!("{}", describe(&record)))?;
            Ok(())
        }
        StatusReport::Stopped(record) => {
            format_or_json(format, &record, || println!("{}", describe(&record)))?;
            Err(ExitError::new(1, format!("worker '{name}' is stopped")).into())
        }
        StatusReport::NotFound => Err(ExitError::new(2, format!("worker '{name}' not found")).into()),
    }
}

pub fn ls(tag: Option<&str>, root: &Path, format: OutputFormat) -> Result<()> {
    let supervisor = Supervisor::new(root.to_path_buf());
    let records = supervisor.list(tag).map_err(from_swarm_error)?;
    handle_list(format, &records, "No workers", |items| {
        for record in items {
            println!("{}", describe(record));
        }
    })
}

pub fn send(name: &str, payload: &str, root: &Path) -> Result<()> {
    let supervisor = Supervisor::new(root.to_path_buf());
    supervisor.send(name, payload).map_err(from_swarm_error)?;
    println!("sent to '{}'", color::header(name));
    Ok(())
}

pub fn logs(name: &str, tail: Option<usize>, root: &Path) -> Result<()> {
    let supervisor = Supervisor::new(root.to_path_buf());
    let bytes = supervisor.logs(name, tail).map_err(from_swarm_error)?;
    std::io::Write::write_all(&mut std::io::stdout(), &bytes)?;
    Ok(())
}

pub fn kill(name: &str, root: &Path) -> Result<()> {
    let supervisor = Supervisor::new(root.to_path_buf());
    supervisor.kill(name).map_err(from_swarm_error)?;
    println!("worker '{}' stopped", color::header(name));
    Ok(())
}

pub fn respawn(name: &str, root: &Path, format: OutputFormat) -> Result<()> {
    let supervisor = Supervisor::new(root.to_path_buf());
    let record = supervisor.respawn(name).map_err(from_swarm_error)?;
    format_or_json(format, &record, || {
        println!("worker '{}' respawned ({})", color::header(record.name.as_str()), binding_desc(&record));
    })
}

pub fn clean(name: &str, root: &Path) -> Result<()> {
    let supervisor = Supervisor::new(root.to_path_buf());
    supervisor.clean(name).map_err(from_swarm_error)?;
    println!("worker '{}' removed", color::header(name));
    Ok(())
}

fn binding_desc(record: &WorkerRecord) -> String {
    match (&record.pid, &record.tmux) {
        (Some(pid), _) => format!("pid {pid}"),
        (None, Some(handle)) => format!("session {}:{}", handle.session, handle.window),
        (None, None) => "no backend binding".to_string(),
    }
}

fn describe(record: &WorkerRecord) -> String {
    let elapsed = (chrono::Utc::now() - record.started).num_seconds();
    let tags = if record.tags.is_empty() { String::new() } else { format!(" [{}]", record.tags.join(", ")) };
    format!(
        "{}  {}  {}  {}{}",
        color::header(record.name.as_str()),
        color::literal(&record.status.to_string()),
        color::context(&format!("up {}", format_elapsed(elapsed.max(0)))),
        color::muted(&binding_desc(record)),
        tags,
    )
}
