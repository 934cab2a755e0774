// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! swarm - a local worker-fleet orchestrator

mod color;
mod commands;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{workflow, worker};
use output::OutputFormat;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

#[derive(Parser)]
#[command(
    name = "swarm",
    version = VERSION,
    about = "Spawn, track, and orchestrate local worker processes",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spawn a new worker
    Spawn(worker::SpawnArgs),
    /// Report a worker's status (exit 0 running, 1 stopped, 2 not found)
    Status {
        /// Worker name
        name: String,
    },
    /// List workers
    Ls {
        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Send input to a running worker
    Send {
        /// Worker name
        name: String,
        /// Text to send, followed by a newline
        payload: String,
    },
    /// Show a worker's captured output
    Logs {
        /// Worker name
        name: String,
        /// Only show the last N lines
        #[arg(short = 'n', long)]
        tail: Option<usize>,
    },
    /// Stop a worker
    Kill {
        /// Worker name
        name: String,
    },
    /// Re-run a stopped worker with its original command/env/cwd/tags/backend
    Respawn {
        /// Worker name
        name: String,
    },
    /// Remove a worker's record and log artifacts
    Clean {
        /// Worker name
        name: String,
    },
    /// Workflow engine commands
    Workflow(workflow::WorkflowArgs),
}

fn main() {
    if let Err(e) = run() {
        let code = e.downcast_ref::<exit_error::ExitError>().map_or(1, |c| c.code);
        let msg = e.to_string();
        if !msg.is_empty() {
            eprintln!("Error: {msg}");
        }
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let root = state_root()?;
    let format = cli.output;

    match cli.command {
        Commands::Spawn(args) => worker::spawn(args, &root, format),
        Commands::Status { name } => worker::status(&name, &root, format),
        Commands::Ls { tag } => worker::ls(tag.as_deref(), &root, format),
        Commands::Send { name, payload } => worker::send(&name, &payload, &root),
        Commands::Logs { name, tail } => worker::logs(&name, tail, &root),
        Commands::Kill { name } => worker::kill(&name, &root),
        Commands::Respawn { name } => worker::respawn(&name, &root, format),
        Commands::Clean { name } => worker::clean(&name, &root),
        Commands::Workflow(args) => workflow::handle(args.command, &root, format),
    }
}

/// Resolve `SWARM_DIR`, falling back to `<home>/.swarm` (spec.md §6).
fn state_root() -> Result<PathBuf> {
    Ok(swarm_storage::paths::state_root()?)
}

/// Install a `tracing` subscriber once, controlled by `RUST_LOG` (default
/// `warn`) — the diagnostic channel spec.md §7 describes.
fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
