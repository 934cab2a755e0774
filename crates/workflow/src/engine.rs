// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Workflow Engine (spec.md §4.5): parses/validates workflow
//! documents, runs the stage state machine, persists workflow state, and
//! implements scheduling, cancellation, resume, and heartbeats.
//!
//! The monitor loop here is grounded on the teacher's
//! `crates/daemon/src/engine/runtime/monitor.rs` cooperative-poll shape,
//! adapted from "poll an async event channel" to "sleep a bounded tick,
//! check cancellation, check child liveness/timeout, advance the state
//! machine" — a plain loop, not an async task, since `workflow run` is
//! itself the blocking foreground process (spec.md §9: there is no
//! always-on daemon here).

use crate::scheduling::RunWhen;
use crate::transition::{decide_on_complete, decide_on_failure, StageOutcome, StageTransition};
use crate::validate::{self, ValidationReport};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use swarm_core::{
    BackendKind, HistoryEntry, Result, StageDoc, StageType, SwarmError, WorkflowDoc, WorkflowState,
    WorkflowStatus,
};
use swarm_storage::{paths, workflow_store};
use swarm_supervisor::{SpawnOptions, StatusReport, Supervisor};

/// Tick granularity for the monitor loop's cooperative polling (spec.md
/// §5: "no operation blocks indefinitely without a timeout"; cancellation
/// is observed "at the next poll (≤1s)").
const TICK: Duration = Duration::from_millis(500);

pub struct WorkflowEngine {
    root: PathBuf,
    supervisor: Supervisor,
}

impl WorkflowEngine {
    pub fn new(root: PathBuf) -> Self {
        let supervisor = Supervisor::new(root.clone());
        Self { root, supervisor }
    }

    fn state_path(&self, name: &str) -> PathBuf {
        paths::workflow_state_path(&self.root, name)
    }

    fn load_state(&self, name: &str) -> Result<Option<WorkflowState>> {
        Ok(workflow_store::load(&self.state_path(name))?)
    }

    fn save_state(&self, state: &WorkflowState) -> Result<()> {
        Ok(workflow_store::save(&self.state_path(&state.name), state)?)
    }

    fn is_cancelled(&self, name: &str) -> Result<bool> {
        Ok(matches!(self.load_state(name)?, Some(s) if s.status == WorkflowStatus::Cancelled))
    }

    /// Validate a document's YAML text without running it.
    pub fn validate_source(yaml: &str) -> std::result::Result<ValidationReport, serde_yaml::Error> {
        let doc = WorkflowDoc::parse_yaml(yaml)?;
        Ok(validate::validate(&doc))
    }

    /// All persisted workflow states, newest directory entries first is
    /// not guaranteed — callers sort as needed for display.
    pub fn list(&self) -> Result<Vec<WorkflowState>> {
        let root = paths::workflows_root(&self.root);
        let mut out = Vec::new();
        let entries = match fs::read_dir(&root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(out),
            Err(e) => return Err(SwarmError::TransientIo(e.to_string())),
        };
        for entry in entries {
            let entry = entry.map_err(|e| SwarmError::TransientIo(e.to_string()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(state) = self.load_state(&name)? {
                out.push(state);
            }
        }
        Ok(out)
    }

    pub fn status(&self, name: &str) -> Result<WorkflowState> {
        self.load_state(name)?.ok_or_else(|| SwarmError::NotFound(name.to_string()))
    }

    /// Captured output for one stage, or (if `stage` is `None`) every
    /// stage's log concatenated in file-listing order.
    pub fn logs(&self, name: &str, stage: Option<&str>) -> Result<Vec<u8>> {
        if self.load_state(name)?.is_none() {
            return Err(SwarmError::NotFound(name.to_string()));
        }
        if let Some(stage) = stage {
            let path = paths::workflow_stage_log_path(&self.root, name, stage);
            return Ok(fs::read(&path).unwrap_or_default());
        }
        let dir = paths::workflow_logs_dir(&self.root, name);
        let mut out = Vec::new();
        if let Ok(entries) = fs::read_dir(&dir) {
            let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
            paths.sort();
            for p in paths {
                out.extend(fs::read(&p).unwrap_or_default());
            }
        }
        Ok(out)
    }

    /// Mark a workflow cancelled and kill its active worker, if any.
    /// Cooperative: a concurrently running monitor loop observes this at
    /// its next poll (spec.md §5, ≤1s) and exits cleanly. A no-op success
    /// on an already-terminal workflow.
    pub fn cancel(&self, name: &str) -> Result<()> {
        let mut state = self.status(name)?;
        if state.status.is_terminal() {
            return Ok(());
        }
        if let Some(worker) = state.active_worker.take() {
            let _ = self.supervisor.kill(worker.as_str());
        }
        state.status = WorkflowStatus::Cancelled;
        state.history.push(HistoryEntry::new(
            state.history.last().map(|h| h.stage.clone()).unwrap_or_default(),
            "cancelled",
            Utc::now(),
        ));
        self.save_state(&state)
    }

    /// Resume a `cancelled`/`failed` workflow from its last non-terminal
    /// stage, retaining attempt counts, and drive it to completion.
    pub fn resume(&self, doc: &WorkflowDoc, name: &str) -> Result<WorkflowState> {
        let mut state = self.status(name)?;
        if !matches!(state.status, WorkflowStatus::Cancelled | WorkflowStatus::Failed) {
            return Err(SwarmError::InvalidInput(format!(
                "workflow '{name}' is not cancelled or failed, cannot resume"
            )));
        }
        state.status = WorkflowStatus::Running;
        self.save_state(&state)?;
        self.drive(doc, &mut state)?;
        Ok(state)
    }

    /// Run a freshly-parsed, freshly-validated document. Accepts at most
    /// one of `--at`/`--in`. Fails if a persisted state for this name
    /// already exists unless `force`, in which case the prior run is
    /// cancelled (if still active) and its state replaced.
    pub fn run(&self, doc: &WorkflowDoc, when: RunWhen, force: bool) -> Result<WorkflowState> {
        let report = validate::validate(doc);
        if !report.is_valid() {
            return Err(SwarmError::InvalidInput(report.errors.join("; ")));
        }
        for warning in &report.warnings {
            tracing::warn!(workflow = %doc.name, "{warning}");
        }

        if let Some(existing) = self.load_state(&doc.name)? {
            if !force {
                return Err(SwarmError::Duplicate(doc.name.clone()));
            }
            if !existing.status.is_terminal() {
                self.cancel(&doc.name)?;
            }
        }

        let now = Utc::now();
        let mut state = match when.resolve(now) {
            Some(at) => WorkflowState::scheduled(doc.name.clone(), at),
            None => WorkflowState::new(doc.name.clone()),
        };
        self.save_state(&state)?;

        if state.status == WorkflowStatus::Scheduled {
            let at = state.scheduled_for.unwrap_or(now);
            match self.sleep_until(&doc.name, at)? {
                SleepOutcome::Cancelled => return self.status(&doc.name),
                SleepOutcome::Due => {
                    state.status = WorkflowStatus::Running;
                    self.save_state(&state)?;
                }
            }
        }

        self.drive(doc, &mut state)?;
        Ok(state)
    }

    fn sleep_until(&self, name: &str, at: chrono::DateTime<Utc>) -> Result<SleepOutcome> {
        loop {
            if self.is_cancelled(name)? {
                return Ok(SleepOutcome::Cancelled);
            }
            if Utc::now() >= at {
                return Ok(SleepOutcome::Due);
            }
            std::thread::sleep(TICK);
        }
    }

    /// Drive the stage state machine to a terminal state, persisting
    /// after every transition (spec.md §5: "stage N's side effects are
    /// durable before stage N+1 begins").
    fn drive(&self, doc: &WorkflowDoc, state: &mut WorkflowState) -> Result<()> {
        let stage_names: Vec<String> = doc.stages.iter().map(|s| s.name.clone()).collect();

        loop {
            if self.is_cancelled(&doc.name)? {
                *state = self.status(&doc.name)?;
                return Ok(());
            }
            let Some(stage) = doc.stages.get(state.current_stage) else {
                state.status = WorkflowStatus::Completed;
                self.save_state(state)?;
                return Ok(());
            };

            let attempt = state.attempt_for(&stage.name) + 1;
            state.attempts.insert(stage.name.clone(), attempt);
            self.save_state(state)?;

            let worker_name = stage_worker_name(&doc.name, &stage.name);
            state.active_worker = Some(swarm_core::WorkerName::new(worker_name.clone()));
            self.save_state(state)?;

            let outcome = self.run_stage(doc, stage, &worker_name)?;
            state.active_worker = None;

            let transition = match outcome {
                StageOutcome::Completed => {
                    state.history.push(
                        HistoryEntry::new(&stage.name, "completed", Utc::now())
                            .with_detail(format!("attempt {attempt}")),
                    );
                    decide_on_complete(&stage.on_complete, &stage_names, state.current_stage)
                }
                StageOutcome::Failed => {
                    state.history.push(
                        HistoryEntry::new(&stage.name, "failed", Utc::now())
                            .with_detail(format!("attempt {attempt}")),
                    );
                    decide_on_failure(
                        stage.on_failure,
                        attempt,
                        stage.max_retries,
                        &stage_names,
                        state.current_stage,
                    )
                }
            };

            match transition {
                StageTransition::Retry => {
                    state.history.push(
                        HistoryEntry::new(&stage.name, "retrying", Utc::now())
                            .with_detail(format!("attempt {attempt} failed, will retry")),
                    );
                }
                StageTransition::SkipTo(next) => {
                    state.history.push(HistoryEntry::new(&stage.name, "skipped", Utc::now()));
                    match next {
                        Some(idx) => state.current_stage = idx,
                        None => {
                            state.status = WorkflowStatus::Completed;
                            self.save_state(state)?;
                            return Ok(());
                        }
                    }
                }
                StageTransition::Failed => {
                    state.status = WorkflowStatus::Failed;
                    self.save_state(state)?;
                    return Ok(());
                }
                StageTransition::Advance(next) => match next {
                    Some(idx) => state.current_stage = idx,
                    None => {
                        state.status = WorkflowStatus::Completed;
                        self.save_state(state)?;
                        return Ok(());
                    }
                },
            }
            self.save_state(state)?;
        }
    }

    /// Run one stage attempt to completion: spawn its worker, poll for
    /// exit/done-pattern/timeout/cancellation, and clean it up.
    ///
    /// Stages always spawn on the direct backend: `type = worker`'s
    /// completion is exit-code-driven (spec.md §4.5), which only the
    /// direct backend can report; `send`-based heartbeats degrade to a
    /// logged no-op against it (documented in DESIGN.md).
    fn run_stage(&self, doc: &WorkflowDoc, stage: &StageDoc, worker_name: &str) -> Result<StageOutcome> {
        let prompt = match stage_prompt(stage) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(stage = %stage.name, error = %e, "stage prompt unavailable");
                return Ok(StageOutcome::Failed);
            }
        };
        let mut env = doc.env.clone();
        env.extend(stage.env.clone());
        let mut tags = doc.tags.clone();
        tags.extend(stage.tags.clone());

        if let StatusReport::Running(_) | StatusReport::Stopped(_) =
            self.supervisor.status(worker_name)?
        {
            self.supervisor.clean(worker_name)?;
        }

        self.supervisor.spawn(SpawnOptions {
            name: worker_name.to_string(),
            cmd: vec!["sh".to_string(), "-c".to_string(), prompt],
            env,
            cwd: std::env::temp_dir().to_string_lossy().into_owned(),
            tags,
            backend: BackendKind::Direct,
            ready_wait: false,
            ready_timeout: None,
        })?;

        let outcome = match stage.stage_type {
            StageType::Worker => self.poll_worker_stage(doc, stage, worker_name),
            StageType::Ralph => self.poll_ralph_stage(doc, stage, worker_name),
        }?;

        let _ = self.supervisor.kill(worker_name);
        let _ = self.archive_stage_log(doc, stage, worker_name);
        let _ = self.supervisor.clean(worker_name);
        Ok(outcome)
    }

    fn poll_worker_stage(
        &self,
        doc: &WorkflowDoc,
        stage: &StageDoc,
        worker_name: &str,
    ) -> Result<StageOutcome> {
        let start = Instant::now();
        let timeout = stage.timeout.map(|d| d.as_duration());
        let mut last_heartbeat = Instant::now();

        loop {
            if self.is_cancelled(&doc.name)? {
                return Ok(StageOutcome::Failed);
            }
            if let Some(code) = self.supervisor.wait_for_exit(worker_name)? {
                return Ok(if code == 0 { StageOutcome::Completed } else { StageOutcome::Failed });
            }
            if let Some(timeout) = timeout {
                if start.elapsed() >= timeout {
                    return Ok(StageOutcome::Failed);
                }
            }
            self.maybe_heartbeat(doc, worker_name, start, &mut last_heartbeat);
            std::thread::sleep(TICK);
        }
    }

    fn poll_ralph_stage(
        &self,
        doc: &WorkflowDoc,
        stage: &StageDoc,
        worker_name: &str,
    ) -> Result<StageOutcome> {
        let done_pattern = stage.done_pattern.as_deref();
        let max_iterations = stage.max_retries.unwrap_or(1);
        let mut iteration = 1;
        let start = Instant::now();
        let timeout = stage.timeout.map(|d| d.as_duration());
        let mut last_heartbeat = Instant::now();

        loop {
            if self.is_cancelled(&doc.name)? {
                return Ok(StageOutcome::Failed);
            }

            let exited = self.supervisor.wait_for_exit(worker_name)?;
            let logs = self.supervisor.logs(worker_name, None).unwrap_or_default();
            let text = String::from_utf8_lossy(&logs);
            if let Some(pattern) = done_pattern {
                if text.contains(pattern) {
                    return Ok(StageOutcome::Completed);
                }
            }

            if let Some(timeout) = timeout {
                if start.elapsed() >= timeout {
                    return Ok(StageOutcome::Failed);
                }
            }

            if exited.is_some() {
                if iteration >= max_iterations {
                    return Ok(StageOutcome::Failed);
                }
                iteration += 1;
                self.supervisor.clean(worker_name)?;
                let prompt = stage_prompt(stage)?;
                let mut env = doc.env.clone();
                env.extend(stage.env.clone());
                self.supervisor.spawn(SpawnOptions {
                    name: worker_name.to_string(),
                    cmd: vec!["sh".to_string(), "-c".to_string(), prompt],
                    env,
                    cwd: std::env::temp_dir().to_string_lossy().into_owned(),
                    tags: stage.tags.clone(),
                    backend: BackendKind::Direct,
                    ready_wait: false,
                    ready_timeout: None,
                })?;
            }

            self.maybe_heartbeat(doc, worker_name, start, &mut last_heartbeat);
            std::thread::sleep(TICK);
        }
    }

    fn maybe_heartbeat(
        &self,
        doc: &WorkflowDoc,
        worker_name: &str,
        stage_start: Instant,
        last_heartbeat: &mut Instant,
    ) {
        let Some(interval) = doc.heartbeat else { return };
        let expire = doc.heartbeat_expire.map(|d| d.as_duration());
        if let Some(expire) = expire {
            if stage_start.elapsed() >= expire {
                return;
            }
        }
        if last_heartbeat.elapsed() < interval.as_duration() {
            return;
        }
        *last_heartbeat = Instant::now();
        let message = doc.heartbeat_message.as_deref().unwrap_or("heartbeat");
        match self.supervisor.send(worker_name, message) {
            Ok(()) => {}
            Err(_) => {
                tracing::debug!(worker = %worker_name, "heartbeat not supported by this worker's backend");
            }
        }
    }

    fn archive_stage_log(&self, doc: &WorkflowDoc, stage: &StageDoc, worker_name: &str) -> Result<()> {
        let bytes = self.supervisor.logs(worker_name, None)?;
        let dest = paths::workflow_stage_log_path(&self.root, &doc.name, &stage.name);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| SwarmError::TransientIo(e.to_string()))?;
        }
        fs::write(&dest, bytes).map_err(|e| SwarmError::TransientIo(e.to_string()))?;
        Ok(())
    }
}

enum SleepOutcome {
    Cancelled,
    Due,
}

fn stage_worker_name(workflow_name: &str, stage_name: &str) -> String {
    format!("wf-{workflow_name}-{stage_name}")
}

fn stage_prompt(stage: &StageDoc) -> Result<String> {
    match stage.prompt_source() {
        Some(swarm_core::PromptSource::Inline(text)) => Ok(text),
        Some(swarm_core::PromptSource::File(path)) => fs::read_to_string(&path)
            .map_err(|e| SwarmError::InvalidInput(format!("prompt-file {}: {e}", path.display()))),
        None => Err(SwarmError::InvalidInput(format!(
            "stage '{}' has neither prompt nor prompt-file",
            stage.name
        ))),
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
