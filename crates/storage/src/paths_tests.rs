// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::path::Path;

#[test]
#[serial]
fn state_root_honors_swarm_dir_env_var() {
    std::env::set_var("SWARM_DIR", "/tmp/my-swarm-dir");
    let root = state_root().unwrap();
    std::env::remove_var("SWARM_DIR");
    assert_eq!(root, Path::new("/tmp/my-swarm-dir"));
}

#[test]
fn registry_path_is_state_json() {
    assert_eq!(registry_path(Path::new("/root/.swarm")), Path::new("/root/.swarm/state.json"));
}

#[test]
fn worker_log_path_is_under_logs() {
    assert_eq!(
        worker_log_path(Path::new("/root/.swarm"), "w1"),
        Path::new("/root/.swarm/logs/w1.log")
    );
}

#[test]
fn workflow_state_path_is_per_workflow() {
    assert_eq!(
        workflow_state_path(Path::new("/root/.swarm"), "wf1"),
        Path::new("/root/.swarm/workflows/wf1/state.json")
    );
}

#[test]
fn workflow_stage_log_path_is_per_stage() {
    assert_eq!(
        workflow_stage_log_path(Path::new("/root/.swarm"), "wf1", "stage1"),
        Path::new("/root/.swarm/workflows/wf1/logs/stage1.log")
    );
}
