// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session-backend lifecycle (spec.md §8 scenario 2). Skipped when no
//! `tmux` is available on the host, mirroring `swarm-backends`'
//! `session_tests.rs` guard.

use crate::prelude::*;

#[test]
fn session_worker_send_capture_kill_clean() {
    if !tmux_available() {
        eprintln!("skipping: tmux not available");
        return;
    }
    let temp = Workdir::new();

    temp.swarm().args(["spawn", "--session", "w", "--", "bash"]).passes();

    let listed = temp.swarm().args(["-o", "json", "ls"]).passes();
    let workers = listed.stdout_json();
    assert_eq!(workers[0]["status"], "running");
    assert!(workers[0]["pid"].is_null(), "session worker must not carry a pid");
    assert!(workers[0]["tmux"].is_object(), "session worker must carry a tmux handle");

    temp.swarm().args(["send", "w", "echo LIFECYCLE_TEST"]).passes();

    let saw_it = wait_for(SPEC_WAIT_MAX_MS, || {
        temp.swarm().args(["logs", "w"]).passes().stdout().contains("LIFECYCLE_TEST")
    });
    assert!(saw_it, "logs should contain LIFECYCLE_TEST within the wait window");

    temp.swarm().args(["kill", "w"]).passes();
    assert_eq!(temp.swarm().args(["status", "w"]).fails().code(), 1);

    temp.swarm().args(["clean", "w"]).passes();
    let after_clean = temp.swarm().args(["-o", "json", "ls"]).passes();
    assert_eq!(after_clean.stdout_json().as_array().expect("array").len(), 0);
}
