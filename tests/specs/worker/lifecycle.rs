// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Direct-backend lifecycle (spec.md §8 scenario 1).

use crate::prelude::*;

fn pid_is_alive(pid: u64) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .is_ok_and(|s| s.success())
}

#[test]
fn direct_worker_spawns_runs_stops_and_cleans() {
    let temp = Workdir::new();

    temp.swarm().args(["spawn", "w", "--", "sleep", "300"]).passes();

    let listed = temp.swarm().args(["-o", "json", "ls"]).passes();
    let workers = listed.stdout_json();
    let workers = workers.as_array().expect("ls json is an array");
    assert_eq!(workers.len(), 1);
    let w = &workers[0];
    assert_eq!(w["name"], "w");
    assert_eq!(w["status"], "running");
    assert!(w["pid"].is_number(), "direct worker must carry a pid: {w}");
    assert!(w["tmux"].is_null(), "direct worker must not carry a tmux handle: {w}");

    let pid = w["pid"].as_u64().expect("pid is a number");
    assert!(pid_is_alive(pid), "spawned pid {pid} should be alive");

    temp.swarm().args(["kill", "w"]).passes();

    let after_kill = temp.swarm().args(["-o", "json", "ls"]).passes();
    let workers = after_kill.stdout_json();
    assert_eq!(workers[0]["status"], "stopped");

    let dead = wait_for(SPEC_WAIT_MAX_MS, || !pid_is_alive(pid));
    assert!(dead, "pid {pid} should be gone after kill");

    temp.swarm().args(["clean", "w"]).passes();

    let after_clean = temp.swarm().args(["-o", "json", "ls"]).passes();
    let workers = after_clean.stdout_json();
    assert_eq!(workers.as_array().expect("array").len(), 0, "registry should be empty after clean");
}

#[test]
fn status_exit_codes_cover_running_stopped_and_not_found() {
    let temp = Workdir::new();

    temp.swarm().args(["spawn", "w", "--", "sleep", "300"]).passes();
    assert_eq!(temp.swarm().args(["status", "w"]).passes().code(), 0);

    temp.swarm().args(["kill", "w"]).passes();
    assert_eq!(temp.swarm().args(["status", "w"]).fails().code(), 1);

    assert_eq!(temp.swarm().args(["status", "nope"]).fails().code(), 2);
}
