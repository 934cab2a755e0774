// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `respawn` preserves cmd/env/cwd/tags/backend exactly (spec.md §8
//! scenario 3).

use crate::prelude::*;

#[test]
fn respawn_preserves_cmd_env_cwd_and_tags() {
    let temp = Workdir::new();
    let cwd = tempfile::tempdir().expect("cwd tempdir");

    temp.swarm()
        .args([
            "spawn",
            "w",
            "--cwd",
            cwd.path().to_str().expect("utf8 path"),
            "--env",
            "MY_VAR=hello",
            "--env",
            "OTHER_VAR=world",
            "--tag",
            "env:test",
            "--tag",
            "role:worker",
            "--",
            "bash",
            "-c",
            "sleep 300",
        ])
        .passes();

    let before = temp.swarm().args(["-o", "json", "status", "w"]).passes().stdout_json();

    temp.swarm().args(["kill", "w"]).passes();

    let after = temp.swarm().args(["-o", "json", "respawn", "w"]).passes().stdout_json();

    assert_eq!(after["cmd"], before["cmd"]);
    assert_eq!(after["env"], before["env"]);
    assert_eq!(after["cwd"], before["cwd"]);
    assert_eq!(after["tags"], before["tags"]);
    assert_eq!(after["status"], "running");
    assert!(after["pid"].is_number(), "respawned worker should carry a fresh pid");
}
