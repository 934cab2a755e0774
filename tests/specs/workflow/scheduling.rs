// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `workflow run --in` schedules rather than runs immediately, and
//! `workflow cancel` reaches a scheduled run (spec.md §8 scenario 5).

use crate::prelude::*;

const DOC: &str = r#"
name: scheduled-demo
stages:
  - name: only
    type: worker
    prompt: "echo scheduled"
"#;

#[test]
fn scheduled_run_can_be_cancelled_before_it_starts() {
    let temp = Workdir::new();
    let doc_path = temp.write("workflow.yaml", DOC);

    let mut child = temp.swarm_background(&[
        "workflow",
        "run",
        doc_path.to_str().expect("utf8 path"),
        "--in",
        "10m",
    ]);

    let state_path = temp.workflow_state_path("scheduled-demo");
    let scheduled = wait_for(SPEC_WAIT_MAX_MS, || {
        std::fs::read_to_string(&state_path)
            .ok()
            .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok())
            .is_some_and(|v| v["status"] == "scheduled")
    });
    assert!(scheduled, "workflow should reach status=scheduled within the wait window");

    temp.swarm().args(["workflow", "cancel", "scheduled-demo"]).passes();

    let cancelled = wait_for(SPEC_WAIT_MAX_MS, || {
        std::fs::read_to_string(&state_path)
            .ok()
            .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok())
            .is_some_and(|v| v["status"] == "cancelled")
    });
    assert!(cancelled, "workflow should reach status=cancelled after cancel");

    let exited = wait_for(SPEC_WAIT_MAX_MS, || {
        matches!(child.try_wait(), Ok(Some(_)))
    });
    if !exited {
        let _ = child.kill();
        let _ = child.wait();
    }
}
