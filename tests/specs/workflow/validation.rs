// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `workflow validate` rejects malformed documents with a non-zero exit
//! and a field-referencing error (spec.md §8 scenario 6).

use crate::prelude::*;

#[test]
fn duplicate_stage_name_is_rejected() {
    let temp = Workdir::new();
    let doc = temp.write(
        "dup.yaml",
        r#"
name: dup-demo
stages:
  - name: stage1
    type: worker
    prompt: "a"
  - name: stage1
    type: worker
    prompt: "b"
"#,
    );

    temp.swarm()
        .args(["workflow", "validate", doc.to_str().expect("utf8 path")])
        .fails()
        .stderr_has("duplicate stage name");
}

#[test]
fn ralph_stage_without_max_retries_is_rejected() {
    let temp = Workdir::new();
    let doc = temp.write(
        "ralph.yaml",
        r#"
name: ralph-demo
stages:
  - name: loop
    type: ralph
    prompt: "keep going"
"#,
    );

    temp.swarm()
        .args(["workflow", "validate", doc.to_str().expect("utf8 path")])
        .fails()
        .stderr_has("max-retries");
}

#[test]
fn prompt_and_prompt_file_together_is_rejected() {
    let temp = Workdir::new();
    let doc = temp.write(
        "both.yaml",
        r#"
name: both-demo
stages:
  - name: only
    type: worker
    prompt: "inline"
    prompt-file: "./prompt.txt"
"#,
    );

    temp.swarm()
        .args(["workflow", "validate", doc.to_str().expect("utf8 path")])
        .fails()
        .stderr_has("exactly one of prompt or prompt-file");
}
