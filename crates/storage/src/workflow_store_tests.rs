// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    assert!(load(&path).unwrap().is_none());
    assert!(!exists(&path));
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let state = WorkflowState::new("wf1");
    save(&path, &state).unwrap();
    let loaded = load(&path).unwrap().unwrap();
    assert_eq!(loaded.name, "wf1");
    assert!(exists(&path));
}

#[test]
fn json_shape_is_the_bare_state_object_not_wrapped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    save(&path, &WorkflowState::new("wf1")).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["name"], "wf1");
}

#[test]
fn corrupt_file_recovers_to_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, b"{not json}}").unwrap();
    assert!(load(&path).unwrap().is_none());
    assert!(dir.path().join("state.json.corrupted").exists());
}
