// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Corrupt `state.json` is quarantined and recovered transparently
//! (spec.md §8 scenario 4).

use crate::prelude::*;

#[test]
fn corrupt_registry_is_quarantined_and_recovered() {
    let temp = Workdir::new();
    std::fs::create_dir_all(temp.path()).expect("mkdir state root");
    std::fs::write(temp.registry_path(), "{invalid json}}").expect("seed corrupt state.json");

    let result = temp.swarm().args(["ls"]).passes();
    assert_eq!(result.code(), 0);
    result.stderr_has("corrupt state file");

    let corrupted = temp.path().join("state.json.corrupted");
    assert!(corrupted.exists(), "corrupt state.json should be quarantined");

    let recovered = std::fs::read_to_string(temp.registry_path()).expect("valid state.json");
    let value: serde_json::Value = serde_json::from_str(&recovered).expect("valid json");
    assert_eq!(value["workers"].as_array().expect("workers array").len(), 0);
}
