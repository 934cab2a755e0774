// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;

#[test]
fn save_atomic_creates_parent_dirs_and_writes_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");
    save_atomic(&path, b"{\"a\":1}").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}");
}

#[test]
fn save_atomic_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    save_atomic(&path, b"hello").unwrap();
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn save_atomic_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    save_atomic(&path, b"first").unwrap();
    save_atomic(&path, b"second").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "second");
}

#[test]
fn quarantine_renames_with_corrupted_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, b"{bad json}").unwrap();
    quarantine(&path).unwrap();
    assert!(!path.exists());
    assert!(dir.path().join("state.json.corrupted").exists());
}
