// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use swarm_core::{Backend, WorkerRecord};

fn make_record(name: &str) -> WorkerRecord {
    WorkerRecord::new(
        name.into(),
        vec!["sleep".into(), "300".into()],
        "/tmp".into(),
        Default::default(),
        vec![],
        Backend::Direct { pid: 1234 },
        Utc::now(),
    )
}

#[test]
fn insert_rejects_duplicate_name() {
    let mut reg = WorkerRegistry::default();
    reg.insert(make_record("w1")).unwrap();
    let err = reg.insert(make_record("w1")).unwrap_err();
    assert!(matches!(err, swarm_core::SwarmError::Duplicate(_)));
}

#[test]
fn find_and_remove_round_trip() {
    let mut reg = WorkerRegistry::default();
    reg.insert(make_record("w1")).unwrap();
    assert!(reg.find("w1").is_some());
    let removed = reg.remove("w1").unwrap();
    assert_eq!(removed.name.as_str(), "w1");
    assert!(reg.find("w1").is_none());
}

#[test]
fn replace_preserves_single_entry() {
    let mut reg = WorkerRegistry::default();
    reg.insert(make_record("w1")).unwrap();
    let mut updated = make_record("w1");
    updated.pid = Some(9999);
    reg.replace(updated);
    assert_eq!(reg.workers.len(), 1);
    assert_eq!(reg.find("w1").unwrap().pid, Some(9999));
}

#[test]
fn load_save_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut reg = WorkerRegistry::default();
    reg.insert(make_record("w1")).unwrap();
    reg.save(&path).unwrap();
    let loaded = WorkerRegistry::load(&path).unwrap();
    assert_eq!(loaded.workers.len(), 1);
    assert_eq!(loaded.workers[0].name.as_str(), "w1");
}

#[test]
fn iter_matching_filters_by_tag() {
    let mut reg = WorkerRegistry::default();
    let mut tagged = make_record("w1");
    tagged.tags = vec!["role:worker".into()];
    reg.insert(tagged).unwrap();
    reg.insert(make_record("w2")).unwrap();
    let matched: Vec<_> = reg.iter_matching(Some("role:worker")).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name.as_str(), "w1");
    assert_eq!(reg.iter_matching(None).count(), 2);
}
