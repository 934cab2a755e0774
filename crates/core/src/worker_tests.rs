// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn direct_backend_sets_pid_not_tmux() {
    let rec = WorkerRecord::new(
        WorkerName::new("w1"),
        vec!["sleep".into(), "300".into()],
        "/tmp".into(),
        BTreeMap::new(),
        vec![],
        Backend::Direct { pid: 1234 },
        ts(),
    );
    assert_eq!(rec.pid, Some(1234));
    assert!(rec.tmux.is_none());
    assert!(rec.has_exclusive_binding());
    assert_eq!(rec.backend_kind(), BackendKind::Direct);
}

#[test]
fn session_backend_sets_tmux_not_pid() {
    let rec = WorkerRecord::new(
        WorkerName::new("w1"),
        vec!["bash".into()],
        "/tmp".into(),
        BTreeMap::new(),
        vec![],
        Backend::Session(TmuxHandle {
            socket: "sock".into(),
            session: "sess".into(),
            window: "win".into(),
        }),
        ts(),
    );
    assert!(rec.pid.is_none());
    assert!(rec.tmux.is_some());
    assert!(rec.has_exclusive_binding());
    assert_eq!(rec.backend_kind(), BackendKind::Session);
}

#[test]
fn status_display_is_lowercase() {
    assert_eq!(WorkerStatus::Running.to_string(), "running");
    assert_eq!(WorkerStatus::Stopped.to_string(), "stopped");
}

#[test]
fn json_round_trip_preserves_fields() {
    let rec = WorkerRecord::new(
        WorkerName::new("w1"),
        vec!["bash".into(), "-c".into(), "echo hi".into()],
        "/tmp/proj".into(),
        BTreeMap::from([("MY_VAR".to_string(), "hello".to_string())]),
        vec!["env:test".into()],
        Backend::Direct { pid: 42 },
        ts(),
    );
    let json = serde_json::to_string(&rec).unwrap();
    let back: WorkerRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.name, rec.name);
    assert_eq!(back.cmd, rec.cmd);
    assert_eq!(back.cwd, rec.cwd);
    assert_eq!(back.env, rec.env);
    assert_eq!(back.tags, rec.tags);
    assert_eq!(back.pid, rec.pid);
}

#[test]
fn missing_optional_fields_default_on_load() {
    let json = r#"{
        "name": "w1",
        "status": "stopped",
        "cmd": ["sleep", "1"],
        "started": "2026-01-01T00:00:00Z",
        "cwd": "/tmp"
    }"#;
    let rec: WorkerRecord = serde_json::from_str(json).unwrap();
    assert!(rec.env.is_empty());
    assert!(rec.tags.is_empty());
    assert!(rec.tmux.is_none());
    assert!(rec.worktree.is_none());
    assert!(rec.pid.is_none());
}
