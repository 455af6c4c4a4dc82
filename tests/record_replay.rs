//! End-to-end pipeline runs against recorded cassettes.
//!
//! 1. Record a run's interactions with `CassetteRecorder`.
//! 2. Replay it through `ServiceContext::replaying()` and the resolve command.
//! 3. Assert the output lines, the request count, and that the cassette was
//!    fully consumed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::json;

use notelink::cassette::recorder::CassetteRecorder;
use notelink::commands::resolve::run_with_context;
use notelink::config::{FailurePolicy, Settings};
use notelink::context::ServiceContext;

const DOCUMENT: &str = "\
Thread:
- <https://example.social/@alice/n1>
- https://example.social/@alice/gone
";

fn settings(policy: FailurePolicy) -> Settings {
    Settings {
        instance: url::Url::parse("https://blahaj.zone/").unwrap(),
        input: PathBuf::from("input.txt"),
        output: PathBuf::from("output.txt"),
        delay: Duration::ZERO,
        policy,
    }
}

fn record_run(path: &Path) {
    let mut recorder = CassetteRecorder::new(path, "two-links-one-account", "https://blahaj.zone/");
    recorder.record("fs", "read_to_string", json!({"path": "input.txt"}), json!({"Ok": DOCUMENT}));
    recorder.record(
        "api",
        "post_json",
        json!({"endpoint": "users/show", "body": {"username": "alice", "host": "example.social"}}),
        json!({"Ok": {"id": "alice-id", "notesCount": 2}}),
    );
    recorder.record(
        "api",
        "post_json",
        json!({"endpoint": "users/notes", "body": {"userId": "alice-id", "limit": 2}}),
        json!({"Ok": [
            {"id": "9x1", "url": "https://example.social/@alice/n1?ref=feed"},
            {"id": "9x0", "url": "https://example.social/@alice/n0"}
        ]}),
    );
    recorder.record(
        "api",
        "post_json",
        json!({"endpoint": "users/show", "body": {"username": "alice", "host": "example.social"}}),
        json!({"Ok": {"id": "alice-id", "notesCount": 2}}),
    );
    recorder.record(
        "fs",
        "write",
        json!({"path": "output.txt", "contents": ""}),
        json!({"Ok": null}),
    );
    recorder.finish().expect("recording should succeed");
}

#[test]
fn replayed_run_matches_first_link_and_fetches_once() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = dir.path().join("run.cassette.yaml");
    record_run(&cassette);

    let ctx = ServiceContext::replaying(&[&cassette]).unwrap();
    let report = run_with_context(&ctx, &settings(FailurePolicy::Abort)).unwrap();

    let lines: Vec<String> = report.results.iter().map(|r| r.to_line()).collect();
    assert_eq!(
        lines,
        vec![
            "https://blahaj.zone/notes/9x1 = https://example.social/@alice/n1".to_string(),
            "no match".to_string(),
        ]
    );
    assert_eq!(report.fetches, 1);
    assert_eq!(ctx.pending_replay(), Some(0));
}

#[test]
fn replaying_twice_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = dir.path().join("run.cassette.yaml");
    record_run(&cassette);

    let first = run_with_context(
        &ServiceContext::replaying(&[&cassette]).unwrap(),
        &settings(FailurePolicy::Abort),
    )
    .unwrap();
    let second = run_with_context(
        &ServiceContext::replaying(&[&cassette]).unwrap(),
        &settings(FailurePolicy::Abort),
    )
    .unwrap();

    assert_eq!(first, second);
}

#[test]
fn fetch_failure_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = dir.path().join("run.cassette.yaml");
    let mut recorder = CassetteRecorder::new(&cassette, "fetch-failure", "https://blahaj.zone/");
    recorder.record("fs", "read_to_string", json!({}), json!({"Ok": DOCUMENT}));
    recorder.record("api", "post_json", json!({}), json!({"Ok": {"id": "alice-id", "notesCount": 150}}));
    recorder.record("api", "post_json", json!({}), json!({"Ok": []}));
    recorder.finish().unwrap();

    let ctx = ServiceContext::replaying(&[&cassette]).unwrap();
    let err = run_with_context(&ctx, &settings(FailurePolicy::Abort)).unwrap_err();

    assert!(err.contains("failed to fetch notes for account alice-id"));
    // The fs::write interaction was never requested.
    assert_eq!(ctx.pending_replay(), Some(0));
}
