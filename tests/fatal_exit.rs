//! Fatal-level termination, checked from a child process
//!
//! The test re-runs its own executable with an environment marker. The
//! child logs at Fatal through the process-wide entry point; the parent
//! checks that the record was written before the process exited with a
//! non-zero status.

use level_dispatch::prelude::*;
use level_dispatch::{facade, events::FATAL_EXIT_CODE};
use std::process::Command;

const CHILD_MARKER: &str = "LEVEL_DISPATCH_FATAL_CHILD";

fn run_child(test_name: &str) -> std::process::Output {
    Command::new(std::env::current_exe().expect("test executable path"))
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_MARKER, "1")
        .output()
        .expect("spawn child test process")
}

#[test]
fn test_fatal_writes_then_exits() {
    if std::env::var_os(CHILD_MARKER).is_some() {
        Logger::builder()
            .level(Level::Fatal)
            .sink(StderrSink::new())
            .formatter(JsonFormatter::new())
            .event(Level::Fatal, |msg: &str, _: &Fields| {
                eprintln!("user hook saw {}", msg);
            })
            .silent(true)
            .init();

        let _ = facade::fatal("boom");
        // Only reached if the terminator did not run
        std::process::exit(0);
    }

    let output = run_child("test_fatal_writes_then_exits");
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    let record_at = lines
        .iter()
        .position(|l| l.contains(r#""msg":"boom""#))
        .unwrap_or_else(|| panic!("record missing from child stderr:\n{}", stderr));
    let hook_at = lines
        .iter()
        .position(|l| l.contains("user hook saw boom"))
        .expect("user hook ran before exit");

    assert!(record_at < hook_at);
    let record: serde_json::Value = serde_json::from_str(lines[record_at]).unwrap();
    assert_eq!(record["level"], "fatal");
}

#[test]
fn test_fatal_with_timeout_still_exits() {
    if std::env::var_os(CHILD_MARKER).is_some() {
        Logger::builder()
            .level(Level::Fatal)
            .sink(StderrSink::new())
            .timeout(std::time::Duration::from_secs(5))
            .silent(true)
            .init();

        let _ = facade::fatal("boom on worker");
        std::process::exit(0);
    }

    let output = run_child("test_fatal_with_timeout_still_exits");
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));
    assert!(String::from_utf8_lossy(&output.stderr).contains("boom on worker"));
}

#[test]
fn test_gated_fatal_does_not_exit() {
    // Under a Panic ceiling Fatal is gated, so no hook runs
    let logger = Logger::builder().level(Level::Panic).silent(true).build();
    assert!(!logger.enabled(Level::Fatal));
    assert!(logger.fatal("suppressed").is_ok());
}
