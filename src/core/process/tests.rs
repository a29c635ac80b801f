// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::ProcessBuilder;
use crate::error::ProcessError;

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout().trim(), @"hello");
}

#[tokio::test]
async fn test_process_exit_code_is_not_an_error() {
    let output = ProcessBuilder::raw("exit 42")
        .run()
        .await
        .expect("process should complete");

    assert!(!output.success());
    assert_eq!(output.exit_code(), 42);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_runs_in_cwd() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("marker.txt"), "").unwrap();

    let output = ProcessBuilder::raw("ls")
        .cwd(temp.path())
        .run()
        .await
        .unwrap();

    assert_eq!(output.stdout().trim(), "marker.txt");
}

#[tokio::test]
async fn test_spawn_failure_is_reported() {
    let result = ProcessBuilder::new("definitely-not-a-real-program-xyz")
        .run()
        .await;
    let err = result.unwrap_err();
    assert!(
        matches!(
            err.downcast_ref::<ProcessError>(),
            Some(ProcessError::SpawnFailed { .. })
        ),
        "unexpected error: {err:#}"
    );
}

#[tokio::test]
async fn test_spawn_detached_failure_is_reported() {
    let result = ProcessBuilder::new("definitely-not-a-real-program-xyz")
        .detached()
        .spawn_detached();
    assert!(matches!(result, Err(ProcessError::SpawnFailed { .. })));
}

#[cfg(unix)]
#[tokio::test]
async fn test_spawn_detached_returns_pid_without_waiting() {
    let temp = tempfile::tempdir().unwrap();
    let marker = temp.path().join("done");

    let pid = ProcessBuilder::raw(format!("touch '{}'", marker.display()))
        .detached()
        .spawn_detached()
        .expect("sh should spawn");
    assert!(pid.is_some());

    for _ in 0..100 {
        if marker.exists() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("detached child never ran");
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("node")
        .arg("index.js")
        .arg("--name")
        .arg("my bot")
        .raw_arg("/k");
    assert_eq!(builder.command_line(), "node index.js --name \"my bot\" /k");
}

#[test]
fn test_display_name_defaults_to_program_stem() {
    assert_eq!(ProcessBuilder::new("/usr/bin/node").display_name(), "node");
    assert_eq!(
        ProcessBuilder::new("/usr/bin/node").name("alpha").display_name(),
        "alpha"
    );
}

#[test]
fn test_which_missing_executable() {
    let result = ProcessBuilder::which("definitely-not-a-real-program-xyz");
    assert!(matches!(
        result,
        Err(ProcessError::ExecutableNotFound { .. })
    ));
    assert!(ProcessBuilder::find("definitely-not-a-real-program-xyz").is_none());
}

#[cfg(unix)]
#[test]
fn test_which_finds_shell() {
    let builder = ProcessBuilder::which("sh").expect("sh should be in PATH");
    assert!(builder.program().is_absolute());
}
