// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use super::command::{Platform, build_command, unix_script, windows_script};
use super::{
    LaunchRequest, LaunchSettings, LaunchedProcess, ProcessLauncher, SystemLauncher, WindowStyle,
    run_launcher,
};
use crate::error::{FleetError, FleetResult, ProcessError};
use tempfile::TempDir;

/// Records requests instead of spawning anything.
#[derive(Default)]
struct RecordingLauncher {
    requests: Vec<LaunchRequest>,
    fail_on: Option<String>,
}

impl ProcessLauncher for RecordingLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> FleetResult<LaunchedProcess> {
        if self.fail_on.as_deref() == Some(request.name()) {
            return Err(ProcessError::SpawnFailed {
                command: request.name().to_string(),
                source: std::io::Error::other("spawn refused"),
            }
            .into());
        }
        self.requests.push(request.clone());
        let pid = u32::try_from(self.requests.len()).ok();
        Ok(LaunchedProcess::new(request.name(), pid))
    }
}

fn fleet(bots: &[&str], others: &[&str]) -> TempDir {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    for bot in bots {
        std::fs::create_dir_all(temp.path().join(bot)).unwrap();
        std::fs::write(temp.path().join(bot).join("index.js"), "").unwrap();
    }
    for dir in others {
        std::fs::create_dir_all(temp.path().join(dir)).unwrap();
    }
    temp
}

fn run(
    root: &Path,
    settings: &LaunchSettings,
    launcher: &mut RecordingLauncher,
) -> (anyhow::Result<super::LaunchReport>, String) {
    let mut out = Vec::new();
    let result = run_launcher(root, settings, launcher, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn request(dir: &str, window: Option<WindowStyle>) -> LaunchRequest {
    LaunchRequest::builder()
        .name("alpha")
        .working_dir(PathBuf::from(dir))
        .maybe_window(window)
        .build()
}

// =============================================================================
// run_launcher
// =============================================================================

#[test]
fn test_starts_only_siblings_with_entry() {
    let temp = fleet(&["a"], &["b"]);
    let mut launcher = RecordingLauncher::default();

    let (result, output) = run(temp.path(), &LaunchSettings::builder().build(), &mut launcher);
    let report = result.unwrap();

    assert_eq!(report.count(), 1);
    assert_eq!(launcher.requests.len(), 1);
    assert_eq!(launcher.requests[0].name(), "a");
    assert_eq!(launcher.requests[0].working_dir(), temp.path().join("a"));
    insta::assert_snapshot!(output, @r"
    Starting bot in a...
    All bots started! (1 bots)
    ");
}

#[test]
fn test_count_matches_eligible_siblings() {
    let temp = fleet(&["alpha", "beta", "gamma"], &["docs", "shared"]);
    std::fs::create_dir(temp.path().join("delta")).unwrap();
    std::fs::create_dir(temp.path().join("delta/index.js")).unwrap();
    let mut launcher = RecordingLauncher::default();

    let (result, output) = run(temp.path(), &LaunchSettings::builder().build(), &mut launcher);
    let report = result.unwrap();

    let names: Vec<_> = report.started().iter().map(LaunchedProcess::name).collect();
    assert_eq!(names, ["alpha", "beta", "gamma"]);
    assert_eq!(output.lines().count(), 4);
    assert!(output.ends_with("All bots started! (3 bots)\n"));
}

#[test]
fn test_no_bots_reports_zero() {
    let temp = fleet(&[], &["a", "b"]);
    let mut launcher = RecordingLauncher::default();

    let (result, output) = run(temp.path(), &LaunchSettings::builder().build(), &mut launcher);

    assert_eq!(result.unwrap().count(), 0);
    assert!(launcher.requests.is_empty());
    assert_eq!(output, "All bots started! (0 bots)\n");
}

#[test]
fn test_launch_failure_stops_remaining_siblings() {
    let temp = fleet(&["a", "b", "c"], &[]);
    let mut launcher = RecordingLauncher {
        fail_on: Some("b".to_string()),
        ..RecordingLauncher::default()
    };

    let (result, output) = run(temp.path(), &LaunchSettings::builder().build(), &mut launcher);

    assert!(result.is_err());
    let names: Vec<_> = launcher.requests.iter().map(LaunchRequest::name).collect();
    assert_eq!(names, ["a"]);
    assert!(!output.contains("All bots started!"));
    assert!(!output.contains("Starting bot in c"));
}

#[test]
fn test_dry_run_spawns_nothing() {
    let temp = fleet(&["a", "b"], &[]);
    let settings = LaunchSettings::builder().dry(true).build();
    let mut launcher = RecordingLauncher::default();

    let (result, output) = run(temp.path(), &settings, &mut launcher);

    assert_eq!(result.unwrap().count(), 2);
    assert!(launcher.requests.is_empty());
    assert!(output.lines().all(|line| line.starts_with("[dry] ")));
}

#[test]
fn test_custom_entry_and_exclude() {
    let temp = fleet(&[], &["a", "b", "old_bot"]);
    for dir in ["a", "old_bot"] {
        std::fs::write(temp.path().join(dir).join("main.py"), "").unwrap();
    }
    let settings = LaunchSettings::builder()
        .entry("main.py")
        .runtime("python3")
        .exclude(vec!["old_*".to_string()])
        .build();
    let mut launcher = RecordingLauncher::default();

    let (result, _) = run(temp.path(), &settings, &mut launcher);

    assert_eq!(result.unwrap().count(), 1);
    assert_eq!(launcher.requests[0].name(), "a");
    assert_eq!(launcher.requests[0].runtime(), "python3");
    assert_eq!(launcher.requests[0].entry(), "main.py");
}

#[test]
fn test_window_style_from_settings() {
    let settings = LaunchSettings::builder().window_color("03").build();
    let request = settings.request_for("alpha", Path::new("/srv/bots/alpha"));
    assert_eq!(
        request.window(),
        Some(&WindowStyle::new("alpha Bot", "03"))
    );

    let settings = LaunchSettings::builder().build();
    assert!(settings.request_for("alpha", Path::new("/x")).window().is_none());
}

// =============================================================================
// Command construction
// =============================================================================

#[test]
fn test_unix_script() {
    let script = unix_script(&request("/srv/bots/alpha", None)).unwrap();
    insta::assert_snapshot!(script, @"cd /srv/bots/alpha && exec node index.js");
}

#[test]
fn test_unix_script_rejects_nul() {
    let result = unix_script(&request("/srv/bots/al\0pha", None));
    assert!(matches!(result, Err(ProcessError::InvalidCommand { .. })));
}

#[test]
fn test_windows_script_with_window() {
    let window = WindowStyle::new("alpha Bot", "03");
    let script = windows_script(&request(r"C:\bots\alpha", Some(window)));
    insta::assert_snapshot!(
        script,
        @r#"start cmd /k "title alpha Bot && color 03 && cls && cd /d "C:\bots\alpha" && node index.js""#
    );
}

#[test]
fn test_windows_script_escapes_title() {
    let window = WindowStyle::new("R&D Bot", "03");
    let script = windows_script(&request(r"C:\bots\rd", Some(window)));
    assert!(script.starts_with("start cmd /k \"title R^&D Bot && "));
}

#[test]
fn test_windows_script_background() {
    let script = windows_script(&request(r"C:\bots\alpha", None));
    insta::assert_snapshot!(script, @r#"cd /d "C:\bots\alpha" && node index.js"#);
}

#[test]
fn test_build_command_is_detached_in_bot_dir() {
    let req = request("/srv/bots/alpha", None);

    let unix = build_command(&req, Platform::Unix).unwrap();
    assert_eq!(unix.program(), Path::new("/bin/sh"));
    assert_eq!(unix.args_slice()[0], "-c");
    assert!(unix.is_detached());
    assert_eq!(
        unix.working_dir().map(PathBuf::as_path),
        Some(Path::new("/srv/bots/alpha"))
    );

    let windows = build_command(&req, Platform::Windows).unwrap();
    assert_eq!(windows.program(), Path::new("cmd"));
    assert_eq!(windows.args_slice(), ["/C"]);
    assert_eq!(windows.raw_args_slice().len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_unix_script_survives_spaces_in_path() {
    use crate::core::process::builder::ProcessBuilder;

    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("my bot's dir");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("index.js"), "hello from bot").unwrap();

    let req = LaunchRequest::builder()
        .name("spaced")
        .working_dir(dir)
        .runtime("cat")
        .build();
    let output = ProcessBuilder::new("/bin/sh")
        .arg("-c")
        .arg(unix_script(&req).unwrap())
        .run()
        .await
        .unwrap();

    assert!(output.success(), "stderr: {}", output.stderr());
    assert_eq!(output.stdout(), "hello from bot");
}

// =============================================================================
// SystemLauncher
// =============================================================================

#[tokio::test]
async fn test_system_launcher_missing_runtime() {
    let req = LaunchRequest::builder()
        .name("alpha")
        .working_dir(std::env::temp_dir())
        .runtime("definitely-not-a-real-runtime-xyz")
        .build();

    let result = SystemLauncher::new().launch(&req);
    assert!(matches!(result, Err(FleetError::Process(ref e))
        if matches!(**e, ProcessError::ExecutableNotFound { .. })));
}

#[cfg(unix)]
#[tokio::test]
async fn test_system_launcher_spawns_detached_bot() {
    let temp = tempfile::tempdir().unwrap();
    let bot = temp.path().join("alpha");
    std::fs::create_dir(&bot).unwrap();
    std::fs::write(bot.join("index.js"), "touch started\n").unwrap();

    let settings = LaunchSettings::builder().runtime("sh").build();
    let mut launcher = SystemLauncher::new();
    let mut out = Vec::new();
    let report = run_launcher(temp.path(), &settings, &mut launcher, &mut out).unwrap();

    assert_eq!(report.count(), 1);
    assert!(report.started()[0].pid().is_some());

    let marker = bot.join("started");
    for _ in 0..100 {
        if marker.exists() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("bot never ran in its own directory");
}
