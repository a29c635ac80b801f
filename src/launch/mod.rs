// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bot launcher.
//!
//! ```text
//! run_launcher(root, settings, launcher)
//!   for sibling, sorted:
//!     <sibling>/<entry> is a file?  no --> skip silently
//!     "Starting bot in <sibling>..."
//!     launcher.launch(LaunchRequest)  --> LaunchedProcess (never awaited)
//!   "All bots started! (M bots)"
//!
//! ProcessLauncher
//!   SystemLauncher   which(runtime) once, command::build_command, spawn_detached
//! ```
//!
//! Launched bots are not supervised: the launcher does not wait on them,
//! restart them or collect their output, and they outlive this process.
//! A launch failure stops the loop; bots started before it keep running.

pub mod command;
pub mod system;

#[cfg(test)]
mod tests;

use bon::Builder;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::error::{FleetResult, Result};
use crate::utility::fs::{SiblingFilter, list_siblings};

pub use system::SystemLauncher;

/// Console window cosmetics for a bot (Windows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowStyle {
    title: String,
    color: String,
}

impl WindowStyle {
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: color.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Everything needed to start one bot.
#[derive(Debug, Clone, Builder)]
pub struct LaunchRequest {
    #[builder(into)]
    name: String,
    #[builder(into)]
    working_dir: PathBuf,
    #[builder(into, default = "node".to_string())]
    runtime: String,
    #[builder(into, default = "index.js".to_string())]
    entry: String,
    window: Option<WindowStyle>,
}

impl LaunchRequest {
    /// Sibling directory name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the bot runs in.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Runtime executable name, e.g. `node`.
    #[must_use]
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// Entry-point file, relative to the working directory.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Window cosmetics, if a dedicated console was requested.
    #[must_use]
    pub const fn window(&self) -> Option<&WindowStyle> {
        self.window.as_ref()
    }
}

/// A started bot. Holds no OS handle; nothing waits on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedProcess {
    name: String,
    pid: Option<u32>,
}

impl LaunchedProcess {
    pub fn new(name: impl Into<String>, pid: Option<u32>) -> Self {
        Self {
            name: name.into(),
            pid,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pid of the spawned process, when the OS reported one.
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }
}

/// Starts independent processes that outlive the caller.
///
/// Implementations return as soon as the process exists and must never
/// wait for it to finish.
pub trait ProcessLauncher {
    /// Starts the bot described by `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the process could not be created.
    fn launch(&mut self, request: &LaunchRequest) -> FleetResult<LaunchedProcess>;
}

/// Inputs of a launcher run.
#[derive(Debug, Clone, Builder)]
pub struct LaunchSettings {
    #[builder(into, default = "index.js".to_string())]
    entry: String,
    #[builder(into, default = "node".to_string())]
    runtime: String,
    /// Glob patterns of siblings to skip.
    #[builder(default)]
    exclude: Vec<String>,
    /// Color for dedicated console windows; `None` runs bots in the background.
    #[builder(into)]
    window_color: Option<String>,
    /// Appended to the sibling name to form the window title.
    #[builder(into, default = "Bot".to_string())]
    title_suffix: String,
    /// Report without spawning anything.
    #[builder(default = false)]
    dry: bool,
}

impl LaunchSettings {
    /// Settings from the `[launch]`, `[fleet]` and `[global]` sections.
    ///
    /// Windows are only requested on Windows, where `start` can open them.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let new_window = cfg!(windows) && config.launch.new_window;
        Self {
            entry: config.launch.entry.clone(),
            runtime: config.launch.runtime.clone(),
            exclude: config.fleet.exclude.clone(),
            window_color: new_window.then(|| config.launch.window_color.clone()),
            title_suffix: config.launch.title_suffix.clone(),
            dry: config.global.dry,
        }
    }

    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    #[must_use]
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    #[must_use]
    pub const fn is_dry(&self) -> bool {
        self.dry
    }

    /// Builds the request for one sibling.
    #[must_use]
    pub fn request_for(&self, name: &str, dir: &Path) -> LaunchRequest {
        let window = self.window_color.as_ref().map(|color| {
            let title = if self.title_suffix.is_empty() {
                name.to_string()
            } else {
                format!("{name} {}", self.title_suffix)
            };
            WindowStyle::new(title, color.clone())
        });

        LaunchRequest::builder()
            .name(name)
            .working_dir(dir)
            .runtime(self.runtime.clone())
            .entry(self.entry.clone())
            .maybe_window(window)
            .build()
    }
}

/// Outcome of a launcher run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchReport {
    started: Vec<LaunchedProcess>,
}

impl LaunchReport {
    /// Number of bots started (or that would be, on a dry run).
    #[must_use]
    pub fn count(&self) -> usize {
        self.started.len()
    }

    /// The bots in launch order.
    #[must_use]
    pub fn started(&self) -> &[LaunchedProcess] {
        &self.started
    }
}

/// Starts every sibling of `root` that contains the entry-point file.
///
/// Progress lines and the final summary are written to `out`. Siblings
/// without the entry file produce no output at all.
///
/// # Errors
///
/// Returns an error if the root cannot be listed or if `launcher` fails;
/// remaining siblings are not attempted.
pub fn run_launcher<L, W>(
    root: &Path,
    settings: &LaunchSettings,
    launcher: &mut L,
    out: &mut W,
) -> Result<LaunchReport>
where
    L: ProcessLauncher + ?Sized,
    W: Write,
{
    let filter = SiblingFilter::new().exclude_patterns(settings.exclude.iter().cloned());
    let siblings = list_siblings(root, &filter)?;
    debug!(root = %root.display(), count = siblings.len(), "scanning for bots");

    let dry = if settings.is_dry() { "[dry] " } else { "" };
    let mut report = LaunchReport::default();

    for sibling in &siblings {
        let entry_path = sibling.path().join(settings.entry());
        if !entry_path.is_file() {
            debug!(sibling = sibling.name(), "no entry point, skipping");
            continue;
        }

        writeln!(out, "{dry}Starting bot in {}...", sibling.name())?;

        let launched = if settings.is_dry() {
            LaunchedProcess::new(sibling.name(), None)
        } else {
            let request = settings.request_for(sibling.name(), sibling.path());
            launcher.launch(&request)?
        };
        debug!(sibling = launched.name(), pid = ?launched.pid(), "bot started");
        report.started.push(launched);
    }

    writeln!(out, "{dry}All bots started! ({} bots)", report.count())?;
    Ok(report)
}
