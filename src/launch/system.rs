// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use tracing::debug;

use super::command::{Platform, build_command};
use super::{LaunchRequest, LaunchedProcess, ProcessLauncher};
use crate::core::process::builder::ProcessBuilder;
use crate::error::FleetResult;

/// Launches bots as real, detached OS processes.
///
/// The runtime named in the first request is looked up on `PATH` before
/// anything is spawned, so a missing `node` fails with a clear error
/// instead of a shell complaint in a window that closes.
#[derive(Debug)]
pub struct SystemLauncher {
    platform: Platform,
    checked_runtime: Option<String>,
}

impl SystemLauncher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            platform: Platform::current(),
            checked_runtime: None,
        }
    }

    fn ensure_runtime(&mut self, runtime: &str) -> FleetResult<()> {
        if self.checked_runtime.as_deref() == Some(runtime) {
            return Ok(());
        }
        let resolved = ProcessBuilder::which(runtime)?;
        debug!(runtime, path = %resolved.program().display(), "runtime resolved");
        self.checked_runtime = Some(runtime.to_string());
        Ok(())
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for SystemLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> FleetResult<LaunchedProcess> {
        self.ensure_runtime(request.runtime())?;

        let pid = build_command(request, self.platform)?.spawn_detached()?;
        debug!(bot = request.name(), pid = ?pid, "spawned");
        Ok(LaunchedProcess::new(request.name(), pid))
    }
}
