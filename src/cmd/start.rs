// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Start command implementation for botfleet.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::launch::{LaunchSettings, SystemLauncher, run_launcher};

/// Main handler for start command.
///
/// Returns once every bot has been spawned; the bots keep running after
/// botfleet exits.
///
/// # Errors
///
/// Returns an error if the root cannot be listed, the runtime is not on
/// `PATH`, or a bot fails to spawn.
pub fn run_start_command(root: &Path, config: &Config) -> Result<()> {
    let settings = LaunchSettings::from_config(config);
    if settings.is_dry() {
        info!("dry run: no bots will be started");
    }

    let mut launcher = SystemLauncher::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = run_launcher(root, &settings, &mut launcher, &mut out)?;
    out.flush()?;

    debug!(started = report.count(), "launcher finished");
    Ok(())
}
