// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Link command implementation for botfleet.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::link::{LinkSettings, run_link_setup};

/// Main handler for link command.
///
/// # Errors
///
/// Returns an error if the hub's dependency directory is missing or any
/// sibling cannot be relinked.
pub async fn run_link_command(root: &Path, config: &Config) -> Result<()> {
    let settings = LinkSettings::from_config(config);
    if settings.is_dry() {
        info!("dry run: no links will be created or removed");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = run_link_setup(root, &settings, &mut out).await?;
    out.flush()?;

    debug!(
        linked = report.linked(),
        replaced_links = report.replaced_links(),
        replaced_dirs = report.replaced_dirs(),
        "link setup complete"
    );
    Ok(())
}
