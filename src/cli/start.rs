// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `start` command arguments.

use clap::Args;

/// Arguments for the `start` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StartArgs {
    /// Entry-point file a sibling must contain to be started (launch.entry).
    #[arg(long, value_name = "FILE")]
    pub entry: Option<String>,

    /// Runtime executable used to run the entry point (launch.runtime).
    #[arg(long, value_name = "EXE")]
    pub runtime: Option<String>,

    /// Runs bots in the background instead of one console window each.
    #[arg(long = "no-window")]
    pub no_window: bool,
}

impl StartArgs {
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        if let Some(ref entry) = self.entry {
            overrides.push(format!("launch.entry={entry}"));
        }
        if let Some(ref runtime) = self.runtime {
            overrides.push(format!("launch.runtime={runtime}"));
        }
        if self.no_window {
            overrides.push("launch.new_window=false".to_string());
        }
        overrides
    }
}
