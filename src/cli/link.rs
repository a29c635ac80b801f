// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `link` command arguments.

use clap::Args;

/// Arguments for the `link` command.
#[derive(Debug, Clone, Default, Args)]
pub struct LinkArgs {
    /// Sibling that owns the shared dependency directory (link.hub).
    #[arg(long, value_name = "NAME")]
    pub hub: Option<String>,

    /// Name of the dependency directory inside each sibling (link.deps_dir).
    #[arg(long = "deps-dir", value_name = "NAME")]
    pub deps_dir: Option<String>,
}

impl LinkArgs {
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        if let Some(ref hub) = self.hub {
            overrides.push(format!("link.hub={hub}"));
        }
        if let Some(ref deps_dir) = self.deps_dir {
            overrides.push(format!("link.deps_dir={deps_dir}"));
        }
        overrides
    }
}
