// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! -C/--root DIR     ← Fleet root (default: current directory)
//! --ini FILE        ← Additional config files (can repeat)
//! --set KEY=VAL     ← Direct config override
//! --dry             ← Report without touching the filesystem or spawning
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (falls back to --log-level)
//! --log-file FILE   ← Also log to this file
//!
//! Precedence: CLI flags > --set > env > --ini > botfleet.toml > defaults
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Directory whose immediate subdirectories are the bots.
    #[arg(short = 'C', long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append, global = true)]
    pub inis: Vec<PathBuf>,

    /// Sets an option, such as 'link.hub=core_bot' or 'launch.runtime=bun'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append, global = true)]
    pub options: Vec<String>,

    /// Prints what would be done without creating links or starting bots.
    #[arg(long, global = true)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true,
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", global = true,
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// The fleet root, relative paths resolved against `cwd`.
    #[must_use]
    pub fn resolve_root(&self, cwd: &Path) -> PathBuf {
        match &self.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => cwd.join(root),
            None => cwd.to_path_buf(),
        }
    }

    /// Converts command-line options to `section.key=value` overrides.
    ///
    /// `--set` entries come first so that dedicated flags win over them.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global.output_log_level={level}"));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global.file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global.log_file={}", path.display()));
        }

        if self.dry {
            overrides.push("global.dry=true".to_string());
        }

        overrides
    }
}
