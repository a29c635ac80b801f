// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for botfleet using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! botfleet [global options] <command>
//! link     [--hub NAME] [--deps-dir NAME]
//! start    [--entry FILE] [--runtime EXE] [--no-window]
//! options
//! inis
//! version
//! ```

pub mod global;
pub mod link;
pub mod start;


use crate::cli::global::GlobalOptions;
use crate::cli::link::LinkArgs;
use crate::cli::start::StartArgs;
use clap::{Parser, Subcommand};

/// Shared dependencies and launcher for sibling bot projects.
#[derive(Debug, Parser)]
#[command(
    name = "botfleet",
    author,
    version,
    about = "Shared dependencies and launcher for sibling bot projects",
    long_about = "botfleet Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Manages a directory of bot projects that sit side by side.\n\n\
                  `botfleet link` points every bot's node_modules at the hub\n\
                  bot's copy so dependencies are installed once. `botfleet start`\n\
                  starts every bot that has an index.js. See\n\
                  `botfleet <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  botfleet reads `botfleet.toml` from the fleet root if it exists.\n\
                  Additional files can be given with --ini and are loaded after it,\n\
                  later files overriding earlier ones. BOTFLEET_<SECTION>__<KEY>\n\
                  environment variables override files, and --set overrides both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files that were loaded.
    Inis,

    /// Links every bot's dependency directory to the hub's.
    Link(LinkArgs),

    /// Starts every bot that contains the entry-point file.
    Start(StartArgs),
}

impl Command {
    /// Config overrides contributed by the command's own flags.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        match self {
            Self::Link(args) => args.to_config_overrides(),
            Self::Start(args) => args.to_config_overrides(),
            Self::Version | Self::Options | Self::Inis => Vec::new(),
        }
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
