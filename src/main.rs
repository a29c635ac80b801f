// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (botfleet.toml, --ini, env, --set) --> Logging --> Command Dispatch
//!   Link | Start | Options | Inis | Version
//! ```

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context as _;
use tracing::debug;

use botfleet::cli::{self, Cli, Command};
use botfleet::cmd::config::{run_inis_command, run_options_command, run_version_command};
use botfleet::cmd::link::run_link_command;
use botfleet::cmd::start::run_start_command;
use botfleet::config::loader::ConfigLoader;
use botfleet::config::{CONFIG_FILE_NAME, Config, ENV_PREFIX};
use botfleet::error::Result;
use botfleet::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let command = match &cli.command {
        Some(Command::Version) => {
            run_version_command();
            return Ok(());
        }
        Some(command) => command,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            anyhow::bail!("No command specified");
        }
    };

    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let root = cli.global.resolve_root(&cwd);

    let loader = build_config_loader(cli, command, &root)?;
    let config_files = loader.format_loaded_files();
    let config = loader.build()?;

    let _log_guard = init_logging(&build_log_config(&config))?;
    debug!(root = %root.display(), files = config_files.len(), "configuration loaded");

    dispatch_command(command, &root, &config, &config_files).await
}

fn build_config_loader(cli: &Cli, command: &Command, root: &Path) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(root.join(CONFIG_FILE_NAME));
    for ini_path in &cli.global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .with_env_prefix(ENV_PREFIX)
        .apply_overrides(cli.global.to_config_overrides())?
        .apply_overrides(command.to_config_overrides())
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

async fn dispatch_command(
    command: &Command,
    root: &Path,
    config: &Config,
    config_files: &[String],
) -> Result<()> {
    match command {
        Command::Link(_) => run_link_command(root, config).await,
        Command::Start(_) => run_start_command(root, config),
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Inis => {
            run_inis_command(config_files);
            Ok(())
        }
        Command::Version => {
            run_version_command();
            Ok(())
        }
    }
}
