// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for botfleet.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. <root>/botfleet.toml
//! 3. --ini FILE (in order)
//! 4. BOTFLEET_* env vars
//! 5. --set section.key=value
//! 6. dedicated CLI flags (--dry, --log-level, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! BOTFLEET_GLOBAL__DRY=true        → global.dry = true
//! BOTFLEET_LINK__HUB=core_bot      → link.hub = "core_bot"
//! BOTFLEET_LAUNCH__RUNTIME=bun     → launch.runtime = "bun"
//! ```
//!
//! # Example
//!
//! ```toml
//! [fleet]
//! exclude = [".git", "archive_*"]
//!
//! [link]
//! hub = "ali_g"
//! deps_dir = "node_modules"
//!
//! [launch]
//! entry = "index.js"
//! runtime = "node"
//! window_color = "03"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{FleetConfig, GlobalConfig, LaunchConfig, LinkConfig};

/// Name of the per-fleet configuration file looked up in the root.
pub const CONFIG_FILE_NAME: &str = "botfleet.toml";

/// Prefix of the environment variables read by the loader.
pub const ENV_PREFIX: &str = "BOTFLEET";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Sibling enumeration options.
    pub fleet: FleetConfig,
    /// Link setup options.
    pub link: LinkConfig,
    /// Launcher options.
    pub launch: LaunchConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use botfleet::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("botfleet.toml")
    ///     .with_env_prefix("BOTFLEET")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        types::validate_entry_name("link", "hub", &self.link.hub)?;
        types::validate_entry_name("link", "deps_dir", &self.link.deps_dir)?;
        types::validate_entry_name("launch", "entry", &self.launch.entry)?;
        types::validate_window_color(&self.launch.window_color)?;

        if self.launch.runtime.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "launch".to_string(),
                key: "runtime".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        for pattern in &self.fleet.exclude {
            if let Err(e) = wax::Glob::new(pattern) {
                return Err(ConfigError::InvalidValue {
                    section: "fleet".to_string(),
                    key: "exclude".to_string(),
                    message: format!("invalid glob '{pattern}': {e}"),
                });
            }
        }
        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line,
    /// sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert("global.dry", self.global.dry.to_string());
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("fleet.exclude", self.fleet.exclude.join(", "));
        options.insert("link.hub", self.link.hub.clone());
        options.insert("link.deps_dir", self.link.deps_dir.clone());
        options.insert("launch.entry", self.launch.entry.clone());
        options.insert("launch.runtime", self.launch.runtime.clone());
        options.insert("launch.new_window", self.launch.new_window.to_string());
        options.insert("launch.window_color", self.launch.window_color.clone());
        options.insert("launch.title_suffix", self.launch.title_suffix.clone());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
