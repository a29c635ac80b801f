// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for botfleet.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, FleetConfig, LinkConfig, LaunchConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Print what would happen without touching the filesystem or spawning.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Settings shared by every command that walks the fleet root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    /// Glob patterns of sibling directory names to leave alone.
    pub exclude: Vec<String>,
}

/// Shared dependency directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// Sibling that owns the real dependency directory.
    pub hub: String,
    /// Name of the dependency directory inside each sibling.
    pub deps_dir: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            hub: "ali_g".to_string(),
            deps_dir: "node_modules".to_string(),
        }
    }
}

/// Bot launcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    /// Entry-point file whose presence marks a sibling as a bot.
    pub entry: String,
    /// Runtime used to execute the entry point.
    pub runtime: String,
    /// Open a dedicated console window per bot (Windows only).
    pub new_window: bool,
    /// `color` attribute for the console window (Windows only).
    pub window_color: String,
    /// Appended to the sibling name to form the window title.
    pub title_suffix: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            entry: "index.js".to_string(),
            runtime: "node".to_string(),
            new_window: true,
            window_color: "03".to_string(),
            title_suffix: "Bot".to_string(),
        }
    }
}

/// Checks that `value` names a single directory entry (no separators, not `.`/`..`).
pub(crate) fn validate_entry_name(
    section: &str,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    };

    if value.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value == "." || value == ".." {
        return Err(invalid("must not be '.' or '..'"));
    }
    if value.contains(['/', '\\']) {
        return Err(invalid(&format!(
            "'{value}' must be a plain name without path separators"
        )));
    }
    Ok(())
}

/// Checks a `color` attribute: one or two hex digits, background != foreground.
pub(crate) fn validate_window_color(value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        section: "launch".to_string(),
        key: "window_color".to_string(),
        message,
    };

    if value.is_empty() || value.len() > 2 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(format!(
            "expected one or two hex digits, got '{value}'"
        )));
    }
    let mut digits = value.chars().map(|c| c.to_ascii_lowercase());
    if value.len() == 2 && digits.next() == digits.next() {
        return Err(invalid(format!(
            "background and foreground are the same in '{value}'"
        )));
    }
    Ok(())
}
