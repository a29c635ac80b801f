// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!      FleetError (16 bytes)
//!             |
//!   +------+--+---+------+
//!   |      |      |      |
//!   v      v      v      v
//! Link   Cfg    Proc    Fs
//!  Box   Box    Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Link    HubDepsMissing, AliasFailed
//!   Config  ParseError, InvalidValue, InvalidOverride
//!   Process ExecutableNotFound, SpawnFailed, OutputError, InvalidCommand
//!   Fs      NotFound, IoError
//! ```

use std::path::Path;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`FleetError`].
pub type FleetResult<T> = std::result::Result<T, FleetError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack. Display
/// and `source()` forward to the sub-error, so an error chain printed with
/// `{:#}` names every cause once.
#[derive(Debug, Error)]
pub enum FleetError {
    /// Link setup failed.
    #[error(transparent)]
    Link(Box<LinkError>),

    /// Configuration error.
    #[error(transparent)]
    Config(Box<ConfigError>),

    /// Process execution error.
    #[error(transparent)]
    Process(Box<ProcessError>),

    /// Filesystem error.
    #[error(transparent)]
    Fs(Box<FsError>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for FleetError {
                fn from(err: $error) -> Self {
                    FleetError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    LinkError => Link,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
}

// --- Link Errors ---

/// Errors raised while linking sibling dependency directories.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The hub's dependency directory does not exist; nothing was touched.
    #[error("target dependency directory not found at {path}")]
    HubDepsMissing { path: String },

    /// The directory alias could not be created.
    #[error("failed to create directory link at {path}: {message}")]
    AliasFailed { path: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse config: {message}")]
    ParseError { message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `--set` override was not of the form `section.key=value`.
    #[error("invalid override '{0}' (expected section.key=value)")]
    InvalidOverride(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}'")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read process output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },

    /// The command line could not be assembled (e.g. a NUL byte in a path).
    #[error("cannot build command for '{name}': {message}")]
    InvalidCommand { name: String, message: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}'")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}
