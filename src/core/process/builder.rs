// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder with configuration options.
//!
//! ```text
//! ProcessBuilder
//!  • new/which/raw/find
//!  • arg/raw_arg/cwd/name/detached
//! ```

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};

use crate::error::ProcessError;

/// Static cache for executable paths resolved via `which`.
static EXECUTABLE_CACHE: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();

/// Get the executable cache, initializing if needed.
fn exe_cache() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    EXECUTABLE_CACHE.get_or_init(|| RwLock::new(BTreeMap::new()))
}

/// Output from a completed process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    pub(super) const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// Returns the process exit code (0 = success, -1 = killed by a signal).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Returns captured stdout.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Returns captured stderr.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Returns true if the process exited successfully (code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Builder for configuring and running a process.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    /// Path to the executable
    program: PathBuf,
    /// Command-line arguments
    args: Vec<String>,
    /// Arguments appended verbatim, without quoting (Windows only)
    raw_args: Vec<String>,
    /// Working directory
    cwd: Option<PathBuf>,
    /// Display name for logging
    name: Option<String>,
    /// Detach from the parent's process group / console signals
    detached: bool,
}

impl ProcessBuilder {
    /// Creates a new `ProcessBuilder` for the given program.
    ///
    /// The program can be an absolute path, relative path, or just the executable name.
    /// If just a name is given, it is resolved via PATH by the OS when spawned.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            raw_args: Vec::new(),
            cwd: None,
            name: None,
            detached: false,
        }
    }

    /// Creates a `ProcessBuilder` after resolving the program via PATH.
    ///
    /// Results are cached for subsequent lookups of the same program.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError::ExecutableNotFound` if the executable is not found in PATH.
    pub fn which(program: &str) -> Result<Self, ProcessError> {
        Self::find(program)
            .map(Self::new)
            .ok_or_else(|| ProcessError::ExecutableNotFound {
                name: program.to_string(),
            })
    }

    /// Finds the full path to an executable in PATH.
    ///
    /// Results are cached for subsequent lookups.
    /// Returns `None` if the executable is not found.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        {
            let cache = exe_cache()
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(path) = cache.get(program) {
                return Some(path.clone());
            }
        }

        which::which(program).map_or(None, |path| {
            {
                let mut cache = exe_cache()
                    .write()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                cache.insert(program.to_string(), path.clone());
            }
            Some(path)
        })
    }

    /// Creates a `ProcessBuilder` from a raw command string.
    ///
    /// On Windows, this executes the command via `cmd /C` so that shell
    /// builtins such as `mklink` and `start` are available.
    /// On Unix, this executes via `/bin/sh -c`.
    pub fn raw(command: impl Into<String>) -> Self {
        let cmd = command.into();
        #[cfg(windows)]
        {
            let mut builder = Self::new("cmd");
            builder.args = vec!["/C".to_string()];
            builder.raw_args = vec![cmd];
            builder
        }
        #[cfg(not(windows))]
        {
            let mut builder = Self::new("/bin/sh");
            builder.args = vec!["-c".to_string(), cmd];
            builder
        }
    }

    /// Adds an argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Appends an argument that is passed to the program without quoting.
    ///
    /// Only meaningful on Windows, where `cmd` parses its own command line;
    /// elsewhere it behaves like [`arg`](Self::arg).
    #[must_use]
    pub fn raw_arg(mut self, arg: impl Into<String>) -> Self {
        self.raw_args.push(arg.into());
        self
    }

    /// Sets the working directory for the process.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets a display name for logging.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Puts the child in its own process group so it outlives the parent
    /// and does not receive the parent's Ctrl+C.
    #[must_use]
    pub const fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    /// Returns a reference to the program path.
    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    /// Returns the quoted arguments.
    #[must_use]
    pub fn args_slice(&self) -> &[String] {
        &self.args
    }

    /// Returns the verbatim arguments.
    #[must_use]
    pub fn raw_args_slice(&self) -> &[String] {
        &self.raw_args
    }

    /// Returns a reference to the working directory, if set.
    #[must_use]
    pub const fn working_dir(&self) -> Option<&PathBuf> {
        self.cwd.as_ref()
    }

    pub(super) fn name_override(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns whether the process will be detached.
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.detached
    }
}
