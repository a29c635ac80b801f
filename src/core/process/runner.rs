// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//!       build_command()
//!   args, raw args, cwd, stdio
//!          /         \
//!         v           v
//!      run()     spawn_detached()
//!   piped stdio   inherited stdio
//!   wait output   new process group
//!         |           |
//!         v           v
//!  ProcessOutput   Option<pid>
//! ```

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::{ProcessError, Result};

/// `CREATE_NEW_PROCESS_GROUP` from `winbase.h`.
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(crate) fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        for arg in self.raw_args_slice() {
            let _ = write!(cmd, " {arg}");
        }
        cmd
    }

    /// Spawns the process and waits for it, capturing stdout and stderr.
    ///
    /// A non-zero exit code is not an error here; callers inspect
    /// [`ProcessOutput::success`].
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the process cannot be started and
    /// `ProcessError::OutputError` if waiting on it fails.
    pub async fn run(self) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|source| ProcessError::SpawnFailed {
            command: cmd_line.clone(),
            source,
        })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ProcessError::OutputError {
                command: cmd_line,
                message: e.to_string(),
            })?;

        let exit_code = output.status.code().unwrap_or(-1);
        trace!(process = %name, exit_code, "completed");

        Ok(ProcessOutput::new(
            exit_code,
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ))
    }

    /// Spawns the process and returns immediately with its pid.
    ///
    /// The child inherits stdout and stderr, gets no stdin, and is never
    /// waited on: dropping the handle does not kill it, and it keeps running
    /// after this process exits. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the OS refuses to create the process.
    pub fn spawn_detached(self) -> std::result::Result<Option<u32>, ProcessError> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec detached");

        let mut command = self.build_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(false);

        let child = command
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line,
                source,
            })?;

        let pid = child.id();
        trace!(process = %name, pid = ?pid, "detached");
        drop(child);
        Ok(pid)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        #[cfg(windows)]
        for arg in self.raw_args_slice() {
            command.raw_arg(arg);
        }
        #[cfg(not(windows))]
        command.args(self.raw_args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        if self.is_detached() {
            #[cfg(unix)]
            command.process_group(0);
            #[cfg(windows)]
            command.creation_flags(CREATE_NEW_PROCESS_GROUP);
        }

        command
    }
}
