// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-platform command lines for starting a bot.
//!
//! ```text
//! Unix     /bin/sh -c "cd <dir> && exec <runtime> <entry>"
//! Windows  cmd /C start cmd /k "title <t> && color <c> && cls && cd /d "<dir>" && <runtime> <entry>"
//!          cmd /C cd /d "<dir>" && <runtime> <entry>          (new_window = false)
//! ```
//!
//! Both forms are plain data so they can be checked on any host.

use std::borrow::Cow;

use super::LaunchRequest;
use crate::core::process::builder::ProcessBuilder;
use crate::error::ProcessError;

/// Which command-line dialect to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    /// The platform this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }
}

/// Builds the detached process that runs `request`'s entry point.
///
/// # Errors
///
/// Returns `ProcessError::InvalidCommand` if a path or name cannot be
/// represented in the shell's syntax.
pub fn build_command(
    request: &LaunchRequest,
    platform: Platform,
) -> Result<ProcessBuilder, ProcessError> {
    let builder = match platform {
        Platform::Unix => ProcessBuilder::new("/bin/sh")
            .arg("-c")
            .arg(unix_script(request)?),
        Platform::Windows => ProcessBuilder::new("cmd")
            .arg("/C")
            .raw_arg(windows_script(request)),
    };

    Ok(builder
        .cwd(request.working_dir())
        .name(request.name())
        .detached())
}

/// `cd <dir> && exec <runtime> <entry>` with POSIX quoting.
///
/// # Errors
///
/// Returns `ProcessError::InvalidCommand` if any part contains a NUL byte.
pub fn unix_script(request: &LaunchRequest) -> Result<String, ProcessError> {
    let quote = |s: &str| -> Result<String, ProcessError> {
        shlex::try_quote(s)
            .map(Cow::into_owned)
            .map_err(|e| ProcessError::InvalidCommand {
                name: request.name().to_string(),
                message: e.to_string(),
            })
    };

    let dir = request.working_dir().to_string_lossy();
    Ok(format!(
        "cd {} && exec {} {}",
        quote(&dir)?,
        quote(request.runtime())?,
        quote(request.entry())?
    ))
}

/// The verbatim `cmd` command line, without the leading `/C`.
#[must_use]
pub fn windows_script(request: &LaunchRequest) -> String {
    let dir = request.working_dir().display();
    let run = format!(
        "cd /d \"{dir}\" && {} {}",
        request.runtime(),
        request.entry()
    );

    match request.window() {
        Some(window) => format!(
            "start cmd /k \"title {} && color {} && cls && {run}\"",
            escape_cmd(window.title()),
            window.color()
        ),
        None => run,
    }
}

/// Caret-escapes `cmd` metacharacters so a title cannot split the command.
fn escape_cmd(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '&' | '|' | '<' | '>' | '^' | '(' | ')' | '"') {
            escaped.push('^');
        }
        escaped.push(c);
    }
    escaped
}

