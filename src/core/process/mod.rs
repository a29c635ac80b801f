// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("node") / ::which("node") / ::raw("mklink ...")
//!   .arg() .raw_arg() .cwd() .name() .detached()
//!   .run()            --> tokio::process::Command, wait
//!                     --> ProcessOutput { exit_code, stdout, stderr }
//!   .spawn_detached() --> Option<pid>, child never awaited
//! ```

pub mod builder;
mod runner;
#[cfg(test)]
mod tests;
