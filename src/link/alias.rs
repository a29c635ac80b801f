// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory alias primitives.
//!
//! ```text
//! inspect(path)          symlink_metadata, dangling links included
//!   --> None | Link | Directory | File
//! remove_existing(path)  unlink / remove_dir_all / remove_file
//! create_dir_alias(target, alias)
//!   unix     symlink()                      --> Symlink
//!   windows  symlink_dir()                  --> Symlink
//!            else `mklink /D`, exit checked --> Mklink
//! ```

use std::path::Path;
use tracing::debug;

use crate::error::{FsError, LinkError};

/// What currently occupies the alias path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existing {
    /// A symbolic link, possibly dangling.
    Link,
    /// A real directory.
    Directory,
    /// Anything else (regular file, socket, ...).
    File,
}

/// How a directory alias was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasMethod {
    /// Native symlink call.
    Symlink,
    /// `mklink /D` through `cmd` (Windows without symlink privilege).
    Mklink,
}

/// Returns what exists at `path` without following a final symlink.
///
/// # Errors
///
/// Returns `FsError::IoError` for failures other than "not found".
pub fn inspect(path: &Path) -> Result<Option<Existing>, FsError> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) => {
            let ft = meta.file_type();
            Ok(Some(if ft.is_symlink() {
                Existing::Link
            } else if ft.is_dir() {
                Existing::Directory
            } else {
                Existing::File
            }))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FsError::io(path, e)),
    }
}

/// Removes whatever [`inspect`] found at `path`.
///
/// Links are removed as links; their target is left alone.
///
/// # Errors
///
/// Returns `FsError::IoError` if the removal fails.
pub fn remove_existing(path: &Path, existing: Existing) -> Result<(), FsError> {
    debug!(path = %path.display(), ?existing, "removing");
    let result = match existing {
        // Directory symlinks on Windows can only be removed with remove_dir.
        Existing::Link => std::fs::remove_file(path).or_else(|_| std::fs::remove_dir(path)),
        Existing::Directory => std::fs::remove_dir_all(path),
        Existing::File => std::fs::remove_file(path),
    };
    result.map_err(|e| FsError::io(path, e))
}

/// Creates a directory symlink at `alias` pointing at `target`.
///
/// `target` is stored verbatim, so a relative target resolves relative to
/// the directory containing `alias`.
///
/// # Errors
///
/// Returns `LinkError::AliasFailed` if no link could be created, including
/// when the Windows `mklink` fallback exits with a non-zero code.
#[cfg_attr(not(windows), allow(clippy::unused_async))]
pub async fn create_dir_alias(target: &Path, alias: &Path) -> Result<AliasMethod, LinkError> {
    debug!(alias = %alias.display(), target = %target.display(), "creating directory link");

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, alias).map_err(|e| LinkError::AliasFailed {
            path: alias.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(AliasMethod::Symlink)
    }

    #[cfg(windows)]
    {
        match std::os::windows::fs::symlink_dir(target, alias) {
            Ok(()) => Ok(AliasMethod::Symlink),
            Err(e) => {
                debug!(error = %e, "symlink_dir failed, falling back to mklink");
                mklink_dir(target, alias).await
            }
        }
    }
}

#[cfg(windows)]
async fn mklink_dir(target: &Path, alias: &Path) -> Result<AliasMethod, LinkError> {
    use crate::core::process::builder::ProcessBuilder;

    let failed = |message: String| LinkError::AliasFailed {
        path: alias.display().to_string(),
        message,
    };

    let output = ProcessBuilder::raw(format!(
        "mklink /D \"{}\" \"{}\"",
        alias.display(),
        target.display()
    ))
    .name("mklink")
    .run()
    .await
    .map_err(|e| failed(format!("{e:#}")))?;

    if output.success() {
        Ok(AliasMethod::Mklink)
    } else {
        let detail = if output.stderr().trim().is_empty() {
            output.stdout().trim()
        } else {
            output.stderr().trim()
        };
        Err(failed(format!(
            "mklink exited with code {}: {detail}",
            output.exit_code()
        )))
    }
}
