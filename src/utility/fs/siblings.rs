// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use wax::Program as _;

/// An immediate child directory of the fleet root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sibling {
    name: String,
    path: PathBuf,
}

impl Sibling {
    /// Creates a sibling entry.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Directory name relative to the root.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Names and glob patterns of siblings to skip.
#[derive(Debug, Clone, Default)]
pub struct SiblingFilter {
    names: Vec<String>,
    patterns: Vec<String>,
}

impl SiblingFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips the sibling with exactly this name.
    #[must_use]
    pub fn exclude_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Skips siblings whose name matches any of these globs.
    ///
    /// Patterns that fail to parse never match; the configuration layer
    /// rejects them before they get here.
    #[must_use]
    pub fn exclude_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Returns true if `name` should be skipped.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        if self.names.iter().any(|n| n == name) {
            return true;
        }
        self.patterns.iter().any(|pattern| {
            wax::Glob::new(pattern).is_ok_and(|glob| glob.is_match(name))
        })
    }
}

/// Lists the immediate child directories of `root`, sorted by name.
///
/// Hidden and git-ignored directories are included, and symlinks to
/// directories count as directories. Entries that cannot be read are
/// logged and skipped, as are names that are not valid UTF-8.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `root` is not a directory.
///
/// # Example
/// ```no_run
/// use botfleet::utility::fs::{list_siblings, SiblingFilter};
///
/// let filter = SiblingFilter::new().exclude_name("ali_g");
/// for sibling in list_siblings(".", &filter)? {
///     println!("{}", sibling.name());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn list_siblings<P: AsRef<Path>>(root: P, filter: &SiblingFilter) -> Result<Vec<Sibling>> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(FsError::NotFound(root.display().to_string()).into());
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .max_depth(Some(1))
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut siblings = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "skipping non UTF-8 directory name");
            continue;
        };

        if filter.is_excluded(name) {
            trace!(sibling = name, "excluded");
            continue;
        }

        siblings.push(Sibling::new(name, entry.path()));
    }

    Ok(siblings)
}
