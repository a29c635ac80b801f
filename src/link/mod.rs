// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared dependency directory links.
//!
//! ```text
//! <root>/
//!   ali_g/node_modules/        <- hub, the real directory
//!   bot_a/node_modules -> ../ali_g/node_modules
//!   bot_b/node_modules -> ../ali_g/node_modules
//!
//! run_link_setup(root)
//!   check <hub>/<deps_dir> exists   (else HubDepsMissing, nothing touched)
//!   for sibling != hub, sorted:
//!     sibling resolves to the hub (a link to it)?  --> warn, skip
//!     inspect -> remove link | remove_dir_all | remove file
//!     create_dir_alias(../<hub>/<deps_dir>)
//!   "Created symlinks for N directories"
//! ```
//!
//! Siblings are processed one at a time and the first failure aborts the
//! run; siblings handled before it keep their new links.

pub mod alias;


use bon::Builder;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FsError, LinkError, Result};
use crate::utility::fs::{SiblingFilter, list_siblings};

use alias::{AliasMethod, Existing, create_dir_alias, inspect, remove_existing};

/// Inputs of a link setup run.
#[derive(Debug, Clone, Builder)]
pub struct LinkSettings {
    /// Sibling that owns the real dependency directory.
    #[builder(into)]
    hub: String,
    /// Dependency directory name inside every sibling.
    #[builder(into, default = "node_modules".to_string())]
    deps_dir: String,
    /// Glob patterns of siblings to skip.
    #[builder(default)]
    exclude: Vec<String>,
    /// Report without touching the filesystem.
    #[builder(default = false)]
    dry: bool,
}

impl LinkSettings {
    /// Settings from the `[link]`, `[fleet]` and `[global]` sections.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            hub: config.link.hub.clone(),
            deps_dir: config.link.deps_dir.clone(),
            exclude: config.fleet.exclude.clone(),
            dry: config.global.dry,
        }
    }

    #[must_use]
    pub fn hub(&self) -> &str {
        &self.hub
    }

    #[must_use]
    pub fn deps_dir(&self) -> &str {
        &self.deps_dir
    }

    #[must_use]
    pub const fn is_dry(&self) -> bool {
        self.dry
    }

    /// `<root>/<hub>/<deps_dir>`.
    #[must_use]
    pub fn hub_deps_path(&self, root: &Path) -> PathBuf {
        root.join(&self.hub).join(&self.deps_dir)
    }

    /// Link target as seen from inside a sibling: `../<hub>/<deps_dir>`.
    #[must_use]
    pub fn relative_target(&self) -> PathBuf {
        Path::new("..").join(&self.hub).join(&self.deps_dir)
    }
}

/// Counts gathered during a link setup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
    linked: usize,
    replaced_links: usize,
    replaced_dirs: usize,
}

impl LinkReport {
    /// Number of siblings that now link to the hub.
    #[must_use]
    pub const fn linked(&self) -> usize {
        self.linked
    }

    /// Pre-existing links that were replaced.
    #[must_use]
    pub const fn replaced_links(&self) -> usize {
        self.replaced_links
    }

    /// Pre-existing real directories (or files) that were deleted.
    #[must_use]
    pub const fn replaced_dirs(&self) -> usize {
        self.replaced_dirs
    }
}

/// Points every sibling's dependency directory at the hub's.
///
/// Progress lines and the final summary are written to `out`.
///
/// # Errors
///
/// - `LinkError::HubDepsMissing` if `<root>/<hub>/<deps_dir>` is not a
///   directory. Nothing is modified in that case.
/// - `FsError` if listing the root or removing an existing entry fails.
/// - `LinkError::AliasFailed` if a link cannot be created.
///
/// The first error stops the run.
pub async fn run_link_setup<W: Write>(
    root: &Path,
    settings: &LinkSettings,
    out: &mut W,
) -> Result<LinkReport> {
    let hub_deps = settings.hub_deps_path(root);
    if !hub_deps.is_dir() {
        return Err(LinkError::HubDepsMissing {
            path: hub_deps.display().to_string(),
        }
        .into());
    }
    let hub_deps = hub_deps
        .canonicalize()
        .map_err(|e| FsError::io(&hub_deps, e))?;
    let hub_dir = root.join(settings.hub()).canonicalize().ok();

    let filter = SiblingFilter::new()
        .exclude_name(settings.hub())
        .exclude_patterns(settings.exclude.iter().cloned());
    let siblings = list_siblings(root, &filter)?;
    debug!(root = %root.display(), count = siblings.len(), "linking siblings");

    let target = settings.relative_target();
    let dry = if settings.is_dry() { "[dry] " } else { "" };
    let mut report = LinkReport::default();

    for sibling in &siblings {
        let name = sibling.name();
        let alias_path = sibling.path().join(settings.deps_dir());
        let existing = inspect(&alias_path)?;

        if resolves_to_hub(sibling.path(), hub_dir.as_deref())
            || (existing == Some(Existing::Directory) && resolves_to(&alias_path, &hub_deps))
        {
            warn!(sibling = name, "sibling resolves to the hub, skipping");
            continue;
        }

        if let Some(existing) = existing {
            if !settings.is_dry() {
                remove_existing(&alias_path, existing)?;
            }
            match existing {
                Existing::Link => {
                    report.replaced_links += 1;
                    writeln!(out, "{dry}Removed existing symlink in {name}")?;
                }
                Existing::Directory => {
                    report.replaced_dirs += 1;
                    writeln!(
                        out,
                        "{dry}Removed existing {} directory in {name}",
                        settings.deps_dir()
                    )?;
                }
                Existing::File => {
                    report.replaced_dirs += 1;
                    writeln!(
                        out,
                        "{dry}Removed existing {} file in {name}",
                        settings.deps_dir()
                    )?;
                }
            }
        }

        if settings.is_dry() {
            writeln!(out, "{dry}Created symlink in {name} -> {}", target.display())?;
        } else {
            match create_dir_alias(&target, &alias_path).await? {
                AliasMethod::Symlink => {
                    writeln!(out, "Created symlink in {name} -> {}", target.display())?;
                }
                AliasMethod::Mklink => {
                    writeln!(out, "Created symlink in {name} using mklink")?;
                }
            }
        }
        report.linked += 1;
    }

    writeln!(out, "{dry}Created symlinks for {} directories", report.linked)?;
    debug!(
        linked = report.linked,
        replaced_links = report.replaced_links,
        replaced_dirs = report.replaced_dirs,
        dry = settings.is_dry(),
        "link setup finished"
    );
    Ok(report)
}

/// True if `dir` is the hub directory under another name (a link to it).
fn resolves_to_hub(dir: &Path, hub_dir: Option<&Path>) -> bool {
    hub_dir.is_some_and(|hub| resolves_to(dir, hub))
}

fn resolves_to(path: &Path, canonical: &Path) -> bool {
    path.canonicalize().is_ok_and(|p| p == canonical)
}
