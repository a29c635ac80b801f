// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! siblings:  list_siblings()   ignore::Walk, depth 1, no filters
//!            SiblingFilter     excluded names + wax globs
//! ```

pub mod siblings;

pub use siblings::{Sibling, SiblingFilter, list_siblings};
