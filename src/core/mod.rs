// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!            core
//!             |
//!             v
//!          process
//!             |
//!     +-------+--------+
//!     v                v
//!   run()       spawn_detached()
//!   wait +      fire and forget
//!   capture     (bot launcher)
//!   (mklink)
//! ```

pub mod process;
