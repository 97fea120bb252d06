// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by nsh are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;

/// `NSH_CONFIG` - Configuration file used when `--config` is not given.
pub fn config_path() -> Option<PathBuf> {
    non_empty(names::NSH_CONFIG).map(PathBuf::from)
}

/// `NSH_HISTORY_FILE` - Line-editing history file override.
pub fn history_file() -> Option<PathBuf> {
    non_empty(names::NSH_HISTORY_FILE).map(PathBuf::from)
}

/// `NSH_LOG` - `tracing` filter directives (e.g. `nsh=debug`).
pub fn log_filter() -> Option<String> {
    non_empty(names::NSH_LOG)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
