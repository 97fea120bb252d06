// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with shell output. `NSH_LOG` takes
//! precedence over the `-v` count.

use tracing_subscriber::EnvFilter;

/// Filter directives for a `-v` count.
pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. Repeated calls are ignored.
pub fn init(verbosity: u8) {
    let directives = crate::env::log_filter()
        .unwrap_or_else(|| default_directives(verbosity).to_string());
    let filter = EnvFilter::try_new(&directives)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
