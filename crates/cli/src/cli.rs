// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Interactive shell for exercising network protocols
#[derive(Parser, Clone, Debug)]
#[command(name = "nsh", version, about = "Interactive network protocol shell")]
pub struct Cli {
    /// Connector to load at startup
    #[arg(value_name = "CONNECTOR")]
    pub connector: Option<String>,

    /// Configuration file (TOML). Falls back to $NSH_CONFIG.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Default destination for /save
    #[arg(long, value_name = "FILE")]
    pub save_path: Option<PathBuf>,

    /// Line-editing history file. Falls back to $NSH_HISTORY_FILE.
    #[arg(long, value_name = "FILE")]
    pub history_file: Option<PathBuf>,

    /// Do not read or write the line-editing history file
    #[arg(long)]
    pub no_history: bool,

    /// Mirror the interaction history to a JSONL journal
    #[arg(long, value_name = "FILE")]
    pub journal: Option<PathBuf>,

    /// Run commands from a file instead of reading from the terminal
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print the discoverable connectors and exit
    #[arg(long)]
    pub list_connectors: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
