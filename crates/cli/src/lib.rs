// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network protocol shell.
//!
//! An interactive shell for exercising a protocol by hand. A pluggable
//! [`connector::Connector`] encodes and decodes the protocol; the shell
//! records every typed command, sent message and received message, and
//! `/save` turns that record into a replayable test case.

// Internal modules - pub for binary access, hidden from docs
#[doc(hidden)]
pub mod cli;
#[doc(hidden)]
pub mod command;
#[doc(hidden)]
pub mod config;
pub mod connector;
#[doc(hidden)]
pub mod env;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod export;
/// Re-exported history types from the nsh-history crate.
pub mod history {
    pub use nsh_history::{Direction, HistoryEntry, HistoryLog, JournalRecord, Message};
}
#[doc(hidden)]
pub mod logging;
#[doc(hidden)]
pub mod output_diagnostic;
#[doc(hidden)]
pub mod repl;
#[doc(hidden)]
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
