// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interaction history for the nsh protocol shell.
//!
//! This crate provides the append-only record of everything that happened in
//! a shell session: commands typed by the operator, messages a connector sent
//! and messages it received. The record is later rendered into a replayable
//! test case by the shell.

mod entry;
mod journal;
mod log;
mod message;

pub use entry::HistoryEntry;
pub use journal::JournalRecord;
pub use log::HistoryLog;
pub use message::{Direction, Message};
