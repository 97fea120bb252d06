// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! History log implementation.

use crate::entry::HistoryEntry;
use crate::journal::Journal;
use crate::message::{Direction, Message};
use std::path::Path;
use std::sync::Arc;

/// Append-only, ordered record of a shell session.
///
/// Entries are kept in insertion order. Nothing is ever removed except by
/// [`HistoryLog::clear`].
#[derive(Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    journal: Option<Journal>,
}

impl HistoryLog {
    /// Create a new in-memory history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that also mirrors every entry to a JSONL journal.
    ///
    /// The journal file is created or truncated.
    pub fn with_journal(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            entries: Vec::new(),
            journal: Some(Journal::create(path)?),
        })
    }

    /// Path of the journal file, if one is attached.
    pub fn journal_path(&self) -> Option<&Path> {
        self.journal.as_ref().map(Journal::path)
    }

    /// Append an entry at the end of the log
    pub fn append(&mut self, entry: HistoryEntry) {
        if let Some(journal) = self.journal.as_mut() {
            journal.record_entry(&entry);
        }
        self.entries.push(entry);
    }

    pub fn typed_command(&mut self, raw: impl Into<String>) {
        self.append(HistoryEntry::typed_command(raw));
    }

    pub fn sent(&mut self, message: Arc<dyn Message>) {
        self.append(HistoryEntry::sent(message));
    }

    pub fn received(&mut self, message: Arc<dyn Message>) {
        self.append(HistoryEntry::received(message));
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Some(journal) = self.journal.as_mut() {
            journal.record_reset();
        }
    }

    /// All entries, oldest first.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// All entries, newest first.
    pub fn entries_newest_first(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter().rev()
    }

    /// Sent and received messages, newest first. Typed commands are skipped.
    pub fn messages_newest_first(
        &self,
    ) -> impl Iterator<Item = (Direction, &Arc<dyn Message>)> + '_ {
        self.entries_newest_first()
            .filter_map(|entry| Some((entry.direction()?, entry.message()?)))
    }

    /// The `n`-th most recent sent or received message (1-based).
    ///
    /// `0` is treated like `1`.
    pub fn nth_message(&self, n: usize) -> Option<(Direction, &Arc<dyn Message>)> {
        self.messages_newest_first().nth(n.max(1) - 1)
    }

    /// The last `n` entries, oldest first.
    pub fn last(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Count entries matching a predicate
    pub fn count<F: Fn(&HistoryEntry) -> bool>(&self, pred: F) -> usize {
        self.entries.iter().filter(|e| pred(e)).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
