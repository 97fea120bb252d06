// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSONL journal mirroring the history as it is recorded.

use crate::entry::HistoryEntry;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One line of the journal file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Sequence number, counted across resets
    pub seq: u64,

    /// Milliseconds since the journal was opened
    pub elapsed_ms: u64,

    /// `command`, `sent`, `received` or `reset`
    pub kind: String,

    /// Raw command text or message summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

pub(crate) struct Journal {
    path: PathBuf,
    start: Instant,
    seq: u64,
    writer: BufWriter<File>,
}

impl Journal {
    pub(crate) fn create(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            start: Instant::now(),
            seq: 0,
            writer: BufWriter::new(file),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn record_entry(&mut self, entry: &HistoryEntry) {
        let record = self.next_record(entry.kind(), Some(entry.text()));
        self.write(&record);
    }

    pub(crate) fn record_reset(&mut self) {
        let record = self.next_record("reset", None);
        self.write(&record);
    }

    fn next_record(&mut self, kind: &str, text: Option<String>) -> JournalRecord {
        let record = JournalRecord {
            seq: self.seq,
            elapsed_ms: self.start.elapsed().as_millis() as u64,
            kind: kind.to_string(),
            text,
        };
        self.seq += 1;
        record
    }

    // Journal failures never interrupt the shell.
    fn write(&mut self, record: &JournalRecord) {
        let result = serde_json::to_string(record)
            .map_err(std::io::Error::from)
            .and_then(|json| {
                writeln!(self.writer, "{}", json)?;
                self.writer.flush()
            });
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write history journal");
        }
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
