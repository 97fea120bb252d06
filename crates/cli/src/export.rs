// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test case export.
//!
//! Renders the history as a replay script framed by the active connector's
//! header and footer. Typed commands become comment lines, messages are
//! rendered by the message itself.

use crate::connector::Connector;
use crate::history::{Direction, HistoryEntry, HistoryLog};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;

/// Errors writing a test case
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

/// Outcome of an export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Entries rendered
    pub written: usize,
    /// Entries that could not be classified, in debug form
    pub skipped: Vec<String>,
}

/// Writes a history as a test case.
pub struct TestCaseExporter;

impl TestCaseExporter {
    /// Write header, entries oldest first, then footer.
    ///
    /// Without a connector the header and footer are empty.
    pub fn export(
        history: &HistoryLog,
        connector: Option<&dyn Connector>,
        out: &mut dyn Write,
    ) -> Result<ExportReport, ExportError> {
        if let Some(connector) = connector {
            connector.write_test_case_header(out)?;
        }

        let mut report = ExportReport::default();
        for entry in history.all() {
            match render_entry(entry) {
                Some(block) => {
                    out.write_all(block.as_bytes())?;
                    report.written += 1;
                }
                None => {
                    tracing::warn!(entry = ?entry, "skipping unexpected history entry");
                    report.skipped.push(format!("{:?}", entry));
                }
            }
        }

        if let Some(connector) = connector {
            connector.write_test_case_footer(out)?;
        }
        Ok(report)
    }

    /// Export into `path`, truncating whatever was there.
    pub fn save(
        history: &HistoryLog,
        connector: Option<&dyn Connector>,
        path: &Path,
    ) -> Result<ExportReport, ExportError> {
        let io_error = |source: io::Error| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut out = BufWriter::new(File::create(path).map_err(io_error)?);
        let report = Self::export(history, connector, &mut out).map_err(|e| match e {
            ExportError::Write(source) => io_error(source),
            other => other,
        })?;
        out.flush().map_err(io_error)?;

        tracing::info!(path = %path.display(), entries = report.written, "saved test case");
        Ok(report)
    }
}

/// Render one entry, `None` when the entry kind is not known.
pub fn render_entry(entry: &HistoryEntry) -> Option<String> {
    match entry {
        HistoryEntry::TypedCommand { raw } => Some(format!("# {}\n", raw)),
        HistoryEntry::Sent { message } => {
            Some(format!("{}\n", message.to_test_case(Direction::Sent)))
        }
        HistoryEntry::Received { message } => {
            Some(format!("{}\n", message.to_test_case(Direction::Received)))
        }
        _ => None,
    }
}
