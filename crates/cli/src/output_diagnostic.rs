// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing diagnostics on stderr.
//!
//! Shell errors never end the session: they are printed and the prompt comes
//! back. Color is used only when stderr is a terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

impl Severity {
    const fn label(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }

    /// SGR foreground color code.
    const fn color(self) -> &'static str {
        match self {
            Self::Error => "31",
            Self::Warning => "33",
        }
    }
}

/// Print an error to stderr, red on a terminal.
pub fn print_error(msg: impl Display) {
    emit(Severity::Error, msg);
}

/// Print a warning to stderr, yellow on a terminal.
pub fn print_warning(msg: impl Display) {
    emit(Severity::Warning, msg);
}

fn emit(severity: Severity, msg: impl Display) {
    let stderr = io::stderr();
    let colored = stderr.is_terminal();
    write_diagnostic(&mut stderr.lock(), severity, msg, colored);
}

/// Continuation lines (such as the usage line of a usage error) are
/// indented under the first line's text.
fn write_diagnostic<W: Write>(writer: &mut W, severity: Severity, msg: impl Display, colored: bool) {
    let text = msg.to_string();
    let label = severity.label();
    let indent = " ".repeat(label.len() + 2);

    let mut lines = text.lines();
    let mut rendered = format!("{}: {}", label, lines.next().unwrap_or_default());
    for line in lines {
        rendered.push('\n');
        rendered.push_str(&indent);
        rendered.push_str(line);
    }

    let _ = if colored {
        writeln!(writer, "\x1b[{}m{}\x1b[0m", severity.color(), rendered)
    } else {
        writeln!(writer, "{}", rendered)
    };
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
