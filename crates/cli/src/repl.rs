// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented front end.
//!
//! On a terminal the shell reads lines with `rustyline`, completing command
//! names and connector names after `/load`. Piped input and scripts are read
//! line by line, each echoed after the prompt so the transcript reads like an
//! interactive session.

use crate::output_diagnostic::print_error;
use crate::session::{Cycle, Session};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::io::{self, BufRead, Write};
use std::path::Path;

#[cfg(test)]
#[path = "repl_tests.rs"]
mod tests;

/// Meta-command names whose argument is a connector name.
const LOAD_COMMANDS: &[&str] = &["/load", "/mod"];

/// Script lines starting with this are skipped.
const COMMENT_PREFIX: char = '#';

/// Completion source for the line editor.
#[derive(Clone, Debug, Default)]
pub struct ShellHelper {
    commands: Vec<String>,
    connectors: Vec<String>,
}

impl ShellHelper {
    pub fn new(commands: Vec<String>, connectors: Vec<String>) -> Self {
        Self {
            commands,
            connectors,
        }
    }

    /// Replace the command names after a load.
    pub fn set_commands(&mut self, commands: Vec<String>) {
        self.commands = commands;
    }

    /// Start offset and candidates for the text left of the cursor.
    pub fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let trimmed = line.trim_start();
        let offset = line.len() - trimmed.len();

        let Some((first, rest)) = trimmed.split_once(char::is_whitespace) else {
            return (offset, matching(&self.commands, trimmed));
        };
        if !LOAD_COMMANDS.contains(&first) {
            return (line.len(), Vec::new());
        }

        let word = rest.trim_start();
        if word.contains(char::is_whitespace) {
            return (line.len(), Vec::new());
        }
        (line.len() - word.len(), matching(&self.connectors, word))
    }
}

fn matching(names: &[String], prefix: &str) -> Vec<String> {
    names
        .iter()
        .filter(|name| name.starts_with(prefix))
        .cloned()
        .collect()
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, names) = self.candidates(&line[..pos]);
        let pairs = names
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

/// Print a cycle's output. Returns `true` when the shell should exit.
///
/// Sent messages are shown as `>> summary`, received ones as `<< summary`.
/// Errors go to stderr.
pub fn render_cycle<W: Write>(cycle: &Cycle, out: &mut W) -> io::Result<bool> {
    let mut exit = false;
    match &cycle.outcome {
        Ok(reply) => {
            for message in &reply.sent {
                writeln!(out, ">> {}", message.summary())?;
            }
            for line in &reply.lines {
                writeln!(out, "{}", line)?;
            }
            exit = reply.exit;
        }
        Err(e) => print_error(e),
    }
    for message in &cycle.received {
        writeln!(out, "<< {}", message.summary())?;
    }
    Ok(exit)
}

/// Run lines from a reader until EOF or `/exit`.
pub fn run_lines<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        writeln!(out, "{}{}", session.prompt(), line)?;
        if line.trim_start().starts_with(COMMENT_PREFIX) {
            continue;
        }
        let cycle = session.submit(&line);
        if render_cycle(&cycle, out)? {
            break;
        }
    }
    out.flush()
}

/// Run the interactive line editor until EOF or `/exit`.
///
/// Ctrl-C abandons the current line. Line history is loaded from and saved
/// to `history_file` after every line when one is given.
pub fn run_interactive(session: &mut Session, history_file: Option<&Path>) -> rustyline::Result<()> {
    let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ShellHelper::new(
        session.command_names(),
        session.registry().names(),
    )));

    if let Some(path) = history_file {
        if let Err(e) = editor.load_history(path) {
            tracing::debug!(path = %path.display(), error = %e, "no line history loaded");
        }
    }

    let mut stdout = io::stdout();
    loop {
        if let Some(helper) = editor.helper_mut() {
            helper.set_commands(session.command_names());
        }

        let line = match editor.readline(&session.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        };

        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
            if let Some(path) = history_file {
                if let Err(e) = editor.save_history(path) {
                    tracing::warn!(path = %path.display(), error = %e, "cannot save line history");
                }
            }
        }

        let cycle = session.submit(&line);
        if render_cycle(&cycle, &mut stdout)? {
            break;
        }
    }
    Ok(())
}
