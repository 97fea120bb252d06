// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive session: dispatch and receive-drain.
//!
//! A session starts with no connector. Loading one builds a fresh command
//! table from its commands; a failed load leaves everything as it was.
//! Every submitted line is followed by a drain of the active connector's
//! receive poll, so messages that arrived in the meantime land in the
//! history before the next command runs.

use crate::command::{split_line, Binding, CommandTable, MetaCommand};
use crate::config::DEFAULT_SAVE_FILE;
use crate::connector::{
    Args, CommandContext, Connector, ConnectorDescriptor, ConnectorRegistry,
};
use crate::error::ShellError;
use crate::export::{ExportReport, TestCaseExporter};
use crate::history::{HistoryLog, Message};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

/// Prompt label while no connector is loaded.
pub const NO_CONNECTOR: &str = "(none)";

/// Operator-facing result of one command.
#[derive(Default)]
pub struct Reply {
    /// Lines to print
    pub lines: Vec<String>,
    /// Messages the command sent, in order
    pub sent: Vec<Arc<dyn Message>>,
    /// Set by `/exit`
    pub exit: bool,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sent: Vec<String> = self.sent.iter().map(|m| m.summary()).collect();
        f.debug_struct("Reply")
            .field("lines", &self.lines)
            .field("sent", &sent)
            .field("exit", &self.exit)
            .finish()
    }
}

/// One dispatch cycle: the command outcome plus what the drain collected.
pub struct Cycle {
    pub outcome: Result<Reply, ShellError>,
    pub received: Vec<Arc<dyn Message>>,
}

struct Active {
    name: String,
    connector: Box<dyn Connector>,
}

pub struct Session {
    registry: ConnectorRegistry,
    history: HistoryLog,
    active: Option<Active>,
    commands: CommandTable,
    save_path: PathBuf,
}

impl Session {
    pub fn new(registry: ConnectorRegistry, history: HistoryLog) -> Self {
        Self {
            registry,
            history,
            active: None,
            commands: CommandTable::core(),
            save_path: std::env::temp_dir().join(DEFAULT_SAVE_FILE),
        }
    }

    /// Destination used by `/save` without an argument.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn active_name(&self) -> &str {
        self.active
            .as_ref()
            .map_or(NO_CONNECTOR, |active| active.name.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// `[name] $ `, with the connector's status before the `$` when it has one.
    pub fn prompt(&self) -> String {
        let status = self
            .active
            .as_ref()
            .and_then(|active| active.connector.status());
        match status {
            Some(status) => format!("[{}] {} $ ", self.active_name(), status),
            None => format!("[{}] $ ", self.active_name()),
        }
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    /// Every dispatchable name, for completion.
    pub fn command_names(&self) -> Vec<String> {
        self.commands
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Run one line, then drain received messages.
    ///
    /// A blank line dispatches nothing but still drains.
    pub fn submit(&mut self, line: &str) -> Cycle {
        let outcome = if line.trim().is_empty() {
            Ok(Reply::default())
        } else {
            self.dispatch(line)
        };
        let received = self.drain();
        Cycle { outcome, received }
    }

    /// Resolve and run one line without draining.
    pub fn dispatch(&mut self, line: &str) -> Result<Reply, ShellError> {
        let words = split_line(line).map_err(ShellError::Parse)?;
        let Some((name, words)) = words.split_first() else {
            return Ok(Reply::default());
        };

        let binding = self
            .commands
            .resolve(name)
            .cloned()
            .ok_or_else(|| ShellError::UnknownCommand(name.clone()))?;
        let spec = binding.spec();
        let args = spec.bind(words).map_err(|source| ShellError::Usage {
            usage: spec.usage(),
            source,
        })?;

        match binding {
            Binding::Meta(meta) => self.run_meta(meta, &args),
            Binding::Connector(_) => self.run_connector(name, line.trim(), &args),
        }
    }

    fn run_connector(&mut self, name: &str, raw: &str, args: &Args) -> Result<Reply, ShellError> {
        let active = self
            .active
            .as_mut()
            .ok_or_else(|| ShellError::UnknownCommand(name.to_string()))?;

        self.history.typed_command(raw);
        let mut ctx = CommandContext::new();
        let result = active.connector.execute(name, args, &mut ctx);

        let (sent, lines) = ctx.into_parts();
        for message in &sent {
            self.history.sent(Arc::clone(message));
        }
        result.map_err(|source| ShellError::Connector {
            command: name.to_string(),
            source,
        })?;

        Ok(Reply {
            lines,
            sent,
            exit: false,
        })
    }

    fn run_meta(&mut self, meta: MetaCommand, args: &Args) -> Result<Reply, ShellError> {
        match meta {
            MetaCommand::Load => {
                let name = args.str("name").map_err(ShellError::Parse)?;
                Ok(Reply::lines(self.load(name)?))
            }
            MetaCommand::Reset => {
                self.reset();
                Ok(Reply::line("history cleared"))
            }
            MetaCommand::Save => {
                let path = args.opt_str("path").map(PathBuf::from);
                let (path, report) = self.save(path.as_deref())?;
                let mut lines: Vec<String> = report
                    .skipped
                    .iter()
                    .map(|entry| format!("unexpected history entry: {}", entry))
                    .collect();
                lines.push(format!("saved to {}", path.display()));
                Ok(Reply::lines(lines))
            }
            MetaCommand::Details => {
                let n = args.int("n").map_err(ShellError::Parse)?;
                // Anything below 1 means the most recent message
                let n = usize::try_from(n).unwrap_or(0);
                Ok(match self.details(n) {
                    Some(details) => {
                        let mut lines = vec![String::new()];
                        lines.extend(details.lines().map(str::to_string));
                        Reply::lines(lines)
                    }
                    None => Reply::line("message not found"),
                })
            }
            MetaCommand::Help => Ok(Reply::lines(self.help())),
            MetaCommand::Connectors => {
                let names = self.registry.list();
                if names.is_empty() {
                    return Ok(Reply::line("no connectors available"));
                }
                Ok(Reply::lines(
                    names.into_iter().map(|name| format!("  {}", name)).collect(),
                ))
            }
            MetaCommand::Exit => Ok(Reply {
                exit: true,
                ..Reply::default()
            }),
        }
    }

    /// Replace the active connector.
    ///
    /// The new connector is built and initialized before the old one is
    /// cleaned up. On any failure the session is left untouched. Returns the
    /// lines describing the loaded command set.
    pub fn load(&mut self, name: &str) -> Result<Vec<String>, ShellError> {
        let ConnectorDescriptor {
            name,
            commands,
            mut connector,
        } = self.registry.load(name)?;

        connector
            .init()
            .map_err(|source| ShellError::ConnectorLoad {
                name: name.clone(),
                source,
            })?;

        if let Some(mut previous) = self.active.take() {
            previous.connector.cleanup();
            tracing::info!(from = %previous.name, to = %name, "replacing connector");
        } else {
            tracing::info!(connector = %name, "loaded connector");
        }

        self.commands = CommandTable::compose(&commands);
        let mut lines = vec![format!("loading connector {}", name)];
        lines.extend(
            self.commands
                .connector_commands()
                .map(|spec| format!("  {}", spec.usage())),
        );
        self.active = Some(Active { name, connector });
        Ok(lines)
    }

    /// Clear the history. The active connector stays.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Export the history, to `path` or the default save path.
    pub fn save(&self, path: Option<&Path>) -> Result<(PathBuf, ExportReport), ShellError> {
        let path = path.map_or_else(|| self.save_path.clone(), Path::to_path_buf);
        let connector = self.active.as_ref().map(|active| &*active.connector);
        let report = TestCaseExporter::save(&self.history, connector, &path)?;
        Ok((path, report))
    }

    /// Direction and details of the `n`-th most recent message (1-based, `0`
    /// counts as `1`; `/details` maps negative values to `0` as well).
    pub fn details(&self, n: usize) -> Option<String> {
        self.history
            .nth_message(n)
            .map(|(direction, message)| format!("*** {} ***\n{}", direction, message.details()))
    }

    /// Poll the active connector until it has nothing more.
    pub fn drain(&mut self) -> Vec<Arc<dyn Message>> {
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };

        let mut received = Vec::new();
        while let Some(message) = active.connector.try_read() {
            self.history.received(Arc::clone(&message));
            received.push(message);
        }
        if !received.is_empty() {
            tracing::debug!(count = received.len(), "drained received messages");
        }
        received
    }

    /// Usage lines for the meta-commands and the active connector's commands.
    pub fn help(&self) -> Vec<String> {
        let mut lines = vec!["meta commands:".to_string()];
        for meta in MetaCommand::ALL {
            let spec = meta.spec();
            let usage = spec.usage();
            let aliases: Vec<String> = meta
                .aliases()
                .iter()
                .map(|alias| format!("/{}", alias))
                .collect();
            let description = if aliases.is_empty() {
                spec.description
            } else {
                format!("{} (also {})", spec.description, aliases.join(", "))
            };
            lines.push(format!("  {:<24} {}", usage, description));
        }

        let mut connector_commands = self.commands.connector_commands().peekable();
        if connector_commands.peek().is_some() {
            lines.push(format!("{} commands:", self.active_name()));
            for spec in connector_commands {
                lines.push(format!("  {:<24} {}", spec.usage(), spec.description));
            }
        }
        lines
    }

    /// Clean up the active connector.
    pub fn shutdown(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.connector.cleanup();
            tracing::debug!(connector = %active.name, "connector cleaned up");
        }
        self.commands = CommandTable::core();
    }
}
