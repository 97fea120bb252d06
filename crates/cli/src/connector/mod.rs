// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol connectors.
//!
//! A connector knows how to encode and decode one protocol. It exposes a set
//! of named commands, may send messages while executing them, and surfaces
//! received messages through a non-blocking poll.
//!
//! - `spec` - Declarative command metadata and argument binding
//! - `registry` - Connector discovery and instantiation
//! - `builtin` - Connectors compiled into the shell

pub mod builtin;
pub mod registry;
pub mod spec;

pub use registry::{ConnectorDescriptor, ConnectorFactory, ConnectorRegistry, RegistryError};
pub use spec::{Args, CommandSpec, ParamKind, ParamSpec, UsageError, Value};

use crate::history::Message;
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by connector code.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("initialization failed: {0}")]
    Init(String),

    #[error("{0}")]
    Command(String),

    #[error("invalid setting '{key}': {reason}")]
    Settings { key: String, reason: String },

    #[error("unsupported command: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Usage(#[from] UsageError),
}

/// Collects what a command handler produced.
///
/// Sent messages are recorded in the history in the order the handler sent
/// them, right after the typed command that triggered them.
#[derive(Default)]
pub struct CommandContext {
    sent: Vec<Arc<dyn Message>>,
    output: Vec<String>,
}

impl CommandContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message transmitted by the handler.
    pub fn send(&mut self, message: impl Message + 'static) {
        self.sent.push(Arc::new(message));
    }

    /// Print a line for the operator.
    pub fn say(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    pub fn sent(&self) -> &[Arc<dyn Message>] {
        &self.sent
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub(crate) fn into_parts(self) -> (Vec<Arc<dyn Message>>, Vec<String>) {
        (self.sent, self.output)
    }
}

/// A protocol connector.
///
/// Only `commands` and `execute` are required. Everything else has a no-op
/// default.
pub trait Connector: Send {
    /// Commands this connector exposes, with their parameters.
    fn commands(&self) -> Vec<CommandSpec>;

    /// Called once after the connector is loaded, before any command runs.
    fn init(&mut self) -> Result<(), ConnectorError> {
        Ok(())
    }

    /// Called when the connector is replaced or the shell exits.
    fn cleanup(&mut self) {}

    /// Run one of the commands returned by [`Connector::commands`].
    fn execute(
        &mut self,
        command: &str,
        args: &Args,
        ctx: &mut CommandContext,
    ) -> Result<(), ConnectorError>;

    /// Return a received message if one is available.
    ///
    /// Must never block. The shell polls this after every command until it
    /// returns `None`.
    fn try_read(&mut self) -> Option<Arc<dyn Message>> {
        None
    }

    /// Write the test case header.
    fn write_test_case_header(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Write the test case footer.
    fn write_test_case_footer(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Extra text shown in the prompt after the connector name.
    fn status(&self) -> Option<String> {
        None
    }
}
