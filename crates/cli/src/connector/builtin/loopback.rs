// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Loopback connector.
//!
//! Every datagram sent with `send` comes back as a received datagram on the
//! next poll. Useful for trying the shell and for exercising test case
//! generation without a network peer.

use crate::config::ConnectorSettings;
use crate::connector::{Args, CommandContext, CommandSpec, Connector, ConnectorError, ParamKind};
use crate::history::{Direction, Message};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;

/// Registry name.
pub const NAME: &str = "loopback";

/// Largest count accepted by `burst`.
pub const MAX_BURST: i64 = 10_000;

/// Python string literal for `text`.
///
/// Printable characters pass through. Control characters use the escapes
/// Python accepts (`\xNN`, `\uNNNN`, `\UNNNNNNNN`).
pub fn py_repr(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for c in text.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c.is_control() => {
                let code = u32::from(c);
                let escape = match code {
                    0..=0xff => format!("\\x{:02x}", code),
                    0x100..=0xffff => format!("\\u{:04x}", code),
                    _ => format!("\\U{:08x}", code),
                };
                literal.push_str(&escape);
            }
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// A text datagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Datagram {
    pub seq: u64,
    pub text: String,
}

impl Message for Datagram {
    fn summary(&self) -> String {
        format!("#{} {:?}", self.seq, self.text)
    }

    fn details(&self) -> String {
        format!(
            "datagram #{}\n  length: {} bytes\n  text:   {:?}",
            self.seq,
            self.text.len(),
            self.text
        )
    }

    fn to_test_case(&self, direction: Direction) -> String {
        match direction {
            Direction::Sent => format!("conn.send({})", py_repr(&self.text)),
            Direction::Received => format!("assert conn.recv() == {}", py_repr(&self.text)),
        }
    }
}

/// Connector that echoes everything it sends.
#[derive(Debug, Default)]
pub struct LoopbackConnector {
    prefix: String,
    holding: bool,
    queue: VecDeque<Datagram>,
    next_seq: u64,
}

impl LoopbackConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `[connectors.loopback]` table.
    ///
    /// Recognized keys: `prefix` (string prepended to echoed text).
    pub fn from_settings(settings: &ConnectorSettings) -> Result<Self, ConnectorError> {
        let mut connector = Self::new();
        for (key, value) in settings {
            match key.as_str() {
                "prefix" => {
                    connector.prefix = value
                        .as_str()
                        .ok_or_else(|| ConnectorError::Settings {
                            key: key.clone(),
                            reason: "expected a string".to_string(),
                        })?
                        .to_string();
                }
                _ => {
                    return Err(ConnectorError::Settings {
                        key: key.clone(),
                        reason: "unknown setting".to_string(),
                    })
                }
            }
        }
        Ok(connector)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn datagram(&mut self, text: String) -> Datagram {
        let datagram = Datagram {
            seq: self.next_seq,
            text,
        };
        self.next_seq += 1;
        datagram
    }
}

impl Connector for LoopbackConnector {
    fn commands(&self) -> Vec<CommandSpec> {
        vec![
            CommandSpec::new("send")
                .describe("Send a datagram and queue its echo")
                .param("text", ParamKind::Str)
                .optional("echo", ParamKind::Bool, Some("yes")),
            CommandSpec::new("burst")
                .describe("Queue COUNT received datagrams")
                .param("count", ParamKind::Int)
                .param("text", ParamKind::Str),
            CommandSpec::new("hold").describe("Keep received datagrams queued"),
            CommandSpec::new("release").describe("Deliver queued datagrams"),
            CommandSpec::new("drop").describe("Discard queued datagrams"),
            CommandSpec::new("pending").describe("Show the number of queued datagrams"),
        ]
    }

    fn init(&mut self) -> Result<(), ConnectorError> {
        tracing::debug!(prefix = %self.prefix, "loopback ready");
        Ok(())
    }

    fn cleanup(&mut self) {
        self.queue.clear();
        self.holding = false;
    }

    fn execute(
        &mut self,
        command: &str,
        args: &Args,
        ctx: &mut CommandContext,
    ) -> Result<(), ConnectorError> {
        match command {
            "send" => {
                let text = args.str("text")?.to_string();
                let sent = self.datagram(text.clone());
                ctx.send(sent);
                if args.bool("echo")? {
                    let echo = self.datagram(format!("{}{}", self.prefix, text));
                    self.queue.push_back(echo);
                }
            }
            "burst" => {
                let count = args.int("count")?;
                if !(0..=MAX_BURST).contains(&count) {
                    return Err(ConnectorError::Command(format!(
                        "count must be between 0 and {}",
                        MAX_BURST
                    )));
                }
                let text = args.str("text")?;
                for i in 1..=count {
                    let datagram = self.datagram(format!("{} {}", text, i));
                    self.queue.push_back(datagram);
                }
            }
            "hold" => {
                self.holding = true;
                ctx.say("holding received datagrams");
            }
            "release" => {
                self.holding = false;
                ctx.say(format!("releasing {} datagram(s)", self.queue.len()));
            }
            "drop" => {
                let dropped = self.queue.len();
                self.queue.clear();
                ctx.say(format!("dropped {} datagram(s)", dropped));
            }
            "pending" => {
                ctx.say(format!("{} datagram(s) pending", self.queue.len()));
            }
            other => return Err(ConnectorError::Unsupported(other.to_string())),
        }
        Ok(())
    }

    fn try_read(&mut self) -> Option<Arc<dyn Message>> {
        if self.holding {
            return None;
        }
        self.queue
            .pop_front()
            .map(|datagram| Arc::new(datagram) as Arc<dyn Message>)
    }

    fn write_test_case_header(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "import loopback")?;
        writeln!(out)?;
        writeln!(out, "conn = loopback.connect(prefix={})", py_repr(&self.prefix))?;
        writeln!(out)
    }

    fn write_test_case_footer(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "conn.close()")
    }

    fn status(&self) -> Option<String> {
        self.holding
            .then(|| format!("(holding {})", self.queue.len()))
    }
}

#[cfg(test)]
#[path = "loopback_tests.rs"]
mod tests;
