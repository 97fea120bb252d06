// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Test doubles shared by unit tests.

use crate::connector::{
    Args, CommandContext, CommandSpec, Connector, ConnectorError, ConnectorRegistry, ParamKind,
};
use crate::history::{Direction, Message};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Plain text message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Text(pub String);

impl Message for Text {
    fn summary(&self) -> String {
        self.0.clone()
    }

    fn details(&self) -> String {
        format!("text: {}", self.0)
    }

    fn to_test_case(&self, direction: Direction) -> String {
        match direction {
            Direction::Sent => format!("send({:?})", self.0),
            Direction::Received => format!("expect({:?})", self.0),
        }
    }
}

pub(crate) fn text(s: &str) -> Arc<dyn Message> {
    Arc::new(Text(s.to_string()))
}

/// Shared record of connector lifecycle calls and polls.
#[derive(Clone, Default)]
pub(crate) struct Probe {
    events: Arc<Mutex<Vec<String>>>,
    polls: Arc<Mutex<usize>>,
}

impl Probe {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn polls(&self) -> usize {
        *self.polls.lock().unwrap()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn poll(&self) {
        *self.polls.lock().unwrap() += 1;
    }
}

/// Connector driven entirely by its commands.
///
/// - `ping` sends `ping` and queues a received `pong`
/// - `push <count>` queues `r1..=rN`
/// - `send <text>` sends `text`
/// - `fail` sends `partial` then errors
/// - `say <text>` prints `text`
/// - `<label>-only` does nothing
/// - `load` sends `connector load`
pub(crate) struct ScriptedConnector {
    label: String,
    probe: Probe,
    inbox: VecDeque<Arc<dyn Message>>,
    fail_init: bool,
    status: Option<String>,
}

impl ScriptedConnector {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            probe: Probe::default(),
            inbox: VecDeque::new(),
            fail_init: false,
            status: None,
        }
    }

    pub(crate) fn with_probe(mut self, probe: Probe) -> Self {
        self.probe = probe;
        self
    }

    pub(crate) fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub(crate) fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub(crate) fn boxed(self) -> Box<dyn Connector> {
        Box::new(self)
    }
}

impl Connector for ScriptedConnector {
    fn commands(&self) -> Vec<CommandSpec> {
        vec![
            CommandSpec::new("ping").describe("Send a ping"),
            CommandSpec::new("push")
                .describe("Queue received messages")
                .param("count", ParamKind::Int),
            CommandSpec::new("send")
                .describe("Send text")
                .param("text", ParamKind::Str),
            CommandSpec::new("fail").describe("Send then fail"),
            CommandSpec::new("say")
                .describe("Print text")
                .param("text", ParamKind::Str),
            CommandSpec::new(format!("{}-only", self.label)),
            CommandSpec::new("load").describe("Shadowed by the meta command"),
        ]
    }

    fn init(&mut self) -> Result<(), ConnectorError> {
        self.probe.push(format!("{}:init", self.label));
        if self.fail_init {
            return Err(ConnectorError::Init("refused".to_string()));
        }
        Ok(())
    }

    fn cleanup(&mut self) {
        self.probe.push(format!("{}:cleanup", self.label));
    }

    fn execute(
        &mut self,
        command: &str,
        args: &Args,
        ctx: &mut CommandContext,
    ) -> Result<(), ConnectorError> {
        self.probe.push(format!("{}:{}", self.label, command));
        match command {
            "ping" => {
                ctx.send(Text("ping".to_string()));
                self.inbox.push_back(text("pong"));
            }
            "push" => {
                for i in 1..=args.int("count")? {
                    self.inbox.push_back(text(&format!("r{}", i)));
                }
            }
            "send" => ctx.send(Text(args.str("text")?.to_string())),
            "fail" => {
                ctx.send(Text("partial".to_string()));
                return Err(ConnectorError::Command("boom".to_string()));
            }
            "say" => ctx.say(args.str("text")?),
            "load" => ctx.send(Text("connector load".to_string())),
            _ => {}
        }
        Ok(())
    }

    fn try_read(&mut self) -> Option<Arc<dyn Message>> {
        self.probe.poll();
        self.inbox.pop_front()
    }

    fn write_test_case_header(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "# {} init", self.label)
    }

    fn write_test_case_footer(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "# {} done", self.label)
    }

    fn status(&self) -> Option<String> {
        self.status.clone()
    }
}

/// Registry with `alpha`, `beta`, a `frozen` connector whose init fails, and
/// a `broken` connector that cannot be constructed.
pub(crate) fn registry_with(probe: &Probe) -> ConnectorRegistry {
    let alpha = probe.clone();
    let beta = probe.clone();
    let frozen = probe.clone();
    ConnectorRegistry::new()
        .with_connector("alpha", move |_: &_| {
            Ok(ScriptedConnector::new("alpha").with_probe(alpha.clone()).boxed())
        })
        .with_connector("beta", move |_: &_| {
            Ok(ScriptedConnector::new("beta")
                .with_probe(beta.clone())
                .with_status("(ready)")
                .boxed())
        })
        .with_connector("frozen", move |_: &_| {
            Ok(ScriptedConnector::new("frozen")
                .with_probe(frozen.clone())
                .failing_init()
                .boxed())
        })
        .with_connector("broken", |_: &_| {
            Err(ConnectorError::Init("no device".to_string()))
        })
}
