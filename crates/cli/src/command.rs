// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command table for the dispatch loop.
//!
//! Meta-commands start with `/` and are always available. Everything else is
//! looked up among the active connector's commands. The table is rebuilt from
//! scratch on every successful load, so commands of a previously loaded
//! connector never linger.

use crate::connector::{CommandSpec, ParamKind, UsageError};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

/// Leading character that marks a meta-command.
pub const META_SENTINEL: char = '/';

/// Core operations available regardless of the active connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetaCommand {
    Load,
    Reset,
    Save,
    Details,
    Help,
    Connectors,
    Exit,
}

impl MetaCommand {
    /// All meta-commands, in help order.
    pub const ALL: [MetaCommand; 7] = [
        Self::Load,
        Self::Reset,
        Self::Save,
        Self::Details,
        Self::Help,
        Self::Connectors,
        Self::Exit,
    ];

    /// Name without the leading sentinel.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Reset => "reset",
            Self::Save => "save",
            Self::Details => "details",
            Self::Help => "help",
            Self::Connectors => "connectors",
            Self::Exit => "exit",
        }
    }

    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Load => &["mod"],
            Self::Exit => &["quit"],
            _ => &[],
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Load => "Load a connector, replacing the active one",
            Self::Reset => "Clear the history",
            Self::Save => "Write the history as a test case",
            Self::Details => "Show details of the N-th most recent message",
            Self::Help => "List available commands",
            Self::Connectors => "List available connectors",
            Self::Exit => "Leave the shell",
        }
    }

    /// Full name with the leading sentinel, e.g. `/load`.
    pub fn full_name(&self) -> String {
        format!("{}{}", META_SENTINEL, self.name())
    }

    /// Parameter metadata used for binding and help.
    pub fn spec(&self) -> CommandSpec {
        let spec = CommandSpec::new(self.full_name()).describe(self.description());
        match self {
            Self::Load => spec.param("name", ParamKind::Str),
            Self::Save => spec.optional("path", ParamKind::Str, None),
            Self::Details => spec.optional("n", ParamKind::Int, Some("1")),
            _ => spec,
        }
    }
}

/// What a command name resolves to.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Meta(MetaCommand),
    Connector(CommandSpec),
}

impl Binding {
    pub fn spec(&self) -> CommandSpec {
        match self {
            Self::Meta(meta) => meta.spec(),
            Self::Connector(spec) => spec.clone(),
        }
    }
}

/// Name to binding map.
#[derive(Clone, Debug)]
pub struct CommandTable {
    bindings: BTreeMap<String, Binding>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::core()
    }
}

impl CommandTable {
    /// Table holding only the meta-commands and their aliases.
    pub fn core() -> Self {
        let mut bindings = BTreeMap::new();
        for meta in MetaCommand::ALL {
            bindings.insert(meta.full_name(), Binding::Meta(meta));
            for alias in meta.aliases() {
                bindings.insert(format!("{}{}", META_SENTINEL, alias), Binding::Meta(meta));
            }
        }
        Self { bindings }
    }

    /// Meta-commands plus a connector's commands.
    ///
    /// Meta-commands always win. Connector commands with an empty name, a
    /// name starting with the sentinel, or whitespace in the name are left
    /// out with a warning, as are duplicates after the first.
    pub fn compose(connector: &[CommandSpec]) -> Self {
        let mut table = Self::core();
        for spec in connector {
            let name = spec.name.as_str();
            if name.is_empty()
                || name.starts_with(META_SENTINEL)
                || name.chars().any(char::is_whitespace)
            {
                tracing::warn!(command = %name, "ignoring connector command with reserved name");
                continue;
            }
            match table.bindings.entry(name.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(Binding::Connector(spec.clone()));
                }
                Entry::Occupied(_) => {
                    tracing::warn!(command = %name, "ignoring duplicate connector command");
                }
            }
        }
        table
    }

    pub fn resolve(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Every name that resolves, aliases included, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.bindings.keys().map(String::as_str).collect()
    }

    /// Connector commands, sorted by name.
    pub fn connector_commands(&self) -> impl Iterator<Item = &CommandSpec> + '_ {
        self.bindings.values().filter_map(|binding| match binding {
            Binding::Connector(spec) => Some(spec),
            Binding::Meta(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Split an input line into words using shell quoting rules.
pub fn split_line(line: &str) -> Result<Vec<String>, UsageError> {
    shlex::split(line).ok_or_else(|| UsageError::Quoting(line.trim().to_string()))
}
