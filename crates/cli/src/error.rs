// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Errors reported by the dispatch loop.
//!
//! None of these end the shell. The front end prints them and prompts again.

use crate::connector::{ConnectorError, RegistryError, UsageError};
use crate::export::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("unknown connector: {0}")]
    UnknownConnector(String),

    #[error("cannot load connector '{name}': {source}")]
    ConnectorLoad {
        name: String,
        #[source]
        source: ConnectorError,
    },

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{source}\nusage: {usage}")]
    Usage {
        usage: String,
        #[source]
        source: UsageError,
    },

    #[error(transparent)]
    Parse(UsageError),

    #[error("{command}: {source}")]
    Connector {
        command: String,
        #[source]
        source: ConnectorError,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<RegistryError> for ShellError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::UnknownConnector(name) => Self::UnknownConnector(name),
            RegistryError::Load { name, source } => Self::ConnectorLoad { name, source },
        }
    }
}
