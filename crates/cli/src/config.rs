// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell configuration loaded from a TOML file and the command line.
//!
//! ```toml
//! default_connector = "loopback"
//! save_path = "/tmp/case.py"
//!
//! [connectors.loopback]
//! prefix = "echo: "
//! ```

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the default `/save` destination inside the temp directory.
pub const DEFAULT_SAVE_FILE: &str = "nsh-save";
/// File name of the default line-editing history inside the home directory.
pub const DEFAULT_HISTORY_FILE: &str = ".nsh_history";

/// Per-connector settings table, handed to the connector factory.
pub type ConnectorSettings = toml::Table;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level shell configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Connector loaded at startup when none is given on the command line
    #[serde(default)]
    pub default_connector: Option<String>,

    /// Default `/save` destination (default: `<temp dir>/nsh-save`)
    #[serde(default)]
    pub save_path: Option<PathBuf>,

    /// Line-editing history file (default: `~/.nsh_history`)
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// JSONL journal of the interaction history
    #[serde(default)]
    pub journal: Option<PathBuf>,

    /// Settings tables keyed by connector name
    #[serde(default)]
    pub connectors: BTreeMap<String, ConnectorSettings>,
}

impl ShellConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the effective configuration for a command line.
    ///
    /// The file comes from `--config` or `NSH_CONFIG`; flags override its
    /// values.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match cli.config.clone().or_else(crate::env::config_path) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };

        if cli.connector.is_some() {
            config.default_connector = cli.connector.clone();
        }
        if cli.save_path.is_some() {
            config.save_path = cli.save_path.clone();
        }
        if let Some(path) = cli.history_file.clone().or_else(crate::env::history_file) {
            config.history_file = Some(path);
        }
        if cli.journal.is_some() {
            config.journal = cli.journal.clone();
        }
        Ok(config)
    }

    /// Effective default `/save` destination.
    pub fn save_path(&self) -> PathBuf {
        self.save_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_SAVE_FILE))
    }

    /// Effective line-editing history file, if a home directory is known.
    pub fn history_file(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(DEFAULT_HISTORY_FILE)))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
