// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connector registry.
//!
//! Connectors are linked into the binary and registered by name together with
//! a factory. Each factory receives the connector's own settings table from
//! the configuration file.

use super::{CommandSpec, Connector, ConnectorError};
use crate::config::ConnectorSettings;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors resolving a connector by name
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown connector: {0}")]
    UnknownConnector(String),

    #[error("cannot load connector '{name}': {source}")]
    Load {
        name: String,
        #[source]
        source: ConnectorError,
    },
}

/// Builds a fresh connector instance from its settings.
pub type ConnectorFactory =
    Box<dyn Fn(&ConnectorSettings) -> Result<Box<dyn Connector>, ConnectorError> + Send + Sync>;

/// A freshly instantiated connector, not yet initialized.
pub struct ConnectorDescriptor {
    pub name: String,
    pub commands: Vec<CommandSpec>,
    pub connector: Box<dyn Connector>,
}

impl fmt::Debug for ConnectorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorDescriptor")
            .field("name", &self.name)
            .field("commands", &self.commands)
            .finish_non_exhaustive()
    }
}

/// Registry of installable connectors.
#[derive(Default)]
pub struct ConnectorRegistry {
    factories: BTreeMap<String, ConnectorFactory>,
    settings: BTreeMap<String, ConnectorSettings>,
}

impl ConnectorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in connector
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::builtin::register_all(&mut registry);
        registry
    }

    /// Register a connector factory, replacing any previous one with that name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&ConnectorSettings) -> Result<Box<dyn Connector>, ConnectorError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
            tracing::debug!(connector = %name, "replaced connector factory");
        }
        self
    }

    /// Builder form of [`ConnectorRegistry::register`]
    pub fn with_connector<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&ConnectorSettings) -> Result<Box<dyn Connector>, ConnectorError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Attach per-connector settings tables
    pub fn with_settings(mut self, settings: BTreeMap<String, ConnectorSettings>) -> Self {
        self.settings = settings;
        self
    }

    /// Registered names, whether or not they construct successfully
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Names of connectors that can actually be instantiated.
    ///
    /// Every factory is probed with its settings. A connector that fails to
    /// construct is left out and the reason is logged.
    pub fn list(&self) -> Vec<String> {
        self.factories
            .iter()
            .filter_map(|(name, factory)| match factory(&self.settings_for(name)) {
                Ok(_) => Some(name.clone()),
                Err(e) => {
                    tracing::warn!(connector = %name, error = %e, "skipping connector");
                    None
                }
            })
            .collect()
    }

    /// Instantiate the named connector.
    pub fn load(&self, name: &str) -> Result<ConnectorDescriptor, RegistryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::UnknownConnector(name.to_string()))?;

        let connector = factory(&self.settings_for(name)).map_err(|source| RegistryError::Load {
            name: name.to_string(),
            source,
        })?;

        Ok(ConnectorDescriptor {
            name: name.to_string(),
            commands: connector.commands(),
            connector,
        })
    }

    fn settings_for(&self, name: &str) -> ConnectorSettings {
        self.settings.get(name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
