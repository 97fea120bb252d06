// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectors compiled into the shell.
//!
//! - `loopback` - Echoes sent datagrams back as received ones

pub mod loopback;

pub use loopback::{Datagram, LoopbackConnector};

use super::{Connector, ConnectorRegistry};
use crate::config::ConnectorSettings;

/// Register every built-in connector.
pub(crate) fn register_all(registry: &mut ConnectorRegistry) {
    registry.register(loopback::NAME, |settings: &ConnectorSettings| {
        Ok(Box::new(LoopbackConnector::from_settings(settings)?) as Box<dyn Connector>)
    });
}
