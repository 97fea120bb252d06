// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! History entry type.

use crate::message::{Direction, Message};
use std::fmt;
use std::sync::Arc;

/// One event in the conversation log.
///
/// New kinds of events may be added later, so code outside this crate has to
/// handle entries it does not recognize.
#[derive(Clone)]
#[non_exhaustive]
pub enum HistoryEntry {
    /// Literal text the operator entered for a connector command.
    TypedCommand { raw: String },
    /// A message the active connector transmitted.
    Sent { message: Arc<dyn Message> },
    /// A message surfaced by the receive drain.
    Received { message: Arc<dyn Message> },
}

impl HistoryEntry {
    pub fn typed_command(raw: impl Into<String>) -> Self {
        Self::TypedCommand { raw: raw.into() }
    }

    pub fn sent(message: Arc<dyn Message>) -> Self {
        Self::Sent { message }
    }

    pub fn received(message: Arc<dyn Message>) -> Self {
        Self::Received { message }
    }

    /// Direction of a message entry, `None` for typed commands.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::TypedCommand { .. } => None,
            Self::Sent { .. } => Some(Direction::Sent),
            Self::Received { .. } => Some(Direction::Received),
        }
    }

    /// The message carried by a sent or received entry.
    pub fn message(&self) -> Option<&Arc<dyn Message>> {
        match self {
            Self::TypedCommand { .. } => None,
            Self::Sent { message } | Self::Received { message } => Some(message),
        }
    }

    /// Stable lowercase tag for this entry kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TypedCommand { .. } => "command",
            Self::Sent { .. } => Direction::Sent.as_str(),
            Self::Received { .. } => Direction::Received.as_str(),
        }
    }

    /// Raw command text or message summary.
    pub fn text(&self) -> String {
        match self {
            Self::TypedCommand { raw } => raw.clone(),
            Self::Sent { message } | Self::Received { message } => message.summary(),
        }
    }
}

impl fmt::Debug for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypedCommand { raw } => f.debug_struct("TypedCommand").field("raw", raw).finish(),
            Self::Sent { message } => f
                .debug_struct("Sent")
                .field("summary", &message.summary())
                .finish(),
            Self::Received { message } => f
                .debug_struct("Received")
                .field("summary", &message.summary())
                .finish(),
        }
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
