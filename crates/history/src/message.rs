// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Message capability shared by every connector.

use std::fmt;

/// Which way a message travelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Transmitted by the active connector as a result of a command.
    Sent,
    /// Surfaced by the connector's receive poll.
    Received,
}

impl Direction {
    /// Stable lowercase tag, used in journals.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => f.write_str("Sent"),
            Self::Received => f.write_str("Received"),
        }
    }
}

/// A message sent to or received from the network.
///
/// Produced by a connector and stored in the history for later inspection or
/// to generate a test case from its contents. History entries only ever hold
/// shared references; a message is never mutated once recorded.
pub trait Message: Send + Sync {
    /// Brief description, preferably no longer than a single line.
    fn summary(&self) -> String;

    /// Detailed, possibly multi-line description shown by `/details`.
    fn details(&self) -> String;

    /// Test case fragment for this message.
    ///
    /// `direction` tells whether the message was sent or received, so a
    /// connector can render a send call for one and an assertion for the
    /// other.
    fn to_test_case(&self, direction: Direction) -> String;
}
