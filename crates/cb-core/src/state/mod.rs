//! Connection health and task identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a connection health probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionState {
    Connected,
    Error,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        *self == Self::Connected
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => f.write_str("STATE_CONNECTED"),
            Self::Error => f.write_str("STATE_ERROR"),
        }
    }
}

/// Task a connection performs. Blockchain connectors expose no specific task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Task {
    #[default]
    Unspecified,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => f.write_str("TASK_UNSPECIFIED"),
        }
    }
}
