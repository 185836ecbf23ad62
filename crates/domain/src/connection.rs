//! Connection lifecycle of the controller socket.

use serde::{Deserialize, Serialize};

/// WebSocket close code for a normal, intentional closure.
pub const NORMAL_CLOSURE: u16 = 1000;

/// Close reason sent when the user logs out.
pub const LOGOUT_REASON: &str = "logging out";

/// Lifecycle state of the single controller connection.
///
/// Transitions only move forward:
/// `Disconnected → Connecting → Open → Closing → Closed`.
/// `Closed` is terminal for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Closing,
    Closed,
}

impl ConnectionState {
    /// Whether outbound frames may be sent.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => f.write_str("disconnected"),
            Self::Connecting => f.write_str("connecting"),
            Self::Open => f.write_str("open"),
            Self::Closing => f.write_str("closing"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

/// Code and reason of a close handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseFrame {
    pub code: u16,
    pub reason: String,
}

impl CloseFrame {
    #[must_use]
    pub fn new(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }

    /// The frame sent when the user logs out.
    #[must_use]
    pub fn logout() -> Self {
        Self::new(NORMAL_CLOSURE, LOGOUT_REASON)
    }
}
