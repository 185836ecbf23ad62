//! Common error types used across the workspace.
//!
//! Each failure has a typed variant with a typed source. Adapters wrap their
//! own failures into [`GaugeError::Transport`].

use std::error::Error as _;

use crate::connection::ConnectionState;

/// Base error for every client operation.
#[derive(Debug, thiserror::Error)]
pub enum GaugeError {
    /// A tab panel or DOM element addressed by id does not exist.
    #[error("element not found")]
    NotFound(#[from] NotFoundError),

    /// An inbound frame was not a valid envelope.
    #[error("failed to parse inbound message")]
    Parse(#[source] serde_json::Error),

    /// An outbound envelope could not be serialized.
    #[error("failed to encode outbound message")]
    Encode(#[source] serde_json::Error),

    /// A send was attempted while the connection was not open.
    #[error("cannot send while connection is {state}")]
    SendOnClosed { state: ConnectionState },

    /// A lifecycle operation was requested from a state that does not allow it.
    #[error("cannot {action} while connection is {state}")]
    InvalidTransition {
        action: &'static str,
        state: ConnectionState,
    },

    /// A form value failed validation before being sent.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The underlying browser API (socket, DOM, location, HTTP) failed.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error>),
}

impl GaugeError {
    /// Render the error and all of its sources as a single line.
    #[must_use]
    pub fn chain(&self) -> String {
        let mut text = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            text.push_str(": ");
            text.push_str(&err.to_string());
            source = err.source();
        }
        text
    }
}

/// Lookup of an element that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} `{id}` not found")]
pub struct NotFoundError {
    /// What was being looked up (`"tab"`, `"element"`, `"field"`).
    pub kind: &'static str,
    /// The id that was requested.
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn new(kind: &'static str, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Payload invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A credential field that must be filled in was empty.
    #[error("`{field}` must not be empty")]
    EmptyField { field: &'static str },

    /// A credential field does not fit the controller's storage.
    #[error("`{field}` must be at most {max} bytes")]
    TooLong { field: &'static str, max: usize },

    /// A numeric field did not hold a finite number.
    #[error("`{field}` is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_found_with_kind_and_id() {
        let err = NotFoundError::new("tab", "wifi_tab");
        assert_eq!(err.to_string(), "tab `wifi_tab` not found");
    }

    #[test]
    fn should_display_send_on_closed_with_state() {
        let err = GaugeError::SendOnClosed {
            state: ConnectionState::Connecting,
        };
        assert_eq!(
            err.to_string(),
            "cannot send while connection is connecting"
        );
    }

    #[test]
    fn should_include_sources_in_chain() {
        let err: GaugeError = ValidationError::EmptyField { field: "ssid" }.into();
        assert_eq!(err.chain(), "validation error: `ssid` must not be empty");
    }

    #[test]
    fn should_convert_not_found_into_gauge_error() {
        let err: GaugeError = NotFoundError::new("element", "uptime").into();
        assert!(matches!(err, GaugeError::NotFound(ref inner) if inner.id == "uptime"));
    }
}
