//! Browser adapter error types.

use wasm_bindgen::JsValue;
use wxgauges_domain::error::GaugeError;

/// Errors raised by the browser bindings.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Not running inside a window (e.g. a worker).
    #[error("no global window")]
    NoWindow,

    /// The window has no document attached.
    #[error("window has no document")]
    NoDocument,

    /// A frame was sent before the socket was created.
    #[error("socket not created")]
    NoSocket,

    /// A browser API threw.
    #[error("browser call failed: {0}")]
    Js(String),
}

impl WebError {
    /// Capture a thrown JavaScript value.
    pub fn js(value: &JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for GaugeError {
    fn from(err: WebError) -> Self {
        GaugeError::Transport(Box::new(err))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_missing_socket() {
        assert_eq!(WebError::NoSocket.to_string(), "socket not created");
    }

    #[test]
    fn should_wrap_into_transport_error() {
        let err: GaugeError = WebError::NoDocument.into();
        assert_eq!(err.chain(), "transport error: window has no document");
    }
}
