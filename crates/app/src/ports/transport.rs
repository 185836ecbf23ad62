//! Transport port: the single WebSocket to the gauge controller.

use std::rc::Rc;

use wxgauges_domain::connection::CloseFrame;
use wxgauges_domain::error::GaugeError;

/// Something that happened on the socket, delivered back to the client.
///
/// Adapters push these into a channel instead of calling the client from
/// inside their own callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The handshake completed.
    Opened,
    /// A text frame arrived.
    Message(String),
    /// The socket is closed (after our close, or dropped by the peer).
    Closed(CloseFrame),
    /// The browser reported a socket error. A `Closed` event follows.
    Error(String),
}

/// Outbound half of the controller connection.
pub trait Transport {
    /// Start connecting to `url`. Completion is signalled by [`TransportEvent::Opened`].
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Transport`] if the socket cannot be created.
    fn open(&self, url: &str) -> Result<(), GaugeError>;

    /// Send one text frame.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Transport`] if the socket rejects the frame.
    fn send_text(&self, text: &str) -> Result<(), GaugeError>;

    /// Start the close handshake. Completion is signalled by [`TransportEvent::Closed`].
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Transport`] if the socket rejects the request.
    fn close(&self, frame: &CloseFrame) -> Result<(), GaugeError>;
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    fn open(&self, url: &str) -> Result<(), GaugeError> {
        (**self).open(url)
    }

    fn send_text(&self, text: &str) -> Result<(), GaugeError> {
        (**self).send_text(text)
    }

    fn close(&self, frame: &CloseFrame) -> Result<(), GaugeError> {
        (**self).close(frame)
    }
}
