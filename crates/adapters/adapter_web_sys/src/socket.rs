//! WebSocket transport.
//!
//! Browser callbacks are turned into [`TransportEvent`]s and pushed onto an
//! unbounded channel; the page task drains it into the gauge client.

use std::cell::RefCell;

use tokio::sync::mpsc::UnboundedSender;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};
use wxgauges_app::ports::{Transport, TransportEvent};
use wxgauges_domain::connection::CloseFrame;
use wxgauges_domain::error::GaugeError;

use crate::error::WebError;

/// Handlers attached to the live socket. They must outlive its callbacks.
struct Callbacks {
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

struct Live {
    socket: WebSocket,
    _callbacks: Callbacks,
}

/// [`Transport`] over the browser `WebSocket` API.
pub struct WebSocketTransport {
    events: UnboundedSender<TransportEvent>,
    live: RefCell<Option<Live>>,
}

impl WebSocketTransport {
    #[must_use]
    pub fn new(events: UnboundedSender<TransportEvent>) -> Self {
        Self {
            events,
            live: RefCell::new(None),
        }
    }

    fn forward(events: &UnboundedSender<TransportEvent>, event: TransportEvent) {
        if events.send(event).is_err() {
            tracing::debug!("page task gone, dropping socket event");
        }
    }

    fn attach(&self, socket: &WebSocket) -> Callbacks {
        let events = self.events.clone();
        let on_open = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            Self::forward(&events, TransportEvent::Opened);
        });
        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let events = self.events.clone();
        let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |msg: MessageEvent| {
            if let Some(text) = msg.data().as_string() {
                Self::forward(&events, TransportEvent::Message(text));
            } else {
                tracing::debug!("ignoring non-text frame");
            }
        });
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let events = self.events.clone();
        let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
            let frame = CloseFrame::new(ev.code(), ev.reason());
            Self::forward(&events, TransportEvent::Closed(frame));
        });
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        // The browser never says why; the event type is all there is.
        let events = self.events.clone();
        let on_error = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
            let message = format!("websocket {}", ev.type_());
            Self::forward(&events, TransportEvent::Error(message));
        });
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Callbacks {
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        }
    }

    fn with_socket<R>(
        &self,
        f: impl FnOnce(&WebSocket) -> Result<R, wasm_bindgen::JsValue>,
    ) -> Result<R, GaugeError> {
        let live = self.live.borrow();
        let live = live.as_ref().ok_or(WebError::NoSocket)?;
        Ok(f(&live.socket).map_err(|err| WebError::js(&err))?)
    }
}

fn detach(socket: &WebSocket) {
    socket.set_onopen(None);
    socket.set_onmessage(None);
    socket.set_onclose(None);
    socket.set_onerror(None);
}

impl Transport for WebSocketTransport {
    fn open(&self, url: &str) -> Result<(), GaugeError> {
        let socket = WebSocket::new(url).map_err(|err| WebError::js(&err))?;
        let callbacks = self.attach(&socket);
        if let Some(previous) = self.live.replace(Some(Live {
            socket,
            _callbacks: callbacks,
        })) {
            detach(&previous.socket);
        }
        tracing::debug!(%url, "websocket created");
        Ok(())
    }

    fn send_text(&self, text: &str) -> Result<(), GaugeError> {
        self.with_socket(|socket| socket.send_with_str(text))
    }

    fn close(&self, frame: &CloseFrame) -> Result<(), GaugeError> {
        self.with_socket(|socket| socket.close_with_code_and_reason(frame.code, &frame.reason))
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        if let Some(live) = self.live.get_mut().take() {
            detach(&live.socket);
            let _ = live.socket.close();
        }
    }
}
