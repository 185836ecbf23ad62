//! Gauge client: owns the controller connection and everything sent over it.
//!
//! The connection moves through
//! `Disconnected → Connecting → Open → Closing → Closed`; `Closed` is terminal
//! and no reconnect is attempted. Send controls on the page are disabled
//! whenever the connection is not `Open`.

use std::cell::{Cell, RefCell};

use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use wxgauges_domain::connection::{CloseFrame, ConnectionState};
use wxgauges_domain::envelope::{InboundEnvelope, OutboundEnvelope};
use wxgauges_domain::error::GaugeError;
use wxgauges_domain::status::StatusReport;

use crate::config::UiConfig;
use crate::ports::{Document, Transport, TransportEvent};
use crate::services::report::ErrorReporter;
use crate::services::settings_form::{
    read_login_settings, read_system_settings, read_wifi_settings,
};

type OpenHook = Box<dyn Fn()>;
type CloseHook = Box<dyn Fn(&CloseFrame)>;
type ErrorHook = Box<dyn Fn(&str)>;

/// Optional observers of connection lifecycle events.
#[derive(Default)]
pub struct ConnectionHooks {
    on_open: Option<OpenHook>,
    on_close: Option<CloseHook>,
    on_error: Option<ErrorHook>,
}

impl ConnectionHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `hook` once the connection is open.
    #[must_use]
    pub fn on_open(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_open = Some(Box::new(hook));
        self
    }

    /// Run `hook` once the connection is closed, for whatever reason.
    #[must_use]
    pub fn on_close(mut self, hook: impl Fn(&CloseFrame) + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    /// Run `hook` on every socket error.
    #[must_use]
    pub fn on_error(mut self, hook: impl Fn(&str) + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }
}

enum AckState {
    Settled(Option<CloseFrame>),
    Pending(oneshot::Receiver<CloseFrame>),
}

/// Completion signal of a close request.
pub struct CloseAck(AckState);

impl CloseAck {
    /// Whether the connection was already closed when the request was made.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self.0, AckState::Settled(_))
    }

    /// Wait for the transport to report the connection closed.
    ///
    /// Yields the close frame, or `None` if it is unknown (never connected,
    /// or the client was dropped first).
    pub async fn wait(self) -> Option<CloseFrame> {
        match self.0 {
            AckState::Settled(frame) => frame,
            AckState::Pending(rx) => rx.await.ok(),
        }
    }
}

/// What an inbound message did to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Wire type of the message.
    pub kind: &'static str,
    /// Elements whose text was replaced.
    pub applied: usize,
    /// Reported ids with no matching element.
    pub missing: Vec<String>,
}

impl DispatchOutcome {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            applied: 0,
            missing: Vec::new(),
        }
    }
}

/// Client of the gauge controller WebSocket.
pub struct GaugeClient<T, D> {
    transport: T,
    document: D,
    send_control_class: String,
    reporter: ErrorReporter,
    hooks: ConnectionHooks,
    state: Cell<ConnectionState>,
    last_close: RefCell<Option<CloseFrame>>,
    close_waiters: RefCell<Vec<oneshot::Sender<CloseFrame>>>,
}

impl<T: Transport, D: Document> GaugeClient<T, D> {
    /// Create a disconnected client. Send controls start out disabled.
    pub fn new(transport: T, document: D, ui: &UiConfig) -> Self {
        let client = Self {
            transport,
            document,
            send_control_class: ui.send_control_class.clone(),
            reporter: ErrorReporter::new(ui.error_element_id.clone()),
            hooks: ConnectionHooks::default(),
            state: Cell::new(ConnectionState::Disconnected),
            last_close: RefCell::new(None),
            close_waiters: RefCell::new(Vec::new()),
        };
        let touched = client
            .document
            .set_class_disabled(&client.send_control_class, true);
        debug!(touched, "send controls disabled until connected");
        client
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: ConnectionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Report a failed `operation` through the client's reporter.
    pub fn report(&self, operation: &'static str, err: &GaugeError) {
        self.reporter.report(&self.document, operation, err);
    }

    fn set_state(&self, next: ConnectionState) {
        let prev = self.state.replace(next);
        if prev == next {
            return;
        }
        info!(from = %prev, to = %next, "connection state changed");
        let touched = self
            .document
            .set_class_disabled(&self.send_control_class, !next.is_open());
        debug!(touched, enabled = next.is_open(), "send controls updated");
    }

    /// Open the one and only controller connection.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::InvalidTransition`] unless the client is
    /// `Disconnected`, or the transport error if the socket cannot be
    /// created (the client is then `Closed`).
    pub fn connect(&self, url: &str) -> Result<(), GaugeError> {
        let state = self.state.get();
        if state != ConnectionState::Disconnected {
            return Err(GaugeError::InvalidTransition {
                action: "connect",
                state,
            });
        }
        info!(url, "opening controller connection");
        self.set_state(ConnectionState::Connecting);
        if let Err(err) = self.transport.open(url) {
            self.set_state(ConnectionState::Closed);
            return Err(err);
        }
        Ok(())
    }

    /// Apply one transport event, reporting any failure.
    pub fn handle_event(&self, event: TransportEvent) {
        match event {
            TransportEvent::Opened => self.on_open(),
            TransportEvent::Message(raw) => {
                if let Err(err) = self.on_message(&raw) {
                    self.report("receive message", &err);
                }
            }
            TransportEvent::Closed(frame) => self.on_close(frame),
            TransportEvent::Error(message) => self.on_error(&message),
        }
    }

    /// The handshake completed.
    pub fn on_open(&self) {
        let state = self.state.get();
        if state != ConnectionState::Connecting {
            warn!(%state, "ignoring open event");
            return;
        }
        self.set_state(ConnectionState::Open);
        if let Some(hook) = &self.hooks.on_open {
            hook();
        }
    }

    /// Parse an inbound frame and render it.
    ///
    /// Nothing on the page changes unless the whole frame parses.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Parse`] for a malformed frame.
    pub fn on_message(&self, raw: &str) -> Result<DispatchOutcome, GaugeError> {
        let envelope = InboundEnvelope::parse(raw)?;
        let outcome = match &envelope {
            InboundEnvelope::StatusWeather { status } => self.render_weather(status),
            InboundEnvelope::StatusSystem { status } => self.render_system(status),
            InboundEnvelope::Unrecognized => DispatchOutcome::new(envelope.kind()),
        };
        debug!(
            kind = outcome.kind,
            applied = outcome.applied,
            missing = outcome.missing.len(),
            "inbound message dispatched"
        );
        Ok(outcome)
    }

    fn render_weather(&self, status: &StatusReport) -> DispatchOutcome {
        self.render_status("status_weather", status)
    }

    fn render_system(&self, status: &StatusReport) -> DispatchOutcome {
        self.render_status("status_system", status)
    }

    fn render_status(&self, kind: &'static str, status: &StatusReport) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::new(kind);
        for (id, text) in status.entries() {
            match self.document.set_text(id, &text) {
                Ok(()) => outcome.applied += 1,
                Err(GaugeError::NotFound(_)) => outcome.missing.push(id.to_string()),
                Err(err) => self.report("render status", &err),
            }
        }
        if !outcome.missing.is_empty() {
            debug!(kind, missing = ?outcome.missing, "status ids without elements");
        }
        outcome
    }

    /// The socket is closed; wake everyone waiting for it.
    pub fn on_close(&self, frame: CloseFrame) {
        if self.state.get() == ConnectionState::Open {
            warn!(
                code = frame.code,
                reason = %frame.reason,
                "controller connection dropped, not reconnecting"
            );
        } else {
            info!(code = frame.code, reason = %frame.reason, "controller connection closed");
        }
        self.set_state(ConnectionState::Closed);
        let waiters = std::mem::take(&mut *self.close_waiters.borrow_mut());
        for waiter in waiters {
            let _ = waiter.send(frame.clone());
        }
        if let Some(hook) = &self.hooks.on_close {
            hook(&frame);
        }
        *self.last_close.borrow_mut() = Some(frame);
    }

    /// The browser reported a socket error.
    pub fn on_error(&self, message: &str) {
        warn!(message, state = %self.state.get(), "controller connection error");
        if let Some(hook) = &self.hooks.on_error {
            hook(message);
        }
    }

    /// Serialize and send one envelope.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::SendOnClosed`] unless the connection is `Open`,
    /// or the encoding/transport error.
    pub fn send(&self, envelope: &OutboundEnvelope) -> Result<(), GaugeError> {
        let state = self.state.get();
        if !state.is_open() {
            return Err(GaugeError::SendOnClosed { state });
        }
        let text = envelope.to_json()?;
        self.transport.send_text(&text)?;
        debug!(kind = envelope.kind(), bytes = text.len(), "envelope sent");
        Ok(())
    }

    /// Read the system settings form and send `updateSettings`.
    ///
    /// # Errors
    ///
    /// Returns the form, validation or send error.
    pub fn try_submit_system_settings(&self) -> Result<OutboundEnvelope, GaugeError> {
        let settings = read_system_settings(&self.document)?;
        if !settings.cal.is_known_mode() {
            debug!(mode = %settings.cal.mode, "calibration mode unknown to the controller");
        }
        let envelope = OutboundEnvelope::UpdateSettings(settings);
        self.send(&envelope)?;
        Ok(envelope)
    }

    /// Read and validate the WiFi form and send `updateWiFi`.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Validation`] for empty or overlong credentials,
    /// or the form/send error.
    pub fn try_submit_wifi(&self) -> Result<OutboundEnvelope, GaugeError> {
        let settings = read_wifi_settings(&self.document)?;
        settings.validate()?;
        let envelope = OutboundEnvelope::UpdateWiFi(settings);
        self.send(&envelope)?;
        Ok(envelope)
    }

    /// Read and validate the login form and send `updateUser`.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Validation`] for empty or overlong credentials,
    /// or the form/send error.
    pub fn try_submit_login(&self) -> Result<OutboundEnvelope, GaugeError> {
        let settings = read_login_settings(&self.document)?;
        settings.validate()?;
        let envelope = OutboundEnvelope::UpdateUser(settings);
        self.send(&envelope)?;
        Ok(envelope)
    }

    /// Form handler for the system settings. Always returns `false` so the
    /// browser does not perform its own form navigation.
    pub fn submit_system_settings(&self) -> bool {
        self.finish_submit("submit system settings", self.try_submit_system_settings())
    }

    /// Form handler for the WiFi settings. Always returns `false`.
    pub fn submit_wifi(&self) -> bool {
        self.finish_submit("submit wifi settings", self.try_submit_wifi())
    }

    /// Form handler for the login settings. Always returns `false`.
    pub fn submit_login(&self) -> bool {
        self.finish_submit("submit login settings", self.try_submit_login())
    }

    fn finish_submit(
        &self,
        operation: &'static str,
        result: Result<OutboundEnvelope, GaugeError>,
    ) -> bool {
        match result {
            Ok(envelope) => {
                info!(kind = envelope.kind(), "settings submitted");
                self.reporter.clear(&self.document);
            }
            Err(err) => self.report(operation, &err),
        }
        false
    }

    /// Start the close handshake.
    ///
    /// The returned acknowledgement resolves when the transport reports the
    /// socket closed. Closing an already closed (or never opened) client
    /// settles immediately.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the close request is rejected; the
    /// client is then `Closed`.
    pub fn close(&self, frame: CloseFrame) -> Result<CloseAck, GaugeError> {
        match self.state.get() {
            ConnectionState::Disconnected => {
                self.set_state(ConnectionState::Closed);
                Ok(CloseAck(AckState::Settled(None)))
            }
            ConnectionState::Closed => Ok(CloseAck(AckState::Settled(
                self.last_close.borrow().clone(),
            ))),
            ConnectionState::Closing => Ok(self.close_waiter()),
            ConnectionState::Connecting | ConnectionState::Open => {
                if let Err(err) = self.transport.close(&frame) {
                    self.set_state(ConnectionState::Closed);
                    return Err(err);
                }
                info!(code = frame.code, reason = %frame.reason, "closing controller connection");
                self.set_state(ConnectionState::Closing);
                Ok(self.close_waiter())
            }
        }
    }

    fn close_waiter(&self) -> CloseAck {
        let (tx, rx) = oneshot::channel();
        self.close_waiters.borrow_mut().push(tx);
        CloseAck(AckState::Pending(rx))
    }
}
