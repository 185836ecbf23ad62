//! Logout: invalidate the session, close the socket, leave the page.
//!
//! Navigation waits for the close acknowledgement instead of a fixed timer.
//! `close_timeout_ms` bounds that wait so a silent peer cannot strand the
//! user on the page.

use std::pin::pin;

use futures_util::future::{Either, select};
use tracing::{info, warn};
use wxgauges_domain::connection::CloseFrame;
use wxgauges_domain::error::GaugeError;

use crate::config::SessionConfig;
use crate::ports::{Browser, Document, Transport};
use crate::services::gauge_client::{CloseAck, GaugeClient};

/// How the close handshake ended before navigating away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The transport confirmed the close.
    Acknowledged(CloseFrame),
    /// No confirmation within `close_timeout_ms`.
    TimedOut,
    /// There was no open connection to close.
    AlreadyClosed,
    /// The close request itself failed.
    CloseFailed,
}

/// Logout sequence driver.
pub struct LogoutFlow<B> {
    browser: B,
    session: SessionConfig,
}

impl<B: Browser> LogoutFlow<B> {
    pub fn new(browser: B, session: SessionConfig) -> Self {
        Self { browser, session }
    }

    /// Fire the logout request, close `client`, then navigate to the
    /// logged-out page.
    ///
    /// Inbound messages may still be applied while the close is pending.
    /// Once started the sequence cannot be cancelled.
    ///
    /// # Errors
    ///
    /// Returns the browser error if the final navigation is refused. Close
    /// failures are reported and do not prevent navigation.
    pub async fn run<T: Transport, D: Document>(
        &self,
        client: &GaugeClient<T, D>,
    ) -> Result<LogoutOutcome, GaugeError> {
        info!(path = %self.session.logout_path, "logging out");
        self.browser.fire_get(&self.session.logout_path);

        let outcome = match client.close(CloseFrame::logout()) {
            Ok(ack) if ack.is_settled() => LogoutOutcome::AlreadyClosed,
            Ok(ack) => self.await_ack(ack).await,
            Err(err) => {
                client.report("close connection", &err);
                LogoutOutcome::CloseFailed
            }
        };

        info!(?outcome, page = %self.session.logged_out_page, "leaving page");
        self.browser.navigate(&self.session.logged_out_page)?;
        Ok(outcome)
    }

    async fn await_ack(&self, ack: CloseAck) -> LogoutOutcome {
        let timeout_ms = self.session.close_timeout_ms;
        let acked = pin!(ack.wait());
        let timeout = pin!(self.browser.delay(timeout_ms));
        match select(acked, timeout).await {
            Either::Left((Some(frame), _)) => LogoutOutcome::Acknowledged(frame),
            Either::Left((None, _)) => LogoutOutcome::CloseFailed,
            Either::Right(((), _)) => {
                warn!(timeout_ms, "close not acknowledged in time");
                LogoutOutcome::TimedOut
            }
        }
    }
}
