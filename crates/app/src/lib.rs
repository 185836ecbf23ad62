//! # wxgauges-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Document`: element registry: text, visibility, form values, disabling
//!   - `Transport`: the controller WebSocket
//!   - `Browser`: fire-and-forget HTTP, navigation, timers
//! - Define **driving/inbound use-cases**:
//!   - `TabSwitcher`: show one tab panel, hide the rest
//!   - `GaugeClient`: connection lifecycle, status rendering, settings submits
//!   - `LogoutFlow`: logout request, close handshake, redirect
//! - Load and validate the client configuration
//!
//! ## Dependency rule
//! Depends on `wxgauges-domain` only (plus `tokio::sync` for the close
//! acknowledgement and the transport event channel).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.
//!
//! Everything here runs on a single-threaded event loop: types use `Rc`,
//! `Cell` and `RefCell`, and no futures are required to be `Send`.

pub mod config;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
