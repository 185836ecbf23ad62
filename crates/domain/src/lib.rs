//! # wxgauges-domain
//!
//! Pure domain model for the wxgauges browser client.
//!
//! ## Responsibilities
//! - Define the **connection lifecycle** states of the controller socket
//! - Define the **outbound envelopes** (`updateSettings`, `updateWiFi`, `updateUser`)
//!   and their settings payloads
//! - Define the **inbound envelopes** (`status_weather`, `status_system`) and
//!   the status reports they carry
//! - Enforce payload invariants (credential presence and size, numeric fields)
//! - Define the error conventions shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or the adapters.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod connection;
pub mod envelope;
pub mod error;
pub mod settings;
pub mod status;
