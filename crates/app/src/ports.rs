//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the browser.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod browser;
pub mod document;
pub mod transport;

pub use browser::Browser;
pub use document::Document;
pub use transport::{Transport, TransportEvent};
