//! Application services: the use-cases driven by page events.

pub mod gauge_client;
pub mod logout;
pub mod report;
pub mod settings_form;
pub mod tab_switcher;
