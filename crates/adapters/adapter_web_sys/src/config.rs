//! Page-embedded configuration.
//!
//! The page may carry a `<script type="application/toml" id="wxgauges-config">`
//! element; without one the defaults apply.

use web_sys::Document;
use wxgauges_app::config::{ClientConfig, ConfigError};

/// Id of the inline configuration element.
pub const CONFIG_ELEMENT_ID: &str = "wxgauges-config";

/// Read the client configuration from `document`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the inline TOML is malformed or invalid.
pub fn load(document: &Document) -> Result<ClientConfig, ConfigError> {
    let inline = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    source_or_default(inline.as_deref())
}

pub(crate) fn source_or_default(inline: Option<&str>) -> Result<ClientConfig, ConfigError> {
    match inline {
        Some(content) if !content.trim().is_empty() => ClientConfig::from_toml(content),
        _ => Ok(ClientConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_defaults_when_page_has_no_config() {
        let config = source_or_default(None).unwrap();
        assert_eq!(config.socket.path, "/ws");
    }

    #[test]
    fn should_use_defaults_when_config_is_blank() {
        let config = source_or_default(Some("\n   \n")).unwrap();
        assert_eq!(config.session.close_timeout_ms, 500);
    }

    #[test]
    fn should_parse_inline_config() {
        let config = source_or_default(Some("[socket]\nscheme = \"wss\"\n")).unwrap();
        assert_eq!(config.socket_url("station.local"), "wss://station.local/ws");
    }

    #[test]
    fn should_reject_invalid_inline_config() {
        assert!(source_or_default(Some("[socket]\nscheme = \"http\"\n")).is_err());
    }
}
