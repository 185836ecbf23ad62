//! Client configuration: TOML with defaults for every field.
//!
//! The page may embed a configuration block; when it does not, the defaults
//! match the paths and class names served by the gauge controller.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Controller WebSocket settings.
    pub socket: SocketConfig,
    /// Logout and redirect settings.
    pub session: SessionConfig,
    /// Page marker classes and ids.
    pub ui: UiConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Controller WebSocket endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SocketConfig {
    /// `ws` or `wss`.
    pub scheme: String,
    /// Path of the socket on the page's host.
    pub path: String,
}

/// Logout sequencing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Endpoint that invalidates the HTTP session.
    pub logout_path: String,
    /// Page shown once logged out.
    pub logged_out_page: String,
    /// Upper bound on waiting for the close acknowledgement, in milliseconds.
    pub close_timeout_ms: u32,
}

/// Page contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Marker class of tab panels.
    pub tab_content_class: String,
    /// Marker class of controls that send over the socket.
    pub send_control_class: String,
    /// Element that displays the last reported error, if any.
    pub error_element_id: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
}

impl ClientConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Validation`] for semantically invalid values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.socket.scheme.as_str(), "ws" | "wss") {
            return Err(ConfigError::Validation(format!(
                "socket scheme must be ws or wss, got {:?}",
                self.socket.scheme
            )));
        }
        for (name, path) in [
            ("socket.path", &self.socket.path),
            ("session.logout_path", &self.session.logout_path),
            ("session.logged_out_page", &self.session.logged_out_page),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{name} must start with '/'"
                )));
            }
        }
        if self.session.close_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "session.close_timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.ui.tab_content_class.is_empty() || self.ui.send_control_class.is_empty() {
            return Err(ConfigError::Validation(
                "ui marker classes must not be empty".to_string(),
            ));
        }
        self.logging.max_level()?;
        Ok(())
    }

    /// Return the socket URL for a page served from `host`.
    #[must_use]
    pub fn socket_url(&self, host: &str) -> String {
        format!("{}://{host}{}", self.socket.scheme, self.socket.path)
    }
}

impl LoggingConfig {
    /// The configured maximum level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an unknown level name.
    pub fn max_level(&self) -> Result<tracing::Level, ConfigError> {
        self.level
            .parse()
            .map_err(|_| ConfigError::Validation(format!("unknown log level {:?}", self.level)))
    }
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            scheme: "ws".to_string(),
            path: "/ws".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            logout_path: "/logout".to_string(),
            logged_out_page: "/logged-out.html".to_string(),
            close_timeout_ms: 500,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tab_content_class: "tabcontent".to_string(),
            send_control_class: "ws-send".to_string(),
            error_element_id: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_controller_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.socket.path, "/ws");
        assert_eq!(config.session.logout_path, "/logout");
        assert_eq!(config.session.logged_out_page, "/logged-out.html");
        assert_eq!(config.session.close_timeout_ms, 500);
        assert_eq!(config.ui.tab_content_class, "tabcontent");
        assert!(config.ui.error_element_id.is_none());
    }

    #[test]
    fn should_parse_empty_toml_as_defaults() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config.socket.scheme, "ws");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [socket]
            scheme = 'wss'
            path = '/gauges/ws'

            [session]
            logout_path = '/auth/logout'
            logged_out_page = '/bye.html'
            close_timeout_ms = 1500

            [ui]
            tab_content_class = 'panel'
            send_control_class = 'needs-socket'
            error_element_id = 'ws_error'

            [logging]
            level = 'debug'
        ";
        let config = ClientConfig::from_toml(toml).unwrap();
        assert_eq!(config.socket.scheme, "wss");
        assert_eq!(config.socket.path, "/gauges/ws");
        assert_eq!(config.session.logout_path, "/auth/logout");
        assert_eq!(config.session.logged_out_page, "/bye.html");
        assert_eq!(config.session.close_timeout_ms, 1500);
        assert_eq!(config.ui.tab_content_class, "panel");
        assert_eq!(config.ui.send_control_class, "needs-socket");
        assert_eq!(config.ui.error_element_id.as_deref(), Some("ws_error"));
        assert_eq!(config.logging.max_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [session]
            close_timeout_ms = 250
        ";
        let config = ClientConfig::from_toml(toml).unwrap();
        assert_eq!(config.session.close_timeout_ms, 250);
        assert_eq!(config.session.logout_path, "/logout");
        assert_eq!(config.socket.path, "/ws");
    }

    #[test]
    fn should_format_socket_url() {
        let config = ClientConfig::default();
        assert_eq!(config.socket_url("192.168.4.1"), "ws://192.168.4.1/ws");
    }

    #[test]
    fn should_reject_unknown_scheme() {
        let result = ClientConfig::from_toml("[socket]\nscheme = 'http'");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_relative_paths() {
        let result = ClientConfig::from_toml("[session]\nlogout_path = 'logout'");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_zero_close_timeout() {
        let result = ClientConfig::from_toml("[session]\nclose_timeout_ms = 0");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_unknown_log_level() {
        let result = ClientConfig::from_toml("[logging]\nlevel = 'chatty'");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result = ClientConfig::from_toml("invalid {{{");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
