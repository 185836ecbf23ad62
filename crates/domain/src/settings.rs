//! Settings payloads pushed to the gauge controller.
//!
//! Three payload shapes exist, one per settings form:
//! [`SystemSettings`] (gauge scaling and calibration), [`WifiSettings`] and
//! [`LoginSettings`]. Credential payloads carry their own invariants; the
//! controller copies them into fixed 32-byte C strings.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Longest credential the controller can store (32-byte buffer, NUL included).
pub const MAX_CREDENTIAL_LEN: usize = 31;

/// Calibration modes the controller acts on. Other values are forwarded as-is.
pub const KNOWN_CALIBRATION_MODES: [&str; 2] = ["range", "none"];

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A numeric form value.
///
/// Integral values serialize without a fractional part (`5`, not `5.0`),
/// matching what the settings page has always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GaugeNumber(serde_json::Number);

impl GaugeNumber {
    /// Parse the raw text of the form field `field`.
    ///
    /// Surrounding whitespace is ignored and an empty field reads as `0`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotANumber`] when the text is not a finite
    /// number.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, ValidationError> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(Self::from(0));
        }
        if let Ok(int) = text.parse::<i64>() {
            return Ok(Self::from(int));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Self::from_f64)
            .ok_or_else(|| ValidationError::NotANumber {
                field,
                value: raw.to_string(),
            })
    }

    /// Wrap a finite float, collapsing integral values to integers.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            return Some(Self::from(value as i64));
        }
        serde_json::Number::from_f64(value).map(Self)
    }
}

impl From<i64> for GaugeNumber {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

impl std::fmt::Display for GaugeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Scaling of the wind-speed gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindSettings {
    pub min: GaugeNumber,
    pub max: GaugeNumber,
    pub step: GaugeNumber,
    pub gain: GaugeNumber,
    /// Minimum speed at which the direction LEDs light up.
    pub threshold: GaugeNumber,
}

/// Scaling of the temperature gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempSettings {
    pub min: GaugeNumber,
    pub max: GaugeNumber,
    pub step: GaugeNumber,
    pub gain: GaugeNumber,
}

/// Calibration sweep selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationSettings {
    pub mode: String,
}

impl CalibrationSettings {
    /// Whether the controller recognises this mode.
    #[must_use]
    pub fn is_known_mode(&self) -> bool {
        KNOWN_CALIBRATION_MODES.contains(&self.mode.as_str())
    }
}

/// Payload of an `updateSettings` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub wind: WindSettings,
    pub temp: TempSettings,
    pub cal: CalibrationSettings,
}

/// Station-mode WiFi credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiCredentials {
    pub ssid: String,
    pub pw: String,
}

/// Payload of an `updateWiFi` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiSettings {
    pub wifi: WifiCredentials,
}

impl WifiSettings {
    #[must_use]
    pub fn new(ssid: impl Into<String>, pw: impl Into<String>) -> Self {
        Self {
            wifi: WifiCredentials {
                ssid: ssid.into(),
                pw: pw.into(),
            },
        }
    }

    /// Check that both credentials are present and fit the controller.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] or [`ValidationError::TooLong`]
    /// for the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_credential("wifi.ssid", &self.wifi.ssid)?;
        check_credential("wifi.pw", &self.wifi.pw)
    }
}

/// Web interface login credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

/// Payload of an `updateUser` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSettings {
    pub auth: Credentials,
}

impl LoginSettings {
    #[must_use]
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            auth: Credentials {
                user: user.into(),
                pass: pass.into(),
            },
        }
    }

    /// Check that both credentials are present and fit the controller.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] or [`ValidationError::TooLong`]
    /// for the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_credential("auth.user", &self.auth.user)?;
        check_credential("auth.pass", &self.auth.pass)
    }
}

fn check_credential(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if value.len() > MAX_CREDENTIAL_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_CREDENTIAL_LEN,
        });
    }
    Ok(())
}
