//! Envelopes framing every WebSocket message.
//!
//! Outbound frames are adjacently tagged: `{"type": ..., "payload": ...}`.
//! Inbound frames are internally tagged: `{"type": ..., "status": ...}`.

use serde::{Deserialize, Serialize};

use crate::error::GaugeError;
use crate::settings::{LoginSettings, SystemSettings, WifiSettings};
use crate::status::StatusReport;

/// A message sent to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum OutboundEnvelope {
    #[serde(rename = "updateSettings")]
    UpdateSettings(SystemSettings),
    #[serde(rename = "updateWiFi")]
    UpdateWiFi(WifiSettings),
    #[serde(rename = "updateUser")]
    UpdateUser(LoginSettings),
}

impl OutboundEnvelope {
    /// Wire name of the `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpdateSettings(_) => "updateSettings",
            Self::UpdateWiFi(_) => "updateWiFi",
            Self::UpdateUser(_) => "updateUser",
        }
    }

    /// Serialize to the JSON text of a WebSocket frame.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, GaugeError> {
        serde_json::to_string(self).map_err(GaugeError::Encode)
    }
}

/// A message received from the controller.
///
/// `StatusWeather` and `StatusSystem` are handled identically today but stay
/// distinct so they can target separate page regions later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundEnvelope {
    /// Current weather conditions.
    #[serde(rename = "status_weather")]
    StatusWeather { status: StatusReport },
    /// Controller health (WiFi, battery, firmware, ...).
    #[serde(rename = "status_system")]
    StatusSystem { status: StatusReport },
    /// Any other `type`; ignored by the client.
    #[serde(other)]
    Unrecognized,
}

impl InboundEnvelope {
    /// Parse the JSON text of a WebSocket frame.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Parse`] when the text is not JSON, has no `type`,
    /// or a known type lacks its `status` mapping.
    pub fn parse(raw: &str) -> Result<Self, GaugeError> {
        serde_json::from_str(raw).map_err(GaugeError::Parse)
    }

    /// Wire name of the `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StatusWeather { .. } => "status_weather",
            Self::StatusSystem { .. } => "status_system",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// The carried status report, if any.
    #[must_use]
    pub fn status(&self) -> Option<&StatusReport> {
        match self {
            Self::StatusWeather { status } | Self::StatusSystem { status } => Some(status),
            Self::Unrecognized => None,
        }
    }
}
