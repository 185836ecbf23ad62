//! Readers turning the settings forms into payloads.

use wxgauges_domain::error::GaugeError;
use wxgauges_domain::settings::{
    CalibrationSettings, GaugeNumber, LoginSettings, SystemSettings, TempSettings, WifiSettings,
    WindSettings,
};

use crate::ports::Document;

/// Ids of the form inputs read by the submit handlers.
pub mod field {
    pub const MIN_WIND: &str = "min_wind";
    pub const MAX_WIND: &str = "max_wind";
    pub const STEP_WIND: &str = "step_wind";
    pub const GAIN_WIND: &str = "gain_wind";
    pub const THRESHOLD_WIND: &str = "threshold_wind";
    pub const MIN_TEMP: &str = "min_temp";
    pub const MAX_TEMP: &str = "max_temp";
    pub const STEP_TEMP: &str = "step_temp";
    pub const GAIN_TEMP: &str = "gain_temp";
    pub const CAL_MODE: &str = "cal_mode";
    pub const SSID: &str = "ssid";
    pub const WIFI_PASS: &str = "wifipass";
    pub const USERNAME: &str = "username";
    pub const USER_PASS: &str = "userpass";
}

fn number<D: Document>(document: &D, id: &'static str) -> Result<GaugeNumber, GaugeError> {
    let raw = document.field_value(id)?;
    Ok(GaugeNumber::parse(id, &raw)?)
}

/// Read the gauge scaling and calibration form.
///
/// # Errors
///
/// Returns [`GaugeError::NotFound`] for a missing input and
/// [`GaugeError::Validation`] for a non-numeric value.
pub fn read_system_settings<D: Document>(document: &D) -> Result<SystemSettings, GaugeError> {
    Ok(SystemSettings {
        wind: WindSettings {
            min: number(document, field::MIN_WIND)?,
            max: number(document, field::MAX_WIND)?,
            step: number(document, field::STEP_WIND)?,
            gain: number(document, field::GAIN_WIND)?,
            threshold: number(document, field::THRESHOLD_WIND)?,
        },
        temp: TempSettings {
            min: number(document, field::MIN_TEMP)?,
            max: number(document, field::MAX_TEMP)?,
            step: number(document, field::STEP_TEMP)?,
            gain: number(document, field::GAIN_TEMP)?,
        },
        cal: CalibrationSettings {
            mode: document.field_value(field::CAL_MODE)?,
        },
    })
}

/// Read the WiFi form. Values are taken verbatim.
///
/// # Errors
///
/// Returns [`GaugeError::NotFound`] for a missing input.
pub fn read_wifi_settings<D: Document>(document: &D) -> Result<WifiSettings, GaugeError> {
    Ok(WifiSettings::new(
        document.field_value(field::SSID)?,
        document.field_value(field::WIFI_PASS)?,
    ))
}

/// Read the login form. Values are taken verbatim.
///
/// # Errors
///
/// Returns [`GaugeError::NotFound`] for a missing input.
pub fn read_login_settings<D: Document>(document: &D) -> Result<LoginSettings, GaugeError> {
    Ok(LoginSettings::new(
        document.field_value(field::USERNAME)?,
        document.field_value(field::USER_PASS)?,
    ))
}
