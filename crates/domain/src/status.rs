//! Status reports pushed by the controller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::settings::GaugeNumber;

/// Mapping of DOM element id to the value it should display.
///
/// Has no identity beyond its keys and is rebuilt from every inbound message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusReport(Map<String, Value>);

impl StatusReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the value reported for `id`.
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(id.into(), value.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display text for `id`, if reported.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.0.get(id).map(display_text)
    }

    /// Iterate over `(element id, display text)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.0
            .iter()
            .map(|(id, value)| (id.as_str(), display_text(value)))
    }
}

/// Render a reported value as element text.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        other => other.to_string(),
    }
}

/// Integral floats print without a fraction (`72.0` shows as `72`).
fn number_text(number: &Number) -> String {
    if number.is_f64()
        && let Some(collapsed) = number.as_f64().and_then(GaugeNumber::from_f64)
    {
        return collapsed.to_string();
    }
    number.to_string()
}
