//! Boundary error reporting.
//!
//! Nothing below the page entry points is allowed to panic or throw; every
//! failure ends up here, is logged, and is optionally shown on the page.

use tracing::{debug, warn};
use wxgauges_domain::error::GaugeError;

use crate::ports::Document;

/// Logs failures and mirrors the latest one into an optional page element.
#[derive(Debug, Clone, Default)]
pub struct ErrorReporter {
    element_id: Option<String>,
}

impl ErrorReporter {
    #[must_use]
    pub fn new(element_id: Option<String>) -> Self {
        Self { element_id }
    }

    /// Report a failed `operation`.
    pub fn report<D: Document>(&self, document: &D, operation: &'static str, err: &GaugeError) {
        let message = err.chain();
        warn!(operation, error = %message, "client operation failed");
        if let Some(id) = &self.element_id {
            let text = format!("{operation}: {message}");
            if document.set_text(id, &text).is_err() {
                debug!(id, "error element missing from page");
            }
        }
    }

    /// Clear the page element after a successful operation.
    pub fn clear<D: Document>(&self, document: &D) {
        if let Some(id) = &self.element_id
            && document.set_text(id, "").is_err()
        {
            debug!(id, "error element missing from page");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDocument;
    use wxgauges_domain::error::NotFoundError;

    #[test]
    fn should_write_message_into_error_element() {
        let doc = FakeDocument::new().with_element("ws_error");
        let reporter = ErrorReporter::new(Some("ws_error".to_string()));

        let err: GaugeError = NotFoundError::new("tab", "nope").into();
        reporter.report(&doc, "open tab", &err);

        assert_eq!(
            doc.text("ws_error"),
            "open tab: element not found: tab `nope` not found"
        );
    }

    #[test]
    fn should_clear_error_element() {
        let doc = FakeDocument::new().with_element("ws_error");
        let reporter = ErrorReporter::new(Some("ws_error".to_string()));
        let err: GaugeError = NotFoundError::new("tab", "nope").into();
        reporter.report(&doc, "open tab", &err);

        reporter.clear(&doc);

        assert_eq!(doc.text("ws_error"), "");
    }

    #[test]
    fn should_tolerate_missing_error_element() {
        let doc = FakeDocument::new();
        let reporter = ErrorReporter::new(Some("ws_error".to_string()));
        let err: GaugeError = NotFoundError::new("tab", "nope").into();

        reporter.report(&doc, "open tab", &err);
        reporter.clear(&doc);

        assert!(!doc.contains("ws_error"));
    }
}
