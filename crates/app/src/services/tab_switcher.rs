//! Tab switching: exactly one tab panel visible at a time.

use tracing::debug;
use wxgauges_domain::error::{GaugeError, NotFoundError};

use crate::ports::Document;

/// Shows one tab panel and hides every other panel of the same class.
pub struct TabSwitcher<D> {
    document: D,
    content_class: String,
}

impl<D: Document> TabSwitcher<D> {
    /// Create a switcher over panels carrying `content_class`.
    pub fn new(document: D, content_class: impl Into<String>) -> Self {
        Self {
            document,
            content_class: content_class.into(),
        }
    }

    /// Hide all panels, then show `tab_name`.
    ///
    /// The target is checked before anything is hidden, so a bad name leaves
    /// the current panel visible.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::NotFound`] when no element with id `tab_name` exists.
    pub fn activate_tab(&self, tab_name: &str) -> Result<(), GaugeError> {
        if !self.document.contains(tab_name) {
            return Err(NotFoundError::new("tab", tab_name).into());
        }
        let hidden = self.document.set_class_visible(&self.content_class, false);
        self.document.set_visible(tab_name, true)?;
        debug!(tab = tab_name, hidden, "tab activated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::testing::FakeDocument;

    const CLASS: &str = "tabcontent";

    fn page() -> Rc<FakeDocument> {
        Rc::new(
            FakeDocument::new()
                .with_panel("status", CLASS, true)
                .with_panel("settings", CLASS, false)
                .with_panel("wifi", CLASS, false)
                .with_panel("login", CLASS, false),
        )
    }

    #[test]
    fn should_show_only_the_activated_tab() {
        let doc = page();
        let tabs = TabSwitcher::new(Rc::clone(&doc), CLASS);

        tabs.activate_tab("wifi").unwrap();

        assert_eq!(doc.visible_with_class(CLASS), vec!["wifi"]);
    }

    #[test]
    fn should_be_idempotent_when_activated_twice() {
        let doc = page();
        let tabs = TabSwitcher::new(Rc::clone(&doc), CLASS);

        tabs.activate_tab("settings").unwrap();
        assert_eq!(doc.visible_with_class(CLASS), vec!["settings"]);
        tabs.activate_tab("settings").unwrap();
        assert_eq!(doc.visible_with_class(CLASS), vec!["settings"]);
    }

    #[test]
    fn should_keep_exactly_one_tab_visible_across_switches() {
        let doc = page();
        let tabs = TabSwitcher::new(Rc::clone(&doc), CLASS);

        for name in ["login", "status", "wifi", "settings", "status"] {
            tabs.activate_tab(name).unwrap();
            assert_eq!(doc.visible_with_class(CLASS), vec![name]);
        }
    }

    #[test]
    fn should_return_not_found_and_keep_panels_when_tab_missing() {
        let doc = page();
        let tabs = TabSwitcher::new(Rc::clone(&doc), CLASS);

        let result = tabs.activate_tab("calibration");

        assert!(matches!(
            result,
            Err(GaugeError::NotFound(ref err)) if err.kind == "tab" && err.id == "calibration"
        ));
        assert_eq!(doc.visible_with_class(CLASS), vec!["status"]);
    }
}
