//! Document port: the page elements the client reads and writes.
//!
//! Implementations resolve elements once (an id → element registry) and
//! answer lookups of unknown ids with [`GaugeError::NotFound`] instead of
//! failing at the call site.

use std::rc::Rc;

use wxgauges_domain::error::GaugeError;

/// Element registry of the current page.
pub trait Document {
    /// Whether an element with `id` exists.
    fn contains(&self, id: &str) -> bool;

    /// Show or hide the element with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::NotFound`] when no such element exists.
    fn set_visible(&self, id: &str, visible: bool) -> Result<(), GaugeError>;

    /// Show or hide every element carrying `class`. Returns how many were touched.
    fn set_class_visible(&self, class: &str, visible: bool) -> usize;

    /// Replace the displayed text of the element with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::NotFound`] when no such element exists.
    fn set_text(&self, id: &str, text: &str) -> Result<(), GaugeError>;

    /// Current value of the form field with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::NotFound`] when no such field exists.
    fn field_value(&self, id: &str) -> Result<String, GaugeError>;

    /// Enable or disable every control carrying `class`. Returns how many were touched.
    fn set_class_disabled(&self, class: &str, disabled: bool) -> usize;
}

impl<T: Document + ?Sized> Document for Rc<T> {
    fn contains(&self, id: &str) -> bool {
        (**self).contains(id)
    }

    fn set_visible(&self, id: &str, visible: bool) -> Result<(), GaugeError> {
        (**self).set_visible(id, visible)
    }

    fn set_class_visible(&self, class: &str, visible: bool) -> usize {
        (**self).set_class_visible(class, visible)
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), GaugeError> {
        (**self).set_text(id, text)
    }

    fn field_value(&self, id: &str) -> Result<String, GaugeError> {
        (**self).field_value(id)
    }

    fn set_class_disabled(&self, class: &str, disabled: bool) -> usize {
        (**self).set_class_disabled(class, disabled)
    }
}
