//! Element registry backed by the live DOM.
//!
//! Every element with an `id`, and every element of the marker classes the
//! client uses, is looked up once when the page starts.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use wxgauges_app::ports::Document;
use wxgauges_domain::error::{GaugeError, NotFoundError};

use crate::error::WebError;

/// CSS `display` value for a shown or hidden panel.
pub(crate) fn display_value(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

/// Elements of the page, resolved once.
pub struct ElementRegistry {
    by_id: HashMap<String, Element>,
    by_class: HashMap<String, Vec<Element>>,
}

impl ElementRegistry {
    /// Index `document` by id and by each of `classes`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Js`] if the id query is rejected.
    pub fn resolve(document: &web_sys::Document, classes: &[&str]) -> Result<Self, WebError> {
        let nodes = document
            .query_selector_all("[id]")
            .map_err(|err| WebError::js(&err))?;
        let mut by_id = HashMap::new();
        for index in 0..nodes.length() {
            let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let id = element.id();
            if !id.is_empty() {
                by_id.entry(id).or_insert(element);
            }
        }

        let mut by_class = HashMap::new();
        for class in classes {
            let collection = document.get_elements_by_class_name(class);
            let elements: Vec<Element> = (0..collection.length())
                .filter_map(|index| collection.item(index))
                .collect();
            by_class.insert((*class).to_string(), elements);
        }

        tracing::debug!(
            ids = by_id.len(),
            classes = by_class.len(),
            "element registry resolved"
        );
        Ok(Self { by_id, by_class })
    }

    fn element(&self, kind: &'static str, id: &str) -> Result<&Element, GaugeError> {
        self.by_id
            .get(id)
            .ok_or_else(|| NotFoundError::new(kind, id).into())
    }

    fn class_members(&self, class: &str) -> &[Element] {
        self.by_class.get(class).map_or(&[], Vec::as_slice)
    }
}

fn set_display(element: &Element, visible: bool) -> Result<(), WebError> {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return Ok(());
    };
    html.style()
        .set_property("display", display_value(visible))
        .map_err(|err| WebError::js(&err))
}

fn set_disabled(element: &Element, disabled: bool) -> Result<(), WebError> {
    let result = if disabled {
        element.set_attribute("disabled", "")
    } else {
        element.remove_attribute("disabled")
    };
    result.map_err(|err| WebError::js(&err))
}

impl Document for ElementRegistry {
    fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    fn set_visible(&self, id: &str, visible: bool) -> Result<(), GaugeError> {
        Ok(set_display(self.element("element", id)?, visible)?)
    }

    fn set_class_visible(&self, class: &str, visible: bool) -> usize {
        self.class_members(class)
            .iter()
            .filter(|el| set_display(el, visible).is_ok())
            .count()
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), GaugeError> {
        self.element("element", id)?.set_text_content(Some(text));
        Ok(())
    }

    fn field_value(&self, id: &str) -> Result<String, GaugeError> {
        let element = self.element("field", id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Ok(input.value());
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Ok(select.value());
        }
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Ok(area.value());
        }
        Err(NotFoundError::new("field", id).into())
    }

    fn set_class_disabled(&self, class: &str, disabled: bool) -> usize {
        self.class_members(class)
            .iter()
            .filter(|el| set_disabled(el, disabled).is_ok())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_visibility_to_display_values() {
        assert_eq!(display_value(true), "block");
        assert_eq!(display_value(false), "none");
    }
}
