//! In-memory port implementations shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;

use wxgauges_domain::connection::CloseFrame;
use wxgauges_domain::error::{GaugeError, NotFoundError};

use crate::ports::{Browser, Document, Transport};

#[derive(Debug, Default, Clone)]
pub struct FakeElement {
    pub classes: Vec<String>,
    pub text: String,
    pub value: String,
    pub visible: bool,
    pub disabled: bool,
}

/// Element map keyed by id.
#[derive(Debug, Default)]
pub struct FakeDocument {
    elements: RefCell<HashMap<String, FakeElement>>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(self, id: &str, element: FakeElement) -> Self {
        self.elements.borrow_mut().insert(id.to_string(), element);
        self
    }

    pub fn with_element(self, id: &str) -> Self {
        self.insert(
            id,
            FakeElement {
                visible: true,
                ..FakeElement::default()
            },
        )
    }

    pub fn with_panel(self, id: &str, class: &str, visible: bool) -> Self {
        self.insert(
            id,
            FakeElement {
                classes: vec![class.to_string()],
                visible,
                ..FakeElement::default()
            },
        )
    }

    pub fn with_field(self, id: &str, value: &str) -> Self {
        self.insert(
            id,
            FakeElement {
                value: value.to_string(),
                visible: true,
                ..FakeElement::default()
            },
        )
    }

    pub fn with_control(self, id: &str, class: &str) -> Self {
        self.insert(
            id,
            FakeElement {
                classes: vec![class.to_string()],
                visible: true,
                ..FakeElement::default()
            },
        )
    }

    pub fn set_field(&self, id: &str, value: &str) {
        if let Some(el) = self.elements.borrow_mut().get_mut(id) {
            el.value = value.to_string();
        }
    }

    pub fn text(&self, id: &str) -> String {
        self.elements.borrow()[id].text.clone()
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.elements.borrow()[id].disabled
    }

    /// Sorted ids of visible elements carrying `class`.
    pub fn visible_with_class(&self, class: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .elements
            .borrow()
            .iter()
            .filter(|(_, el)| el.visible && el.classes.iter().any(|c| c == class))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Snapshot of every element, for before/after comparisons.
    pub fn snapshot(&self) -> Vec<(String, String, bool)> {
        let mut all: Vec<_> = self
            .elements
            .borrow()
            .iter()
            .map(|(id, el)| (id.clone(), el.text.clone(), el.visible))
            .collect();
        all.sort();
        all
    }

    fn with_class_mut(&self, class: &str, mut apply: impl FnMut(&mut FakeElement)) -> usize {
        let mut elements = self.elements.borrow_mut();
        let mut touched = 0;
        for el in elements.values_mut() {
            if el.classes.iter().any(|c| c == class) {
                apply(el);
                touched += 1;
            }
        }
        touched
    }

    fn with_id_mut(
        &self,
        kind: &'static str,
        id: &str,
        apply: impl FnOnce(&mut FakeElement),
    ) -> Result<(), GaugeError> {
        let mut elements = self.elements.borrow_mut();
        let el = elements
            .get_mut(id)
            .ok_or_else(|| NotFoundError::new(kind, id))?;
        apply(el);
        Ok(())
    }
}

impl Document for FakeDocument {
    fn contains(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    fn set_visible(&self, id: &str, visible: bool) -> Result<(), GaugeError> {
        self.with_id_mut("element", id, |el| el.visible = visible)
    }

    fn set_class_visible(&self, class: &str, visible: bool) -> usize {
        self.with_class_mut(class, |el| el.visible = visible)
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), GaugeError> {
        self.with_id_mut("element", id, |el| el.text = text.to_string())
    }

    fn field_value(&self, id: &str) -> Result<String, GaugeError> {
        self.elements
            .borrow()
            .get(id)
            .map(|el| el.value.clone())
            .ok_or_else(|| NotFoundError::new("field", id).into())
    }

    fn set_class_disabled(&self, class: &str, disabled: bool) -> usize {
        self.with_class_mut(class, |el| el.disabled = disabled)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("socket refused")]
pub struct SocketRefused;

/// Records every call; optionally refuses to open, send or close.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub opened: RefCell<Vec<String>>,
    pub sent: RefCell<Vec<String>>,
    pub closed: RefCell<Vec<CloseFrame>>,
    pub refuse_open: Cell<bool>,
    pub refuse_send: Cell<bool>,
    pub refuse_close: Cell<bool>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    fn open(&self, url: &str) -> Result<(), GaugeError> {
        if self.refuse_open.get() {
            return Err(GaugeError::Transport(Box::new(SocketRefused)));
        }
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn send_text(&self, text: &str) -> Result<(), GaugeError> {
        if self.refuse_send.get() {
            return Err(GaugeError::Transport(Box::new(SocketRefused)));
        }
        self.sent.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn close(&self, frame: &CloseFrame) -> Result<(), GaugeError> {
        if self.refuse_close.get() {
            return Err(GaugeError::Transport(Box::new(SocketRefused)));
        }
        self.closed.borrow_mut().push(frame.clone());
        Ok(())
    }
}

/// Records requests and navigations. Delays either finish at once or never.
#[derive(Debug, Default)]
pub struct FakeBrowser {
    pub requests: RefCell<Vec<String>>,
    pub navigations: RefCell<Vec<String>>,
    pub delays: RefCell<Vec<u32>>,
    pub delays_elapse: Cell<bool>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elapsing_delays() -> Self {
        let browser = Self::default();
        browser.delays_elapse.set(true);
        browser
    }
}

impl Browser for FakeBrowser {
    fn fire_get(&self, path: &str) {
        self.requests.borrow_mut().push(path.to_string());
    }

    fn navigate(&self, url: &str) -> Result<(), GaugeError> {
        self.navigations.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn delay(&self, millis: u32) -> impl Future<Output = ()> {
        self.delays.borrow_mut().push(millis);
        let elapses = self.delays_elapse.get();
        async move {
            if !elapses {
                std::future::pending::<()>().await;
            }
        }
    }
}
