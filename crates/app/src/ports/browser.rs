//! Browser port: HTTP side effects, navigation and timers.

use std::future::Future;
use std::rc::Rc;

use wxgauges_domain::error::GaugeError;

/// Page-level browser services.
pub trait Browser {
    /// Issue a `GET` to `path` without waiting for, or inspecting, the response.
    fn fire_get(&self, path: &str);

    /// Navigate the current page to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Transport`] if the browser refuses the navigation.
    fn navigate(&self, url: &str) -> Result<(), GaugeError>;

    /// Resolve after `millis` milliseconds.
    fn delay(&self, millis: u32) -> impl Future<Output = ()>;
}

impl<T: Browser> Browser for Rc<T> {
    fn fire_get(&self, path: &str) {
        (**self).fire_get(path);
    }

    fn navigate(&self, url: &str) -> Result<(), GaugeError> {
        (**self).navigate(url)
    }

    fn delay(&self, millis: u32) -> impl Future<Output = ()> {
        (**self).delay(millis)
    }
}
