//! Window-level side effects: fetch, navigation and timers.

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::Window;
use wxgauges_app::ports::Browser;
use wxgauges_domain::error::GaugeError;

use crate::error::WebError;

/// [`Browser`] backed by the page window.
pub struct WebBrowser {
    window: Window,
}

impl WebBrowser {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// `host[:port]` the page was served from.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Js`] if the location is not readable.
    pub fn host(&self) -> Result<String, WebError> {
        self.window
            .location()
            .host()
            .map_err(|err| WebError::js(&err))
    }
}

impl Browser for WebBrowser {
    fn fire_get(&self, path: &str) {
        let path = path.to_string();
        spawn_local(async move {
            match Request::get(&path).send().await {
                Ok(response) => {
                    tracing::debug!(%path, status = response.status(), "request answered");
                }
                Err(err) => tracing::warn!(%path, error = %err, "request failed"),
            }
        });
    }

    fn navigate(&self, url: &str) -> Result<(), GaugeError> {
        self.window
            .location()
            .assign(url)
            .map_err(|err| WebError::js(&err).into())
    }

    fn delay(&self, millis: u32) -> impl Future<Output = ()> {
        TimeoutFuture::new(millis)
    }
}
