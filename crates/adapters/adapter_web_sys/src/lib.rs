//! # wxgauges-adapter-web-sys
//!
//! Browser entry point for the weather-station gauge page.
//!
//! On start the page configuration is read, logging is installed, every
//! element is resolved once and the socket is opened. The page's inline
//! handlers call the exported functions below.

pub mod browser;
pub mod config;
pub mod dom;
pub mod error;
pub mod socket;

use std::cell::OnceCell;
use std::rc::Rc;

use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_wasm::WASMLayerConfigBuilder;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use wxgauges_app::config::ClientConfig;
use wxgauges_app::services::gauge_client::GaugeClient;
use wxgauges_app::services::logout::LogoutFlow;
use wxgauges_app::services::tab_switcher::TabSwitcher;
use wxgauges_domain::error::GaugeError;

use crate::browser::WebBrowser;
use crate::dom::ElementRegistry;
use crate::error::WebError;
use crate::socket::WebSocketTransport;

type PageClient = GaugeClient<Rc<WebSocketTransport>, Rc<ElementRegistry>>;

struct GaugePage {
    client: Rc<PageClient>,
    tabs: TabSwitcher<Rc<ElementRegistry>>,
    logout: LogoutFlow<WebBrowser>,
}

thread_local! {
    static PAGE: OnceCell<Rc<GaugePage>> = const { OnceCell::new() };
}

fn init_logging(config: &ClientConfig) {
    let level = config.logging.max_level().unwrap_or(tracing::Level::INFO);
    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .set_report_logs_in_timings(false)
            .build(),
    );
}

fn current_page() -> Option<Rc<GaugePage>> {
    let page = PAGE.with(|cell| cell.get().cloned());
    if page.is_none() {
        warn!("page handler called before start");
    }
    page
}

/// Wire the page up and open the socket.
///
/// # Errors
///
/// Fails only when there is no window or document to attach to.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;

    let (config, config_error) = match config::load(&document) {
        Ok(config) => (config, None),
        Err(err) => (ClientConfig::default(), Some(err)),
    };
    init_logging(&config);
    if let Some(err) = config_error {
        warn!(error = %err, "invalid page configuration, using defaults");
    }

    let registry = Rc::new(ElementRegistry::resolve(
        &document,
        &[
            config.ui.tab_content_class.as_str(),
            config.ui.send_control_class.as_str(),
        ],
    )?);

    let (events, mut inbox) = mpsc::unbounded_channel();
    let transport = Rc::new(WebSocketTransport::new(events));
    let client = Rc::new(GaugeClient::new(
        transport,
        Rc::clone(&registry),
        &config.ui,
    ));

    let pump = Rc::clone(&client);
    spawn_local(async move {
        while let Some(event) = inbox.recv().await {
            pump.handle_event(event);
        }
    });

    let browser = WebBrowser::new(window);
    match browser.host() {
        Ok(host) => {
            let url = config.socket_url(&host);
            info!(%url, "connecting");
            if let Err(err) = client.connect(&url) {
                client.report("connect", &err);
            }
        }
        Err(err) => client.report("connect", &GaugeError::from(err)),
    }

    let page = GaugePage {
        tabs: TabSwitcher::new(registry, config.ui.tab_content_class.clone()),
        logout: LogoutFlow::new(browser, config.session.clone()),
        client,
    };
    PAGE.with(|cell| {
        if cell.set(Rc::new(page)).is_err() {
            warn!("page already started");
        }
    });
    Ok(())
}

/// Show the tab panel `tab_name` and hide the others.
#[wasm_bindgen(js_name = openTab)]
pub fn open_tab(_evt: JsValue, tab_name: &str) {
    if let Some(page) = current_page()
        && let Err(err) = page.tabs.activate_tab(tab_name)
    {
        page.client.report("open tab", &err);
    }
}

/// Send the wind, temperature and calibration form.
///
/// Always returns `false` so the form does not submit natively.
#[wasm_bindgen(js_name = submitSystemSettings)]
pub fn submit_system_settings() -> bool {
    current_page().is_some_and(|page| page.client.submit_system_settings())
}

/// Send the WiFi credentials form.
#[wasm_bindgen(js_name = submitWiFi)]
pub fn submit_wifi() -> bool {
    current_page().is_some_and(|page| page.client.submit_wifi())
}

/// Send the login credentials form.
#[wasm_bindgen(js_name = submitLogin)]
pub fn submit_login() -> bool {
    current_page().is_some_and(|page| page.client.submit_login())
}

/// End the session and leave for the logged-out page.
#[wasm_bindgen]
pub fn logout() {
    let Some(page) = current_page() else {
        return;
    };
    spawn_local(async move {
        if let Err(err) = page.logout.run(&page.client).await {
            page.client.report("logout", &err);
        }
    });
}
