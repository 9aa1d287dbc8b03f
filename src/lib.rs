pub mod app;
pub mod config;
pub mod error;
pub mod feedback;
pub mod launcher;
pub mod model;
pub mod schedule;
pub mod submission;

#[cfg(feature = "csr")]
pub mod api;
#[cfg(feature = "csr")]
pub mod dom;

#[cfg(feature = "csr")]
use leptos::logging::{error, log, warn};

#[cfg(feature = "csr")]
use crate::config::{ClientConfig, ENDPOINT_BASE_ATTR};
#[cfg(feature = "csr")]
use crate::launcher::ChallengeLauncher;
#[cfg(feature = "csr")]
use crate::submission::SubmissionController;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Signals in the feedback panel need an executor to schedule their updates.
    if let Err(e) = leptos::task::Executor::init_wasm_bindgen() {
        warn!("task executor not initialised: {:?}", e);
    }
}

// Resolves the root element and the config for an entry point. Errors are logged, never thrown.
#[cfg(feature = "csr")]
fn page_setup(endpoint_base: Option<String>) -> Option<(web_sys::Element, ClientConfig)> {
    match dom::root_element() {
        Ok(root) => {
            let config = ClientConfig::resolve(
                endpoint_base.as_deref(),
                root.get_attribute(ENDPOINT_BASE_ATTR).as_deref(),
            );
            Some((root, config))
        }
        Err(e) => {
            error!("no page root: {}", e);
            None
        }
    }
}

/// Called by the listing page template.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = attachIndexHandlers)]
pub fn attach_index_handlers(endpoint_base: Option<String>) {
    let Some((root, config)) = page_setup(endpoint_base) else {
        return;
    };
    if let Err(e) = ChallengeLauncher::new(root, config).attach() {
        error!("start buttons not bound: {}", e);
    }
}

/// Called by the content page template. A page without `#content-container` is left alone.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = attachContentHandlers)]
pub fn attach_content_handlers(endpoint_base: Option<String>) {
    let Some((root, config)) = page_setup(endpoint_base) else {
        return;
    };
    match SubmissionController::attach(root, config) {
        Ok(Some(_)) => {}
        Ok(None) => log!("not a content page; submit handlers skipped"),
        Err(e) => error!("submit handlers not bound: {}", e),
    }
}
