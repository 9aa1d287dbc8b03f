//! Start-challenge buttons on the listing page.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{ChallengeId, StartOutcome};

pub const START_BUTTON_SELECTOR: &str = ".btn-start-challenge";
pub const CONTENT_ID_ATTR: &str = "data-content-id";

pub const START_FAILED: &str = "Unable to start challenge.";
pub const START_NETWORK_ERROR: &str = "Network error while starting challenge.";

/// The request a start click sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartCall {
    pub id: ChallengeId,
    pub url: String,
}

impl StartCall {
    /// Returns `None` when the button has no usable id. The click is then a no-op and no
    /// request is made.
    pub fn for_button(raw_id: Option<&str>, config: &ClientConfig) -> Option<Self> {
        let id = ChallengeId::from_attr(raw_id)?;
        let url = config.start_url(&id);
        Some(Self { id, url })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LaunchAction {
    Navigate(String),
    Alert(String),
}

/// Decides what a start click ends in. An existing attempt is not an error: the user is sent to
/// the content page either way.
pub fn launch_action(
    id: &ChallengeId,
    result: Result<StartOutcome, ClientError>,
    config: &ClientConfig,
) -> LaunchAction {
    match result {
        Ok(StartOutcome::Started) | Ok(StartOutcome::AlreadyStarted) => {
            LaunchAction::Navigate(config.content_url(id))
        }
        Ok(StartOutcome::Rejected { message }) => {
            LaunchAction::Alert(message.unwrap_or_else(|| START_FAILED.to_string()))
        }
        Err(_) => LaunchAction::Alert(START_NETWORK_ERROR.to_string()),
    }
}

#[cfg(feature = "csr")]
pub use browser::ChallengeLauncher;

#[cfg(feature = "csr")]
mod browser {
    use super::*;
    use crate::{api, dom};
    use leptos::logging::{log, warn};
    use leptos::task::spawn_local;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use web_sys::Element;

    /// Binds every start button under `root`. Each click issues one start request; nothing is
    /// retried.
    pub struct ChallengeLauncher {
        root: Element,
        config: Rc<ClientConfig>,
    }

    impl ChallengeLauncher {
        pub fn new(root: Element, config: ClientConfig) -> Self {
            Self {
                root,
                config: Rc::new(config),
            }
        }

        /// Returns the number of buttons bound.
        pub fn attach(&self) -> Result<usize, ClientError> {
            let buttons = self.root.query_selector_all(START_BUTTON_SELECTOR)?;
            let mut bound = 0;
            for i in 0..buttons.length() {
                let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok())
                else {
                    continue;
                };
                let config = Rc::clone(&self.config);
                let target = button.clone();
                dom::on_click(&button, move || {
                    // Read at click time; templates may fill the id in late.
                    let raw = target.get_attribute(CONTENT_ID_ATTR);
                    let Some(call) = StartCall::for_button(raw.as_deref(), &config) else {
                        return;
                    };
                    let config = Rc::clone(&config);
                    spawn_local(async move {
                        let result = api::start_challenge(&call).await;
                        if let Err(e) = &result {
                            warn!("start {} failed: {}", call.id, e);
                        }
                        match launch_action(&call.id, result, &config) {
                            LaunchAction::Navigate(url) => dom::navigate(&url),
                            LaunchAction::Alert(message) => dom::alert(&message),
                        }
                    });
                })?;
                bound += 1;
            }
            log!("bound {} start buttons", bound);
            Ok(bound)
        }
    }
}
