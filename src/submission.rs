//! The completed/incomplete buttons on a content page.

pub const CONTENT_CONTAINER_ID: &str = "content-container";
pub const SUBMIT_RESULT_ID: &str = "submit-result";
pub const BTN_COMPLETED_ID: &str = "btn-submit-completed";
pub const BTN_INCOMPLETE_ID: &str = "btn-submit-incomplete";
pub const TIMER_VALUE_ID: &str = "timer-value";
pub const TIME_LIMIT_ATTR: &str = "data-time-limit";

/// Attributes on the completed button that send the user to an external game instead of
/// submitting, in priority order.
pub const ESCAPE_HATCH_ATTRS: [&str; 4] = [
    "data-puzzle-url",
    "data-quiz-url",
    "data-callgame-url",
    "data-codegate-url",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletedClick {
    Redirect(String),
    Submit,
}

impl CompletedClick {
    /// Looks up the escape hatches through `attr`. The first non-empty one wins; the submit
    /// endpoint is only used when none is set.
    pub fn resolve<F>(attr: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        ESCAPE_HATCH_ATTRS
            .iter()
            .find_map(|name| attr(name).filter(|url| !url.is_empty()))
            .map(CompletedClick::Redirect)
            .unwrap_or(CompletedClick::Submit)
    }
}

#[cfg(feature = "csr")]
pub use browser::SubmissionController;

#[cfg(feature = "csr")]
mod browser {
    use super::*;
    use crate::api;
    use crate::app::FeedbackSlot;
    use crate::config::ClientConfig;
    use crate::dom::{self, Scheduler};
    use crate::error::ClientError;
    use crate::feedback::{
        format_clock, parse_time_limit, plan_submission, SubmissionState, SubmitPlan,
    };
    use crate::launcher::CONTENT_ID_ATTR;
    use crate::model::ChallengeId;
    use leptos::logging::{log, warn};
    use leptos::task::spawn_local;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use web_sys::Element;

    struct Inner {
        root: Element,
        id: ChallengeId,
        config: ClientConfig,
        scheduler: Scheduler,
        feedback: FeedbackSlot,
        state: Cell<SubmissionState>,
    }

    /// Owns one content page's submit cycle. Cheap to clone; clones share state.
    #[derive(Clone)]
    pub struct SubmissionController {
        inner: Rc<Inner>,
    }

    impl SubmissionController {
        /// Binds the content page under `root`. Returns `Ok(None)` when this isn't a content
        /// page.
        pub fn attach(root: Element, config: ClientConfig) -> Result<Option<Self>, ClientError> {
            let Some(container) = dom::find(&root, CONTENT_CONTAINER_ID) else {
                return Ok(None);
            };
            let Some(id) =
                ChallengeId::from_attr(container.get_attribute(CONTENT_ID_ATTR).as_deref())
            else {
                warn!("#{} has no {}", CONTENT_CONTAINER_ID, CONTENT_ID_ATTR);
                return Ok(None);
            };

            if let Some(limit) = parse_time_limit(container.get_attribute(TIME_LIMIT_ATTR).as_deref())
            {
                if let Some(timer) = dom::find(&root, TIMER_VALUE_ID) {
                    timer.set_text_content(Some(&format_clock(limit)));
                }
            }

            let scheduler = Scheduler::default();
            scheduler.cancel_on_page_hide()?;

            let feedback = FeedbackSlot::new(
                dom::find(&root, SUBMIT_RESULT_ID).and_then(|el| el.dyn_into().ok()),
            );

            let controller = Self {
                inner: Rc::new(Inner {
                    root: root.clone(),
                    id,
                    config,
                    scheduler,
                    feedback,
                    state: Cell::new(SubmissionState::Idle),
                }),
            };

            if let Some(button) = dom::find(&root, BTN_COMPLETED_ID) {
                let this = controller.clone();
                let target = button.clone();
                dom::on_click(&button, move || this.on_completed_click(&target))?;
            }
            if let Some(button) = dom::find(&root, BTN_INCOMPLETE_ID) {
                let this = controller.clone();
                dom::on_click(&button, move || this.submit(false))?;
            }

            log!("content handlers bound for {}", controller.inner.id);
            Ok(Some(controller))
        }

        pub fn state(&self) -> SubmissionState {
            self.inner.state.get()
        }

        fn on_completed_click(&self, button: &Element) {
            match CompletedClick::resolve(|name| button.get_attribute(name)) {
                CompletedClick::Redirect(url) => dom::navigate(&url),
                CompletedClick::Submit => self.submit(true),
            }
        }

        /// Posts the completion flag. Double clicks each send a request; the server settles
        /// which one counts.
        pub fn submit(&self, completed: bool) {
            self.inner.state.set(SubmissionState::Submitting);
            let this = self.clone();
            spawn_local(async move {
                let inner = &this.inner;
                let result = api::submit_result(&inner.config, &inner.id, completed).await;
                match &result {
                    Ok(outcome) => log!("submit {} -> {:?}", inner.id, outcome),
                    Err(e) => warn!("submit {} failed: {}", inner.id, e),
                }
                this.apply(plan_submission(completed, result, &inner.config));
            });
        }

        fn apply(&self, plan: SubmitPlan) {
            let inner = &self.inner;
            let state = SubmissionState::settled(&plan);

            inner.feedback.show(plan.panel);

            for float in plan.floats {
                let text = float.text();
                if float.delay_ms == 0 {
                    dom::show_score_float(&text);
                } else {
                    inner
                        .scheduler
                        .after(float.delay_ms, move || dom::show_score_float(&text));
                }
            }

            if let Some(delta) = plan.badge_delta {
                dom::bump_nav_badges(&inner.root, delta);
            }

            if let Some(redirect) = plan.redirect {
                log!("redirecting to {} in {}ms", redirect.url, redirect.delay_ms);
                let url = redirect.url;
                inner
                    .scheduler
                    .after(redirect.delay_ms, move || dom::navigate(&url));
            }

            inner.state.set(state);
        }
    }
}
