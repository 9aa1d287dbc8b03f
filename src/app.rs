use leptos::prelude::*;

use crate::feedback::{Panel, PlacementBonus};

/// The alert shown in `#submit-result` after a submission.
#[component]
pub fn FeedbackPanel(panel: Panel) -> impl IntoView {
    match panel {
        Panel::Sealed { base, bonus } => view! {
            <div class="alert alert-success">
                "✔ File sealed. Chapter complete! \u{a0}"
                <strong>{format!("+{} pts", base)}</strong>
                " (base)"
                {bonus.map(|bonus| view! { <BonusNote bonus=bonus /> })}
            </div>
        }
        .into_any(),
        Panel::Abandoned => view! { <div class="alert alert-danger">"✘ File abandoned."</div> }
            .into_any(),
        Panel::Failed { message } => {
            view! { <div class="alert alert-danger">{message}</div> }.into_any()
        }
    }
}

#[component]
fn BonusNote(bonus: PlacementBonus) -> impl IntoView {
    let detail = bonus.detail();
    match bonus.headline() {
        Some(headline) => view! {
            " · "
            {headline}
            " "
            <em>{detail}</em>
        }
        .into_any(),
        None => view! {
            " · "
            <em>{detail}</em>
        }
        .into_any(),
    }
}

#[cfg(feature = "csr")]
pub use slot::FeedbackSlot;

#[cfg(feature = "csr")]
mod slot {
    use super::*;
    use leptos::logging::warn;
    use leptos::mount::mount_to;
    use std::cell::Cell;
    use web_sys::HtmlElement;

    use crate::submission::SUBMIT_RESULT_ID;

    /// The `#submit-result` region. Whatever the server rendered there is replaced on the first
    /// panel; after that the mounted view just follows the signal.
    pub struct FeedbackSlot {
        target: Option<HtmlElement>,
        panel: ArcRwSignal<Option<Panel>>,
        mounted: Cell<bool>,
    }

    impl FeedbackSlot {
        pub fn new(target: Option<HtmlElement>) -> Self {
            Self {
                target,
                panel: ArcRwSignal::new(None),
                mounted: Cell::new(false),
            }
        }

        pub fn show(&self, panel: Panel) {
            self.panel.set(Some(panel));
            if self.mounted.replace(true) {
                return;
            }
            let Some(target) = &self.target else {
                warn!("#{} missing; feedback not shown", SUBMIT_RESULT_ID);
                return;
            };
            target.set_inner_html("");
            let panel = self.panel.clone();
            mount_to(target.clone(), move || {
                view! {
                    {move || panel.get().map(|panel| view! { <FeedbackPanel panel=panel /> })}
                }
            })
            .forget();
        }
    }
}
