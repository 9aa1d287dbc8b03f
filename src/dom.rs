//! Thin helpers over `web_sys`. Fire-and-forget work here logs failures instead of returning
//! them, so nothing escapes to the console as an uncaught exception.

use gloo_timers::callback::Timeout;
use leptos::logging::{error, log, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::ClientError;
use crate::feedback::bump_badge_text;
use crate::schedule::{PendingTasks, RunFlag};

pub const NAV_BADGE_IDS: [&str; 2] = ["nav-score-desktop", "nav-score-mobile"];

pub fn window() -> Result<Window, ClientError> {
    web_sys::window().ok_or(ClientError::Js("no window".to_string()))
}

pub fn document() -> Result<Document, ClientError> {
    window()?
        .document()
        .ok_or(ClientError::Js("no document".to_string()))
}

/// The `<html>` element, used as the default root for both controllers.
pub fn root_element() -> Result<Element, ClientError> {
    document()?
        .document_element()
        .ok_or(ClientError::MissingElement("html"))
}

/// Finds an element by id under `root`. Lookups are done fresh each time so callers never hold
/// on to removed nodes.
pub fn find(root: &Element, id: &str) -> Option<Element> {
    root.query_selector(&format!("#{}", id)).ok().flatten()
}

pub fn on_click<F>(target: &Element, handler: F) -> Result<(), ClientError>
where
    F: FnMut() + 'static,
{
    let callback = Closure::<dyn FnMut()>::new(handler);
    target.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    // The listener lives as long as the page.
    callback.forget();
    Ok(())
}

pub fn navigate(url: &str) {
    let result = window().and_then(|w| w.location().set_href(url).map_err(ClientError::from));
    if let Err(e) = result {
        error!("navigation to {} failed: {}", url, e);
    }
}

pub fn alert(message: &str) {
    let result = window().and_then(|w| w.alert_with_message(message).map_err(ClientError::from));
    if let Err(e) = result {
        warn!("alert failed ({}): {}", message, e);
    }
}

/// Appends a floating "+N" element to `<body>` that removes itself when its CSS animation ends.
pub fn show_score_float(text: &str) {
    if let Err(e) = try_show_score_float(text) {
        warn!("score float not shown: {}", e);
    }
}

fn try_show_score_float(text: &str) -> Result<(), ClientError> {
    let document = document()?;
    let body = document.body().ok_or(ClientError::MissingElement("body"))?;

    let float: HtmlElement = document.create_element("div")?.unchecked_into();
    float.set_class_name("score-float");
    float.set_text_content(Some(text));
    let style = float.style();
    style.set_property("left", "50%")?;
    style.set_property("top", "60%")?;
    style.set_property("transform", "translateX(-50%)")?;
    body.append_child(&float)?;

    let finished = float.clone();
    let on_end = Closure::once_into_js(move || finished.remove());
    float.add_event_listener_with_callback("animationend", on_end.unchecked_ref())?;
    Ok(())
}

/// Adds `delta` to every nav score badge that is currently on the page.
pub fn bump_nav_badges(root: &Element, delta: f64) {
    for id in NAV_BADGE_IDS {
        let Some(badge) = find(root, id) else {
            continue;
        };
        let current = badge.text_content().unwrap_or_default();
        badge.set_text_content(Some(&bump_badge_text(&current, delta)));
    }
}

/// Owns the page's pending timers. Dropping a `Timeout` cancels it, so clearing the list is
/// enough to stop every animation and redirect. Timers that already fired are dropped on the
/// next `after`.
#[derive(Clone, Default)]
pub struct Scheduler {
    pending: Rc<RefCell<PendingTasks<Timeout>>>,
}

impl Scheduler {
    pub fn after<F>(&self, delay_ms: u32, task: F)
    where
        F: FnOnce() + 'static,
    {
        let flag = RunFlag::default();
        let ran = flag.clone();
        let timeout = Timeout::new(delay_ms, move || {
            ran.mark();
            task();
        });
        self.pending.borrow_mut().push(flag, timeout);
    }

    /// Cancels everything still pending and returns how many tasks never ran.
    pub fn cancel_all(&self) -> usize {
        self.pending.borrow_mut().cancel_all()
    }

    /// Ties the scheduler to the page lifecycle: leaving the page cancels all pending work.
    pub fn cancel_on_page_hide(&self) -> Result<(), ClientError> {
        let scheduler = self.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            let cancelled = scheduler.cancel_all();
            if cancelled > 0 {
                log!("page hidden; dropped {} scheduled tasks", cancelled);
            }
        });
        window()?.add_event_listener_with_callback("pagehide", callback.as_ref().unchecked_ref())?;
        callback.forget();
        Ok(())
    }
}
