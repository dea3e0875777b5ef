//! `web-sys` binding for the DOM traits. Listener closures are leaked with
//! `Closure::forget` because the page never detaches them; timers are
//! fire-and-forget for the same reason.

use super::{ClickEvent, ClickListener, Document, Element, Scheduler};
use crate::error::{Error, Result};
use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{HtmlElement, HtmlInputElement};

#[derive(Clone, Debug)]
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    /// Binds to the document of the global window.
    ///
    /// # Errors
    /// Returns an error when running outside a browser window.
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::WindowNotAvailable)?;
        let document = window.document().ok_or(Error::DocumentNotAvailable)?;
        Ok(Self(document))
    }

    /// True while the parser is still building the DOM.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        js_sys::Reflect::get(&self.0, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|state| state.as_string())
            .is_some_and(|state| state == "loading")
    }

    /// Runs `callback` on the first `DOMContentLoaded`; later dispatches of
    /// the event are ignored.
    ///
    /// # Errors
    /// Returns `Error::Listener` if the listener cannot be registered.
    pub fn on_content_loaded(&self, callback: impl FnOnce() + 'static) -> Result<()> {
        let mut pending = Some(callback);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(callback) = pending.take() {
                callback();
            }
        });
        self.0
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
            .map_err(listener_error)?;
        closure.forget();
        Ok(())
    }

    /// Runs `callback` now if the DOM is parsed, otherwise on `DOMContentLoaded`.
    ///
    /// # Errors
    /// Returns `Error::Listener` if the deferred listener cannot be registered.
    pub fn when_ready(&self, callback: impl FnOnce() + 'static) -> Result<()> {
        if self.is_loading() {
            self.on_content_loaded(callback)
        } else {
            callback();
            Ok(())
        }
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn query_selector(&self, selectors: &str) -> Option<WebElement> {
        self.0.query_selector(selectors).ok().flatten().map(WebElement)
    }

    fn query_selector_all(&self, selectors: &str) -> Vec<WebElement> {
        let Ok(nodes) = self.0.query_selector_all(selectors) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct WebElement(web_sys::Element);

impl WebElement {
    fn as_input(&self) -> Option<&HtmlInputElement> {
        self.0.dyn_ref::<HtmlInputElement>()
    }

    fn as_html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }
}

impl Element for WebElement {
    fn set_checked(&self, checked: bool) {
        if let Some(input) = self.as_input() {
            input.set_checked(checked);
        }
    }

    fn is_checked(&self) -> bool {
        self.as_input().is_some_and(HtmlInputElement::checked)
    }

    fn set_style_property(&self, name: &str, value: &str) {
        if let Some(element) = self.as_html() {
            if let Err(err) = element.style().set_property(name, value) {
                warn!(property = name, value, error = ?err, "style write rejected");
            }
        }
    }

    fn style_property(&self, name: &str) -> String {
        self.as_html()
            .and_then(|element| element.style().get_property_value(name).ok())
            .unwrap_or_default()
    }

    fn input_type(&self) -> Option<String> {
        self.as_input().map(HtmlInputElement::type_)
    }

    fn set_input_type(&self, value: &str) {
        if let Some(input) = self.as_input() {
            input.set_type(value);
        }
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn previous_element_sibling(&self) -> Option<Self> {
        self.0.previous_element_sibling().map(WebElement)
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn click(&self) {
        if let Some(element) = self.as_html() {
            element.click();
        }
    }

    fn add_click_listener(&self, mut listener: ClickListener) -> Result<()> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            listener(&WebClickEvent(event));
        });
        self.0
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(listener_error)?;
        closure.forget();
        Ok(())
    }
}

struct WebClickEvent(web_sys::Event);

impl ClickEvent for WebClickEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// Schedules callbacks with `setTimeout` through `gloo-timers`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, callback).forget();
    }
}

fn listener_error(err: JsValue) -> Error {
    Error::Listener(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
