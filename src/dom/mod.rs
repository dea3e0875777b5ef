//! The slice of the DOM the page behaviors touch.
//!
//! Behaviors are written against these traits rather than `web-sys` directly.
//! The browser binding lives in [`web`]; tests drive the same code through the
//! in-memory document in the `test_support` crate.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::error::Result;

/// Style property holding the tab container's horizontal offset.
pub const MARGIN_LEFT: &str = "margin-left";
pub const OPACITY: &str = "opacity";

/// A click delivered to a listener.
pub trait ClickEvent {
    fn prevent_default(&self);
}

pub type ClickListener = Box<dyn FnMut(&dyn ClickEvent)>;

pub trait Element: Clone + 'static {
    /// Sets the checked state of a checkbox or radio input. No-op for other elements.
    fn set_checked(&self, checked: bool);

    fn is_checked(&self) -> bool;

    /// Sets an inline style property using its CSS name (`margin-left`, not `marginLeft`).
    fn set_style_property(&self, name: &str, value: &str);

    /// Inline style value, empty when unset.
    fn style_property(&self, name: &str) -> String;

    /// The `type` of an `<input>`, or `None` when the element is not an input.
    fn input_type(&self) -> Option<String>;

    fn set_input_type(&self, value: &str);

    fn text_content(&self) -> String;

    fn set_text_content(&self, text: &str);

    fn has_class(&self, class: &str) -> bool;

    fn previous_element_sibling(&self) -> Option<Self>;

    /// Whether the element is still attached to the document.
    fn is_connected(&self) -> bool;

    /// Detaches the element. Detaching an already detached element does nothing.
    fn remove(&self);

    /// Dispatches a synthetic click, running every registered click listener.
    fn click(&self);

    /// Registers a click listener for the lifetime of the page.
    ///
    /// # Errors
    /// Returns `Error::Listener` if the platform rejects the callback.
    fn add_click_listener(&self, listener: ClickListener) -> Result<()>;
}

pub trait Document {
    type Element: Element;

    /// First element matching `selectors`, in document order.
    fn query_selector(&self, selectors: &str) -> Option<Self::Element>;

    fn query_selector_all(&self, selectors: &str) -> Vec<Self::Element>;
}

/// One-shot timers on the page's event loop.
pub trait Scheduler: Clone + 'static {
    /// Runs `callback` once after `delay_ms`. There is no cancellation; callers
    /// that need it guard the callback themselves.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}
