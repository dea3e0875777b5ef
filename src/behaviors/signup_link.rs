use crate::dom::{ClickEvent, Document, Element};
use crate::error::Result;
use tracing::debug;

use super::{SIGNUP_LINK, SIGNUP_TAB};

/// Makes `#signup-link` act like a click on the signup tab instead of
/// navigating. Returns `Ok(false)` when the link or the signup tab is absent.
///
/// # Errors
/// Returns an error if the click listener cannot be registered.
pub fn attach<D: Document>(document: &D) -> Result<bool> {
    let Some(link) = document.query_selector(SIGNUP_LINK) else {
        debug!("signup link not found");
        return Ok(false);
    };
    let Some(signup_tab) = document.query_selector(SIGNUP_TAB) else {
        debug!("signup link present without a signup tab, shortcut disabled");
        return Ok(false);
    };

    link.add_click_listener(Box::new(move |event: &dyn ClickEvent| {
        event.prevent_default();
        signup_tab.click();
    }))?;

    Ok(true)
}
