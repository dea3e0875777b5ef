//! Login/signup tab switching. The sliding container holds both forms side by
//! side; the tab decides how far it is shifted.

use crate::dom::{ClickEvent, Document, Element, MARGIN_LEFT};
use crate::error::Result;
use std::fmt;
use tracing::{debug, warn};

use super::{FORM_INNER, LOGIN_CONTROL, LOGIN_TAB, SIGNUP_CONTROL, SIGNUP_TAB};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Login,
    Signup,
}

impl Tab {
    /// Container offset that brings this tab's form into view.
    #[must_use]
    pub const fn offset(self) -> &'static str {
        match self {
            Tab::Login => "0%",
            Tab::Signup => "-100%",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Login => formatter.write_str("login"),
            Tab::Signup => formatter.write_str("signup"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TabSwitcher<E> {
    login_control: E,
    signup_control: E,
    container: E,
}

impl<E: Element> TabSwitcher<E> {
    /// Finds both radio controls and the sliding container.
    ///
    /// Returns `None` if any of them is missing.
    pub fn locate<D: Document<Element = E>>(document: &D) -> Option<Self> {
        Some(Self {
            login_control: document.query_selector(LOGIN_CONTROL)?,
            signup_control: document.query_selector(SIGNUP_CONTROL)?,
            container: document.query_selector(FORM_INNER)?,
        })
    }

    /// Checks the tab's control and slides its form into view. Reapplying the
    /// active tab is harmless.
    pub fn select(&self, tab: Tab) {
        let control = match tab {
            Tab::Login => &self.login_control,
            Tab::Signup => &self.signup_control,
        };
        control.set_checked(true);
        self.container.set_style_property(MARGIN_LEFT, tab.offset());
    }
}

/// Wires the tab labels. Returns `Ok(false)` when the page has no tabs.
///
/// Listeners cannot be detached, so a registration failure on the signup
/// label leaves the login label wired. That label still switches tabs; the
/// failure is logged with the labels that kept their listener.
///
/// # Errors
/// Returns an error if a click listener cannot be registered.
pub fn attach<D: Document>(document: &D) -> Result<bool> {
    let Some(switcher) = TabSwitcher::locate(document) else {
        debug!("tab controls not found, tab switching disabled");
        return Ok(false);
    };
    let (Some(login_tab), Some(signup_tab)) = (
        document.query_selector(LOGIN_TAB),
        document.query_selector(SIGNUP_TAB),
    ) else {
        debug!("tab labels not found, tab switching disabled");
        return Ok(false);
    };

    let mut wired = Vec::with_capacity(2);
    for (label, tab) in [(login_tab, Tab::Login), (signup_tab, Tab::Signup)] {
        let switcher = switcher.clone();
        let registered = label.add_click_listener(Box::new(move |_: &dyn ClickEvent| {
            switcher.select(tab);
            debug!(%tab, "tab selected");
        }));
        if let Err(err) = registered {
            if !wired.is_empty() {
                warn!(failed = %tab, ?wired, "tab labels partially wired");
            }
            return Err(err);
        }
        wired.push(tab);
    }

    Ok(true)
}
