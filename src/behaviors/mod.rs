//! Page behaviors for the combined login/signup page.
//!
//! Every feature is optional: it is wired only when the markup it relies on is
//! present, and a feature that cannot be wired never prevents the others from
//! being wired. Missing markup is logged at debug level and otherwise silent.

pub mod flash;
pub mod password;
pub mod signup_link;
pub mod tabs;

use crate::config::BehaviorConfig;
use crate::dom::{Document, Scheduler};
use tracing::{debug, warn};

pub use flash::{FlashDismissal, FlashKind};
pub use password::Visibility;
pub use tabs::{Tab, TabSwitcher};

pub const LOGIN_CONTROL: &str = "input[type=radio]#login";
pub const SIGNUP_CONTROL: &str = "input[type=radio]#signup";
pub const LOGIN_TAB: &str = "label.login";
pub const SIGNUP_TAB: &str = "label.signup";
pub const FORM_INNER: &str = ".form-inner";
pub const SIGNUP_LINK: &str = "#signup-link";
pub const TOGGLE_PASSWORD: &str = ".toggle-password";
pub const FLASH_MESSAGE: &str = ".message";

/// What [`PageBehaviors::init`] attached to the page.
#[derive(Debug, Default)]
pub struct Wiring {
    pub tabs: bool,
    pub signup_link: bool,
    pub password_toggles: usize,
    pub flash: Option<FlashDismissal>,
}

pub struct PageBehaviors;

impl PageBehaviors {
    /// Wires all behaviors once against a loaded document.
    pub fn init<D: Document, S: Scheduler>(
        document: &D,
        scheduler: &S,
        config: &BehaviorConfig,
    ) -> Wiring {
        let wiring = Wiring {
            tabs: tabs::attach(document).unwrap_or_else(|err| {
                warn!(%err, "tab switching disabled");
                false
            }),
            signup_link: signup_link::attach(document).unwrap_or_else(|err| {
                warn!(%err, "signup link shortcut disabled");
                false
            }),
            password_toggles: password::attach(document).unwrap_or_else(|err| {
                warn!(%err, "password toggles disabled");
                0
            }),
            flash: flash::attach(document, scheduler, config.flash),
        };

        debug!(
            tabs = wiring.tabs,
            signup_link = wiring.signup_link,
            password_toggles = wiring.password_toggles,
            flash = wiring.flash.is_some(),
            "page behaviors wired"
        );
        wiring
    }
}
