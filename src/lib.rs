//! Client-side behaviors for the combined login/signup page.
//!
//! The page is rendered by the server; this crate only attaches behavior to
//! the markup once it has loaded:
//!
//! - **Tabs:** clicking the login or signup label checks the matching radio
//!   control and slides `.form-inner` to `0%` or `-100%`.
//! - **Signup link:** `#signup-link` opens the signup tab instead of navigating.
//! - **Password toggles:** every `.toggle-password` icon flips the input right
//!   before it between masked and plain text.
//! - **Flash message:** the first `.message` fades out after ten seconds and is
//!   removed half a second later.
//!
//! Missing markup disables only the feature that needs it. The behaviors are
//! written against the traits in [`dom`], so they run unchanged in the browser
//! (through `web-sys`) and in native tests.

pub mod behaviors;
pub mod build_info;
pub mod config;
pub mod dom;
pub mod error;
pub mod telemetry;

pub use behaviors::{PageBehaviors, Wiring};
pub use config::{BehaviorConfig, FlashTiming};
pub use error::{Error, Result};

#[cfg(target_arch = "wasm32")]
pub mod entry {
    use crate::dom::web::{WebDocument, WebScheduler};
    use crate::{BehaviorConfig, PageBehaviors, build_info, telemetry};
    use tracing::{info, warn};
    use wasm_bindgen::prelude::*;

    /// Module start: installs logging, then wires the page once the DOM is
    /// parsed. A logging failure is reported on the console and does not stop
    /// the behaviors from attaching.
    ///
    /// # Errors
    /// Returns the error text if the document is unavailable or the ready
    /// listener cannot be registered.
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let (config, rejected) = BehaviorConfig::load();
        if let Err(err) = telemetry::init(config.log_level) {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "authpage: logging disabled: {err}"
            )));
        }
        if let Some(err) = rejected {
            warn!(%err, "ignoring runtime config");
        }
        info!(
            version = build_info::version(),
            commit = build_info::GIT_COMMIT_HASH,
            "authpage starting"
        );

        let document = WebDocument::from_window().map_err(to_js)?;
        let target = document.clone();
        document
            .when_ready(move || {
                PageBehaviors::init(&target, &WebScheduler, &config);
            })
            .map_err(to_js)
    }

    fn to_js(err: crate::Error) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
