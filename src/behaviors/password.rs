//! Show/hide toggles for password inputs. Each toggle icon controls the input
//! placed right before it and its glyph always mirrors that input's state.

use crate::dom::{ClickEvent, Document, Element};
use crate::error::{Error, Result};
use tracing::{debug, warn};

use super::TOGGLE_PASSWORD;

/// Glyph offered while the password is masked.
pub const REVEAL_GLYPH: &str = "\u{1F441}\u{FE0F}";
/// Glyph offered while the password is readable.
pub const HIDE_GLYPH: &str = "\u{1F648}";

const MASKED_TYPE: &str = "password";
const REVEALED_TYPE: &str = "text";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Masked,
    Revealed,
}

impl Visibility {
    /// Reads the state from an input `type`. Anything other than `password`
    /// counts as revealed.
    #[must_use]
    pub fn from_input_type(input_type: &str) -> Self {
        if input_type == MASKED_TYPE {
            Visibility::Masked
        } else {
            Visibility::Revealed
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Visibility::Masked => Visibility::Revealed,
            Visibility::Revealed => Visibility::Masked,
        }
    }

    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Visibility::Masked => MASKED_TYPE,
            Visibility::Revealed => REVEALED_TYPE,
        }
    }

    /// Icon glyph shown for this state: the action the next click performs.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Visibility::Masked => REVEAL_GLYPH,
            Visibility::Revealed => HIDE_GLYPH,
        }
    }
}

/// Flips the input preceding `icon` and updates the icon glyph.
///
/// # Errors
/// Returns `Error::MissingPasswordInput` when nothing precedes the icon and
/// `Error::NotAnInput` when the preceding element is not an input. The page is
/// left untouched in both cases.
pub fn toggle<E: Element>(icon: &E) -> Result<Visibility> {
    let input = icon
        .previous_element_sibling()
        .ok_or(Error::MissingPasswordInput)?;
    let current = input.input_type().ok_or(Error::NotAnInput)?;

    let next = Visibility::from_input_type(&current).toggled();
    input.set_input_type(next.input_type());
    icon.set_text_content(next.glyph());
    Ok(next)
}

/// Wires every toggle icon on the page and returns how many were wired.
///
/// # Errors
/// Returns an error if a click listener cannot be registered.
pub fn attach<D: Document>(document: &D) -> Result<usize> {
    let icons = document.query_selector_all(TOGGLE_PASSWORD);
    for icon in &icons {
        let target = icon.clone();
        icon.add_click_listener(Box::new(move |_: &dyn ClickEvent| match toggle(&target) {
            Ok(visibility) => debug!(?visibility, "password visibility toggled"),
            Err(err) => warn!(%err, "password toggle ignored"),
        }))?;
    }

    if icons.is_empty() {
        debug!("no password toggles found");
    }
    Ok(icons.len())
}
