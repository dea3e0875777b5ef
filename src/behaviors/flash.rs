//! Auto-dismiss for the server-rendered flash message: fade after a delay,
//! then drop it from the document.

use crate::config::FlashTiming;
use crate::dom::{Document, Element, OPACITY, Scheduler};
use std::{cell::Cell, rc::Rc};
use tracing::debug;

use super::FLASH_MESSAGE;

/// Flash categories rendered by the server as extra classes on the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    pub fn of<E: Element>(message: &E) -> Self {
        if message.has_class("error") {
            FlashKind::Error
        } else if message.has_class("success") {
            FlashKind::Success
        } else {
            FlashKind::Info
        }
    }
}

/// Handle to a scheduled dismissal. Dropping it leaves the timers running.
#[derive(Clone, Debug, Default)]
pub struct FlashDismissal {
    cancelled: Rc<Cell<bool>>,
}

impl FlashDismissal {
    /// Turns any pending fade or removal into a no-op.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Fades `message` after `timing.dismiss_after_ms`, then removes it
/// `timing.fade_ms` later. A message that is no longer attached when a timer
/// fires is left alone.
pub fn schedule_dismissal<E: Element, S: Scheduler>(
    message: E,
    scheduler: &S,
    timing: FlashTiming,
) -> FlashDismissal {
    let dismissal = FlashDismissal::default();
    let cancelled = Rc::clone(&dismissal.cancelled);
    let inner_scheduler = scheduler.clone();

    scheduler.set_timeout(
        timing.dismiss_after_ms,
        Box::new(move || {
            if cancelled.get() {
                return;
            }
            if message.is_connected() {
                message.set_style_property(OPACITY, "0");
            } else {
                debug!("flash message detached before fade");
            }

            inner_scheduler.set_timeout(
                timing.fade_ms,
                Box::new(move || {
                    if cancelled.get() {
                        return;
                    }
                    if message.is_connected() {
                        message.remove();
                        debug!("flash message removed");
                    }
                }),
            );
        }),
    );

    dismissal
}

/// Schedules dismissal of the first flash message, if the page has one.
pub fn attach<D: Document, S: Scheduler>(
    document: &D,
    scheduler: &S,
    timing: FlashTiming,
) -> Option<FlashDismissal> {
    let Some(message) = document.query_selector(FLASH_MESSAGE) else {
        debug!("no flash message on page");
        return None;
    };

    let kind = FlashKind::of(&message);
    debug!(
        ?kind,
        dismiss_after_ms = timing.dismiss_after_ms,
        "flash message scheduled for dismissal"
    );
    Some(schedule_dismissal(message, scheduler, timing))
}
