//! Deterministic stand-in for `setTimeout`. Time only moves when a test calls
//! [`ManualClock::advance`], and callbacks fire in due order, ties broken by
//! scheduling order.

use authpage::dom::Scheduler;
use std::{cell::RefCell, rc::Rc};

struct Pending {
    due_ms: u64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ClockState {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

#[derive(Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of callbacks waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Moves time forward by `ms`, running every callback that comes due,
    /// including callbacks scheduled by callbacks along the way.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms() + ms;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.due_ms <= target)
                    .min_by_key(|(_, pending)| (pending.due_ms, pending.seq))
                    .map(|(index, _)| index);
                let Some(index) = due else {
                    break;
                };
                let next = state.pending.remove(index);
                state.now_ms = next.due_ms;
                next
            };
            (next.callback)();
        }
        self.state.borrow_mut().now_ms = target;
    }
}

impl Scheduler for ManualClock {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        let pending = Pending {
            due_ms: state.now_ms + u64::from(delay_ms),
            seq: state.next_seq,
            callback,
        };
        state.next_seq += 1;
        state.pending.push(pending);
    }
}
