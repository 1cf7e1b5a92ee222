//! Evaluation throttling
//!
//! The first event of a quiet period opens a window of `window_ms`. Events
//! arriving while the window is open collapse into it, and a single
//! evaluation runs when it closes. The next event after that opens a new
//! window. A zero window means "evaluate synchronously on every event".

use std::cell::Cell;

use inscroll_platform::{ScrollHost, TimerId};

/// What happened to an incoming event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// No throttling, the caller evaluates now
    Immediate,
    /// A new window was opened, evaluation runs when it closes
    Scheduled,
    /// A window is already open, the event was absorbed
    Collapsed,
}

/// Single-window throttle backed by host timers
#[derive(Debug)]
pub struct Throttle {
    window_ms: u64,
    pending: Cell<Option<TimerId>>,
}

impl Throttle {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: Cell::new(None),
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn is_immediate(&self) -> bool {
        self.window_ms == 0
    }

    /// Whether a window is open
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Route an incoming event
    ///
    /// `on_close` is handed to the host only when a new window opens; it must
    /// call [`Throttle::complete`] before evaluating.
    pub fn request<F>(&self, host: &dyn ScrollHost, on_close: F) -> ThrottleDecision
    where
        F: FnOnce() + 'static,
    {
        if self.is_immediate() {
            return ThrottleDecision::Immediate;
        }
        if self.is_pending() {
            return ThrottleDecision::Collapsed;
        }

        let id = host.set_timeout(self.window_ms, Box::new(on_close));
        self.pending.set(Some(id));
        ThrottleDecision::Scheduled
    }

    /// Mark the open window as closed
    pub fn complete(&self) {
        self.pending.set(None);
    }

    /// Close the open window without evaluating
    pub fn cancel(&self, host: &dyn ScrollHost) {
        if let Some(id) = self.pending.take() {
            host.clear_timeout(id);
        }
    }
}
