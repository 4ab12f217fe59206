//! Race control requests from other contexts
//!
//! Buttons and the web server run outside the primary loop and must not touch
//! the engine directly. They post a request here; the engine takes it at the
//! top of its next tick via [`crate::LapTimer::drain_control`].
//!
//! The latch holds one request. A newer request replaces an unconsumed older
//! one, so a stop pressed right after a start is never lost behind it.

use core::sync::atomic::{AtomicU8, Ordering};

const EMPTY: u8 = 0;

/// What the outside world asked the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ControlRequest {
    /// Begin the 3-2-1 countdown
    Start = 1,
    /// End the race
    Stop = 2,
    /// Wait for the first gate crossing to start the clock
    Arm = 3,
}

impl ControlRequest {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(ControlRequest::Start),
            2 => Some(ControlRequest::Stop),
            3 => Some(ControlRequest::Arm),
            _ => None,
        }
    }
}

/// Single-slot, latest-wins request latch
#[derive(Debug, Default)]
pub struct ControlLatch {
    pending: AtomicU8,
}

impl ControlLatch {
    /// Empty latch
    pub const fn new() -> Self {
        Self { pending: AtomicU8::new(EMPTY) }
    }

    /// Post a request, replacing any unconsumed one
    pub fn request(&self, request: ControlRequest) {
        self.pending.store(request as u8, Ordering::Release);
    }

    /// Shorthand for `request(ControlRequest::Start)`
    pub fn request_start(&self) {
        self.request(ControlRequest::Start);
    }

    /// Shorthand for `request(ControlRequest::Stop)`
    pub fn request_stop(&self) {
        self.request(ControlRequest::Stop);
    }

    /// Shorthand for `request(ControlRequest::Arm)`
    pub fn request_arm(&self) {
        self.request(ControlRequest::Arm);
    }

    /// Take the pending request, leaving the latch empty
    pub fn take(&self) -> Option<ControlRequest> {
        ControlRequest::from_raw(self.pending.swap(EMPTY, Ordering::AcqRel))
    }

    /// Whether a request is waiting
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire) != EMPTY
    }
}
