//! Race Events
//!
//! ## Overview
//!
//! The engine reports what happened during a tick as a small closed set of
//! point-in-time events. Presentation code (web dashboard, display, announcer)
//! consumes them through an [`EventSink`].
//!
//! ```text
//! start()   tick ... tick        tick ... tick          stop()
//!    │        │        │           │         │             │
//! Countdown(3) Countdown(2) Countdown(1) RaceStarted  LapCompleted ... RaceFinished
//! ```
//!
//! ## Delivery semantics
//!
//! Events are fire-and-forget. There is no acknowledgment and no backlog: a
//! sink that is full, or a consumer that is not listening, loses the event for
//! good. Lap durations stay available in the lap ring, so a late consumer can
//! still poll the latest one.
//!
//! ## Memory Model
//!
//! Every variant is `Copy` and fits in 8 bytes, so events move through fixed
//! queues without allocation.

use heapless::Vec;

use crate::constants::buffers::{DEFAULT_EVENT_LOG_SIZE, EVENT_QUEUE_SIZE};
use crate::traits::EventSink;

/// Engine-to-web queue, split into a producer for the engine and a consumer
/// for the feed
pub type EventQueue = heapless::spsc::Queue<RaceEvent, EVENT_QUEUE_SIZE>;

/// Something the engine wants the outside world to know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum RaceEvent {
    /// Countdown beep; carries 3, 2, then 1
    CountdownTick {
        /// Beeps left including this one
        remaining: u8,
    },

    /// Race clock started
    RaceStarted,

    /// A gate crossing closed a lap
    LapCompleted {
        /// Ring slot of the lap (0-based, wraps with the ring)
        lap: u8,
        /// Lap duration in milliseconds
        duration_ms: u32,
    },

    /// Race stopped
    RaceFinished,
}

impl RaceEvent {
    /// Short name for logs
    pub const fn name(&self) -> &'static str {
        match self {
            RaceEvent::CountdownTick { .. } => "countdown",
            RaceEvent::RaceStarted => "race_started",
            RaceEvent::LapCompleted { .. } => "lap_completed",
            RaceEvent::RaceFinished => "race_finished",
        }
    }
}

/// Fixed-capacity event buffer
///
/// Drops new events once full and counts them. Drain it from the same
/// context the engine runs in; for a cross-context handoff use a
/// `heapless::spsc::Producer` as the sink instead.
#[derive(Debug, Clone, Default)]
pub struct EventLog<const N: usize = DEFAULT_EVENT_LOG_SIZE> {
    events: Vec<RaceEvent, N>,
    dropped: u32,
}

impl<const N: usize> EventLog<N> {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            dropped: 0,
        }
    }

    /// Events received since the last drain
    pub fn events(&self) -> &[RaceEvent] {
        &self.events
    }

    /// Remove and return everything buffered, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = RaceEvent> + '_ {
        // heapless 0.8 Vec has no drain(); take the storage and iterate it
        core::mem::take(&mut self.events).into_iter()
    }

    /// Events lost because the log was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discard everything buffered
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<const N: usize> EventSink for EventLog<N> {
    fn emit(&mut self, event: RaceEvent) {
        if self.events.push(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            log_warn!("Event log full, dropped {}", event.name());
        }
    }
}

/// Outbound channel to another context
impl<'a, const N: usize> EventSink for heapless::spsc::Producer<'a, RaceEvent, N> {
    fn emit(&mut self, event: RaceEvent) {
        if self.enqueue(event).is_err() {
            log_warn!("Event queue full, dropped {}", event.name());
        }
    }
}

#[cfg(feature = "std")]
impl EventSink for std::vec::Vec<RaceEvent> {
    fn emit(&mut self, event: RaceEvent) {
        self.push(event);
    }
}
