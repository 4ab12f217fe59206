//! Fixed-Size Rings for Lap Times and RSSI Samples
//!
//! ## Overview
//!
//! Both rings are sized at compile time through const generics and never
//! allocate. They differ from a general-purpose ring buffer in what they
//! promise to readers:
//!
//! - [`LapHistory`] keeps the last `N` lap durations and remembers whether it
//!   has ever wrapped during the current race. The "most recent lap" accessor
//!   is read-once: it clears a single dirty flag.
//! - [`RssiHistory`] is a single write-cursor ring of filtered samples. Only
//!   the latest sample is ever read back; there is no windowed iteration.
//!
//! ## Lap ring index arithmetic
//!
//! ```text
//! LapHistory<10> after 12 laps:
//! ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//! │ L11 │ L12 │ L3  │ L4  │ L5  │ L6  │ L7  │ L8  │ L9  │ L10 │
//! └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!    0     1     2  ↑                                     9
//!                   └── cursor = 2, has_wrapped = true
//!
//! most recent = slot (cursor == 0 ? N-1 : cursor-1) = slot 1 = L12
//! ```
//!
//! The cursor is also the lap counter the rest of the engine sees, so after a
//! wrap "lap count" restarts from 0 while `has_wrapped` stays set until the
//! race is cleared.
//!
//! ## Lost laps
//!
//! The available flag is one bit, not a queue. If two laps complete between
//! two polls the first one is never reported as new; its duration is still in
//! the ring and was still announced through the lap event.

use crate::constants::buffers::{LAP_HISTORY_SIZE, RSSI_HISTORY_SIZE};

/// Ring of completed lap durations
#[derive(Debug, Clone)]
pub struct LapHistory<const N: usize = LAP_HISTORY_SIZE> {
    laps: [u32; N],
    /// Next slot to write; doubles as the lap counter
    cursor: usize,
    has_wrapped: bool,
    available: bool,
}

impl<const N: usize> LapHistory<N> {
    /// Creates an empty ring
    pub const fn new() -> Self {
        assert!(N > 0, "lap history needs at least one slot");
        Self {
            laps: [0; N],
            cursor: 0,
            has_wrapped: false,
            available: false,
        }
    }

    /// Store a lap duration, returning the slot it went into
    pub fn record(&mut self, duration_ms: u32) -> usize {
        let slot = self.cursor % N;
        self.laps[slot] = duration_ms;

        if (slot + 1) % N == 0 {
            self.has_wrapped = true;
        }

        self.cursor = (slot + 1) % N;
        self.available = true;
        slot
    }

    /// Duration of the most recently completed lap, clearing the new-lap flag
    pub fn most_recent(&mut self) -> u32 {
        self.available = false;
        self.latest()
    }

    /// Duration of the most recently completed lap without touching the flag
    pub fn latest(&self) -> u32 {
        self.laps[self.latest_slot()]
    }

    /// Slot holding the most recently completed lap
    pub fn latest_slot(&self) -> usize {
        if self.cursor == 0 { N - 1 } else { self.cursor - 1 }
    }

    /// Whether a lap completed since the last [`Self::most_recent`]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Laps recorded since the last wrap
    pub fn lap_count(&self) -> usize {
        self.cursor
    }

    /// Whether the ring has wrapped during this race
    pub fn has_wrapped(&self) -> bool {
        self.has_wrapped
    }

    /// Raw slot contents (0 = never written this race)
    pub fn slot(&self, index: usize) -> Option<u32> {
        self.laps.get(index).copied()
    }

    /// Ring capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Forget every lap
    pub fn clear(&mut self) {
        self.laps = [0; N];
        self.cursor = 0;
        self.has_wrapped = false;
        self.available = false;
    }
}

impl<const N: usize> Default for LapHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ring of filtered RSSI samples with a single write cursor
#[derive(Debug, Clone)]
pub struct RssiHistory<const N: usize = RSSI_HISTORY_SIZE> {
    samples: [u8; N],
    cursor: usize,
}

impl<const N: usize> RssiHistory<N> {
    /// Creates a ring full of zeros
    pub const fn new() -> Self {
        assert!(N > 0, "RSSI history needs at least one slot");
        Self {
            samples: [0; N],
            cursor: 0,
        }
    }

    /// Write the sample for this tick and advance the cursor
    pub fn push(&mut self, sample: u8) {
        self.samples[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % N;
    }

    /// Most recently written sample
    pub fn latest(&self) -> u8 {
        let idx = if self.cursor == 0 { N - 1 } else { self.cursor - 1 };
        self.samples[idx]
    }

    /// Zero the ring and rewind the cursor
    pub fn clear(&mut self) {
        self.samples = [0; N];
        self.cursor = 0;
    }
}

impl<const N: usize> Default for RssiHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}
