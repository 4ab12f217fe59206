//! One-line race status for the small display
//!
//! The display is 72×40 px, so the text is short and fixed: "Wait start",
//! "Start 2", "GO!", "Starting...", "Lap0 started", "Lap3: 14.25s".

use core::fmt::{self, Write};

use heapless::String;

use super::state::RaceState;
use crate::constants::timing::{COUNTDOWN_BEEPS, COUNTDOWN_STEP_MS};

/// Longest rendered status ("Lap255: 4294967.30s")
pub const STATUS_CAPACITY: usize = 24;

/// What the status line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RaceStatus {
    /// "Wait start"
    Waiting,
    /// "Start N", or "GO!" once `remaining` hits zero
    Countdown {
        /// Whole seconds left
        remaining: u8,
    },
    /// "Starting..."
    Armed,
    /// "Lap0 started"
    FirstLap,
    /// "LapN: S.SSs"
    Lap {
        /// Laps recorded since the ring last wrapped
        count: usize,
        /// Most recent lap duration
        duration_ms: u32,
    },
}

impl RaceStatus {
    /// Status for a given engine snapshot
    ///
    /// `countdown_elapsed_ms` is only read in `Countdown`, `latest_lap_ms`
    /// only in `Running`.
    pub fn compute(
        state: RaceState,
        countdown_elapsed_ms: u64,
        lap_count: usize,
        latest_lap_ms: u32,
    ) -> Self {
        match state {
            RaceState::Stopped => RaceStatus::Waiting,
            RaceState::Countdown => {
                let seconds = countdown_elapsed_ms / COUNTDOWN_STEP_MS;
                let remaining = u64::from(COUNTDOWN_BEEPS).saturating_sub(seconds) as u8;
                RaceStatus::Countdown { remaining }
            }
            RaceState::Armed => RaceStatus::Armed,
            RaceState::Running if lap_count == 0 => RaceStatus::FirstLap,
            RaceState::Running => RaceStatus::Lap {
                count: lap_count,
                duration_ms: latest_lap_ms,
            },
        }
    }

    /// Render into a fixed buffer
    pub fn render(&self) -> String<STATUS_CAPACITY> {
        let mut text = String::new();
        // Capacity covers the longest case
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for RaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RaceStatus::Waiting => f.write_str("Wait start"),
            RaceStatus::Countdown { remaining: 0 } => f.write_str("GO!"),
            RaceStatus::Countdown { remaining } => write!(f, "Start {}", remaining),
            RaceStatus::Armed => f.write_str("Starting..."),
            RaceStatus::FirstLap => f.write_str("Lap0 started"),
            RaceStatus::Lap { count, duration_ms } => {
                let hundredths = (u64::from(duration_ms) + 5) / 10;
                write!(f, "Lap{}: {}.{:02}s", count, hundredths / 100, hundredths % 100)
            }
        }
    }
}
