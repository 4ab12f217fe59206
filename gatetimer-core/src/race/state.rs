use crate::constants::timing::{COUNTDOWN_BEEPS, COUNTDOWN_STEP_MS};
use crate::time::{elapsed_or_zero, elapsed_since, Timestamp};

/// Race phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum RaceState {
    /// No race; only the RSSI is tracked
    #[default]
    Stopped,
    /// 3-2-1 beeps before the clock starts
    Countdown,
    /// Waiting for the first gate crossing to start the clock (hole shot)
    Armed,
    /// Clock running, laps being recorded
    Running,
}

impl RaceState {
    /// Lowercase name for logs
    pub const fn name(self) -> &'static str {
        match self {
            RaceState::Stopped => "stopped",
            RaceState::Countdown => "countdown",
            RaceState::Armed => "armed",
            RaceState::Running => "running",
        }
    }
}

/// Beep schedule of a running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownState {
    /// When `start()` was called
    pub start_time: Timestamp,
    /// Beeps not yet played, counting the one at `start_time`
    pub beeps_remaining: u8,
}

impl CountdownState {
    /// Countdown whose first beep plays at `now`
    pub const fn begin(now: Timestamp) -> Self {
        Self {
            start_time: now,
            beeps_remaining: COUNTDOWN_BEEPS,
        }
    }

    /// Time since start; `None` if `now` predates it
    pub fn elapsed(&self, now: Timestamp) -> Option<u64> {
        elapsed_since(now, self.start_time)
    }

    /// Time since start, stale clocks reading as zero
    pub fn elapsed_or_zero(&self, now: Timestamp) -> u64 {
        elapsed_or_zero(now, self.start_time)
    }

    /// Offset of the next beep from `start_time` (1000, 2000, 3000 ms)
    pub fn next_beep_at(&self) -> u64 {
        u64::from(COUNTDOWN_BEEPS + 1 - self.beeps_remaining.min(COUNTDOWN_BEEPS)) * COUNTDOWN_STEP_MS
    }
}
