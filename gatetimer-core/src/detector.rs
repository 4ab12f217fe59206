//! Peak/Threshold Gate-Crossing Detector
//!
//! ## Overview
//!
//! A drone passing the timing gate produces a hump in filtered RSSI: the
//! signal rises as the drone enters the antenna cone, peaks when it is closest
//! and falls as it leaves. The detector recognises that shape with two
//! thresholds and a running maximum:
//!
//! ```text
//!  RSSI
//!   │            peak ●            ← claimed: ≥ enter, highest so far
//!   │          ╱       ╲
//!   │ enter ──╱─────────╲──────
//!   │        ╱           ╲
//!   │ exit ─╱─────────────╲────
//!   │      ╱               ● confirmed: < peak and < exit
//!   └──────────────────────────── time
//! ```
//!
//! 1. [`PeakDetector::capture`] claims a peak while the sample is at or above
//!    the enter threshold and higher than anything seen in this lap window.
//! 2. [`PeakDetector::is_captured`] confirms the crossing once the sample has
//!    dropped below both the claimed peak and the exit threshold.
//!
//! The asymmetric pair gives hysteresis: noise around one level cannot both
//! claim and confirm a peak. The crossing time is the time of the *peak*, not
//! of the tick that confirmed it, so scheduler jitter between the two never
//! ends up in the lap time.
//!
//! ## Misconfiguration
//!
//! Nothing here checks `exit < enter`. With `exit` at or above `enter` a
//! plateau just above `enter` confirms as soon as it dips, and with `exit`
//! of 0 nothing ever confirms. Both are observable as wrong or missing laps;
//! [`crate::RaceConfig::validate`] rejects such settings before they are saved.

use crate::config::Thresholds;
use crate::time::Timestamp;

/// Running maximum of the current lap window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeakCapture {
    /// Highest filtered sample so far (0 = nothing claimed)
    pub value: u8,
    /// Timestamp of the last increase
    pub time: Timestamp,
}

impl PeakCapture {
    /// Sentinel for "no peak claimed in this window"
    pub const NONE: Self = Self { value: 0, time: 0 };
}

/// Gate-crossing detector
///
/// Holds only the current lap window's peak. The race state machine resets it
/// at the start of every window.
#[derive(Debug, Clone, Default)]
pub struct PeakDetector {
    peak: PeakCapture,
}

impl PeakDetector {
    /// Create a detector with no peak claimed
    pub const fn new() -> Self {
        Self { peak: PeakCapture::NONE }
    }

    /// Claim `sample` as the peak if it is at or above enter and a new maximum
    pub fn capture(&mut self, sample: u8, now: Timestamp, thresholds: &Thresholds) {
        if sample >= thresholds.enter_rssi && sample > self.peak.value {
            self.peak = PeakCapture { value: sample, time: now };
        }
    }

    /// Whether the claimed peak is confirmed by `sample`
    pub fn is_captured(&self, sample: u8, thresholds: &Thresholds) -> bool {
        sample < self.peak.value && sample < thresholds.exit_rssi
    }

    /// Start a new lap window
    pub fn reset(&mut self) {
        self.peak = PeakCapture::NONE;
    }

    /// Current peak
    pub fn peak(&self) -> PeakCapture {
        self.peak
    }
}
