//! Timing Constants
//!
//! Countdown schedule, lap gating and loop periods. All values are
//! milliseconds on the device's monotonic clock.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per tenth of a second (unit of the persisted minimum lap).
pub const MS_PER_TENTH: u32 = 100;

// ===== RACE COUNTDOWN =====

/// Number of countdown beeps before the start tone (3, 2, 1).
pub const COUNTDOWN_BEEPS: u8 = 3;

/// Spacing between countdown beeps.
pub const COUNTDOWN_STEP_MS: u64 = 1000;

/// Length of the whole countdown; the race starts when it elapses.
pub const COUNTDOWN_WINDOW_MS: u64 = COUNTDOWN_BEEPS as u64 * COUNTDOWN_STEP_MS;

// ===== LAP GATING =====

/// Default minimum lap duration.
///
/// A drone stays in the antenna cone for well under a second, so anything
/// shorter than a few seconds is a re-trigger on the same pass. 10 s suits
/// typical indoor tracks.
pub const DEFAULT_MIN_LAP_MS: u32 = 10_000;

/// Shortest minimum lap the config layer accepts.
pub const MIN_ALLOWED_MIN_LAP_MS: u32 = 1_000;

// ===== LOOP PERIODS =====

/// Rate limit for RSSI frames pushed to the web dashboard.
pub const RSSI_FEED_INTERVAL_MS: u64 = 200;
