//! Constants for Gatetimer Core
//!
//! Centralized numeric values used by the engine and the peripheral loops.
//! Each constant documents its unit and where the value comes from.
//!
//! ## Organization
//!
//! - **Timing**: countdown schedule, minimum lap defaults, loop periods
//! - **Signal**: RSSI scale, default thresholds, filter tuning
//! - **Tones**: buzzer frequencies and indicator durations
//! - **Buffers**: ring and queue capacities
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include the unit in the name (`_MS`, `_HZ`, `_MHZ`)
//! 3. Group related constants together

/// Countdown schedule, lap gates and loop periods.
pub mod timing;

/// RSSI scale, detection thresholds and filter tuning.
pub mod signal;

/// Buzzer frequencies and indicator durations.
pub mod tones;

/// Ring buffer and queue capacities.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use timing::{
    COUNTDOWN_BEEPS, COUNTDOWN_STEP_MS, COUNTDOWN_WINDOW_MS,
    DEFAULT_MIN_LAP_MS,
};

pub use signal::{
    DEFAULT_ENTER_RSSI, DEFAULT_EXIT_RSSI,
    DEFAULT_MEASUREMENT_NOISE, DEFAULT_PROCESS_NOISE,
};

pub use buffers::{LAP_HISTORY_SIZE, RSSI_HISTORY_SIZE};
