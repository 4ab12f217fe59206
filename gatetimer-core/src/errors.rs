//! Error Types for Configuration and Channel Selection
//!
//! ## Where errors can happen
//!
//! The lap-detection hot path has no error surface. Sampling, filtering, peak
//! detection and the race state machine all accept any input and degrade to
//! "no lap detected" rather than failing. Errors exist only at the edges where
//! a human or a persisted record hands the device new settings:
//!
//! - **Thresholds**: an exit level at or above the enter level means the
//!   detector can never confirm a crossing.
//! - **Minimum lap time**: zero disables the re-trigger guard entirely.
//! - **Channels**: unknown band/channel names or frequencies outside the
//!   5.8 GHz table.
//!
//! The engine itself never calls [`crate::RaceConfig::validate`]; the config
//! layer does it before persisting.
//!
//! ## Memory Layout
//!
//! Errors are `Copy`, carry no heap data and fit in 8 bytes, so they can be
//! returned from interrupt-safe code and stored in fixed-size logs.

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Exit threshold is not below the enter threshold
    #[error("Exit RSSI {exit} must be below enter RSSI {enter}")]
    ThresholdsInverted {
        /// Configured enter threshold
        enter: u8,
        /// Configured exit threshold
        exit: u8,
    },

    /// Minimum lap duration would allow re-triggering on the same pass
    #[error("Minimum lap time {min_lap_ms}ms is too short")]
    MinLapTooShort {
        /// Configured minimum lap duration in milliseconds
        min_lap_ms: u32,
    },

    /// Band letter or channel number not in the channel table
    #[error("Unknown band/channel")]
    UnknownChannel,

    /// Frequency does not belong to any known channel
    #[error("Frequency {frequency_mhz}MHz is not a known channel")]
    FrequencyOutOfBand {
        /// Requested frequency in MHz
        frequency_mhz: u16,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ThresholdsInverted { enter, exit } =>
                defmt::write!(fmt, "Exit {} not below enter {}", exit, enter),
            Self::MinLapTooShort { min_lap_ms } =>
                defmt::write!(fmt, "Min lap {}ms too short", min_lap_ms),
            Self::UnknownChannel =>
                defmt::write!(fmt, "Unknown channel"),
            Self::FrequencyOutOfBand { frequency_mhz } =>
                defmt::write!(fmt, "{}MHz not a known channel", frequency_mhz),
        }
    }
}
