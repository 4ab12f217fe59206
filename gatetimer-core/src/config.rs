//! Race configuration
//!
//! Holds the settings the engine reads every tick: the hysteresis threshold
//! pair and the minimum lap duration, plus the receiver frequency. The layout
//! mirrors what the device persists, so the minimum lap is kept in tenths of a
//! second.
//!
//! Two [`ThresholdSource`] implementations are provided:
//! - [`RaceConfig`] for a plain owned config (single context)
//! - [`SharedThresholds`] for settings edited from the web/button context
//!   while the engine reads them from the primary context
//!
//! The engine reads thresholds at the start of every tick with no snapshot
//! guarantee: an edit may land between two fields. That is harmless, the worst
//! case is one tick evaluated with a mixed pair.

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use crate::channels::Channel;
use crate::constants::signal::{DEFAULT_ENTER_RSSI, DEFAULT_EXIT_RSSI};
use crate::constants::timing::{DEFAULT_MIN_LAP_MS, MIN_ALLOWED_MIN_LAP_MS, MS_PER_TENTH};
use crate::errors::{ConfigError, ConfigResult};
use crate::traits::ThresholdSource;

/// Values the detector and lap gate need for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Level the filtered RSSI must reach to claim a peak
    pub enter_rssi: u8,
    /// Level the filtered RSSI must fall under to confirm it
    pub exit_rssi: u8,
    /// Capture is suppressed until this long after the lap window opened
    pub min_lap_ms: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            enter_rssi: DEFAULT_ENTER_RSSI,
            exit_rssi: DEFAULT_EXIT_RSSI,
            min_lap_ms: DEFAULT_MIN_LAP_MS,
        }
    }
}

impl Thresholds {
    /// Check the pair can actually confirm a crossing
    pub fn validate(&self) -> ConfigResult<()> {
        if self.exit_rssi >= self.enter_rssi {
            return Err(ConfigError::ThresholdsInverted {
                enter: self.enter_rssi,
                exit: self.exit_rssi,
            });
        }

        if self.min_lap_ms < MIN_ALLOWED_MIN_LAP_MS {
            return Err(ConfigError::MinLapTooShort { min_lap_ms: self.min_lap_ms });
        }

        Ok(())
    }
}

/// Persisted timer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RaceConfig {
    /// Enter threshold (0–255)
    pub enter_rssi: u8,
    /// Exit threshold (0–255)
    pub exit_rssi: u8,
    /// Minimum lap duration in tenths of a second
    pub min_lap_tenths: u8,
    /// Receiver frequency in MHz
    pub frequency_mhz: u16,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            enter_rssi: DEFAULT_ENTER_RSSI,
            exit_rssi: DEFAULT_EXIT_RSSI,
            min_lap_tenths: (DEFAULT_MIN_LAP_MS / MS_PER_TENTH) as u8,
            frequency_mhz: Channel::DEFAULT.frequency_mhz(),
        }
    }
}

impl RaceConfig {
    /// Set the hysteresis pair
    pub fn with_thresholds(mut self, enter_rssi: u8, exit_rssi: u8) -> Self {
        self.enter_rssi = enter_rssi;
        self.exit_rssi = exit_rssi;
        self
    }

    /// Set the minimum lap, rounded down to tenths and capped at 25.5 s
    pub fn with_min_lap_ms(mut self, min_lap_ms: u32) -> Self {
        self.min_lap_tenths = (min_lap_ms / MS_PER_TENTH).min(u32::from(u8::MAX)) as u8;
        self
    }

    /// Tune to a channel
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.frequency_mhz = channel.frequency_mhz();
        self
    }

    /// Minimum lap in milliseconds
    pub fn min_lap_ms(&self) -> u32 {
        u32::from(self.min_lap_tenths) * MS_PER_TENTH
    }

    /// Reject settings the detector cannot work with
    ///
    /// Called by the config layer before persisting. The engine tolerates
    /// anything, so an unvalidated config only costs missed laps.
    pub fn validate(&self) -> ConfigResult<()> {
        self.thresholds().validate()?;
        Channel::from_frequency(self.frequency_mhz)?;
        Ok(())
    }
}

impl ThresholdSource for RaceConfig {
    fn thresholds(&self) -> Thresholds {
        Thresholds {
            enter_rssi: self.enter_rssi,
            exit_rssi: self.exit_rssi,
            min_lap_ms: self.min_lap_ms(),
        }
    }
}

impl ThresholdSource for Thresholds {
    fn thresholds(&self) -> Thresholds {
        *self
    }
}

/// Thresholds writable from any context
///
/// Each field is its own atomic. Writers publish with `Release`, the engine
/// reads with `Acquire`; there is no cross-field snapshot.
#[derive(Debug)]
pub struct SharedThresholds {
    enter_rssi: AtomicU8,
    exit_rssi: AtomicU8,
    min_lap_ms: AtomicU32,
}

impl SharedThresholds {
    /// Create with the given initial values
    pub const fn new(thresholds: Thresholds) -> Self {
        Self {
            enter_rssi: AtomicU8::new(thresholds.enter_rssi),
            exit_rssi: AtomicU8::new(thresholds.exit_rssi),
            min_lap_ms: AtomicU32::new(thresholds.min_lap_ms),
        }
    }

    /// Replace all three values
    pub fn store(&self, thresholds: Thresholds) {
        self.enter_rssi.store(thresholds.enter_rssi, Ordering::Release);
        self.exit_rssi.store(thresholds.exit_rssi, Ordering::Release);
        self.min_lap_ms.store(thresholds.min_lap_ms, Ordering::Release);
    }

    /// Apply a persisted config
    pub fn apply(&self, config: &RaceConfig) {
        self.store(config.thresholds());
    }

    /// Read the current values
    pub fn load(&self) -> Thresholds {
        Thresholds {
            enter_rssi: self.enter_rssi.load(Ordering::Acquire),
            exit_rssi: self.exit_rssi.load(Ordering::Acquire),
            min_lap_ms: self.min_lap_ms.load(Ordering::Acquire),
        }
    }
}

impl Default for SharedThresholds {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

impl ThresholdSource for SharedThresholds {
    fn thresholds(&self) -> Thresholds {
        self.load()
    }
}

impl<T: ThresholdSource + ?Sized> ThresholdSource for &T {
    fn thresholds(&self) -> Thresholds {
        (**self).thresholds()
    }
}
