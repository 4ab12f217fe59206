//! Core lap-detection engine for Gatetimer
//!
//! Turns the analog RSSI line of a 5.8 GHz video receiver into lap times.
//! A drone passing the timing gate shows up as a rise-then-fall of signal
//! strength; the engine filters each raw sample, tracks the peak, and confirms
//! a gate crossing once the signal has fallen back below the exit threshold.
//!
//! Key constraints:
//! - Runs on ESP32-class devices next to a web server, a display and buttons
//! - No heap allocation in the tick path
//! - Two cooperative loops: the engine ticks in the primary context, buzzer
//!   and LED timers tick in the background context
//!
//! ```no_run
//! use gatetimer_core::{
//!     LapTimer, RaceConfig, EventLog, IndicatorLink, PeripheralLoop,
//!     indicator::{NullBuzzer, NullLed},
//!     traits::RssiSource,
//! };
//!
//! struct Rx5808;
//!
//! impl RssiSource for Rx5808 {
//!     fn read_rssi(&mut self) -> u8 {
//!         0 // read the ADC here
//!     }
//! }
//!
//! let link = IndicatorLink::new();
//! let mut timer: LapTimer<_, _, _, _> =
//!     LapTimer::new(Rx5808, RaceConfig::default(), EventLog::<16>::new(), link.handle());
//! let mut peripherals = PeripheralLoop::new(&link, NullBuzzer, NullLed);
//!
//! timer.start(0);
//! // primary context
//! timer.tick(1);
//! // background context
//! peripherals.tick(1);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod channels;
pub mod config;
pub mod constants;
pub mod control;
pub mod detector;
pub mod errors;
pub mod events;
pub mod feed;
pub mod filter;
pub mod history;
pub mod indicator;
pub mod race;
pub mod time;
pub mod traits;

// Public API
pub use channels::{Band, Channel};
pub use config::{RaceConfig, SharedThresholds, Thresholds};
pub use control::{ControlLatch, ControlRequest};
pub use detector::{PeakCapture, PeakDetector};
pub use errors::{ConfigError, ConfigResult};
pub use events::{EventLog, EventQueue, RaceEvent};
pub use feed::{SseFrame, WebFeed};
pub use filter::{FilterConfig, ScalarEstimator};
pub use history::{LapHistory, RssiHistory};
pub use indicator::{BuzzerCommand, IndicatorHandle, IndicatorLink, LedCommand, PeripheralLoop};
pub use race::{LapTimer, RaceState, RaceStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
