//! Signal Constants
//!
//! RSSI scale, default detection thresholds and estimator tuning.

/// Highest value the receiver ADC path reports after scaling.
pub const RSSI_MAX: u8 = u8::MAX;

/// Default enter threshold.
///
/// The filtered RSSI must reach this level before a peak can be claimed.
pub const DEFAULT_ENTER_RSSI: u8 = 120;

/// Default exit threshold.
///
/// A claimed peak is confirmed once the signal falls below this level.
/// Kept under the enter threshold to give the detector hysteresis.
pub const DEFAULT_EXIT_RSSI: u8 = 100;

/// Default measurement noise (R) of the RSSI estimator.
///
/// RX5808 RSSI is noisy at the sample rate of the primary loop; a large R
/// relative to Q gives heavy smoothing.
pub const DEFAULT_MEASUREMENT_NOISE: f32 = 20.0;

/// Default process noise (Q) of the RSSI estimator.
pub const DEFAULT_PROCESS_NOISE: f32 = 0.004;
