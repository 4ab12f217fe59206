//! Scalar Kalman Filter for RSSI Smoothing
//!
//! ## Overview
//!
//! The receiver's RSSI line jitters by several counts from sample to sample.
//! A one-dimensional Kalman filter smooths it into an estimate that the peak
//! detector can compare against fixed thresholds without chattering.
//!
//! The model is a constant: the true signal is assumed not to change between
//! ticks except through process noise. There is no control input.
//!
//! ### 1. Prediction Step
//! ```text
//! State prediction:      x̂ₖ|ₖ₋₁ = x̂ₖ₋₁
//! Covariance prediction: Pₖ|ₖ₋₁ = Pₖ₋₁ + Q
//! ```
//!
//! ### 2. Update Step
//! ```text
//! Kalman gain:  Kₖ = Pₖ|ₖ₋₁ / (Pₖ|ₖ₋₁ + R)
//! State update: x̂ₖ = x̂ₖ|ₖ₋₁ + Kₖ·(zₖ - x̂ₖ|ₖ₋₁)
//! Covariance:   Pₖ = (1 - Kₖ)·Pₖ|ₖ₋₁
//! ```
//!
//! The first sample seeds the estimate directly (`x̂ = z`, `P = R`), so the
//! output never starts from an arbitrary zero.
//!
//! ## Tuning
//!
//! The ratio Q/R sets the smoothing. The defaults (Q = 0.004, R = 20) give a
//! steady-state gain near 0.014: heavy smoothing that suits a primary loop
//! sampling at several kHz. Lower R (or higher Q) to follow the signal faster.
//! `R = 0` makes the filter a pass-through.
//!
//! Because the gain is always in `[0, 1]`, every estimate is a convex blend of
//! the previous estimate and the new sample: the output never overshoots the
//! range of the inputs seen so far.

use crate::constants::signal::{DEFAULT_MEASUREMENT_NOISE, DEFAULT_PROCESS_NOISE, RSSI_MAX};

/// Estimator tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    /// Process noise Q (higher = follow the signal faster)
    pub process_noise: f32,
    /// Measurement noise R (higher = smoother output)
    pub measurement_noise: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            process_noise: DEFAULT_PROCESS_NOISE,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
        }
    }
}

impl FilterConfig {
    /// Output equals input; useful for replaying pre-filtered traces
    pub const fn passthrough() -> Self {
        Self {
            process_noise: 1.0,
            measurement_noise: 0.0,
        }
    }

    /// Set process noise
    pub fn with_process_noise(mut self, noise: f32) -> Self {
        self.process_noise = noise;
        self
    }

    /// Set measurement noise
    pub fn with_measurement_noise(mut self, noise: f32) -> Self {
        self.measurement_noise = noise;
        self
    }
}

/// One-dimensional Kalman filter
#[derive(Debug, Clone)]
pub struct ScalarEstimator {
    process_noise: f32,
    measurement_noise: f32,
    /// `None` until the first sample arrives
    estimate: Option<f32>,
    covariance: f32,
}

impl Default for ScalarEstimator {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

impl ScalarEstimator {
    /// Create an estimator with the given tuning
    pub fn new(config: FilterConfig) -> Self {
        let mut estimator = Self {
            process_noise: 0.0,
            measurement_noise: 0.0,
            estimate: None,
            covariance: 0.0,
        };
        estimator.configure(config.process_noise, config.measurement_noise);
        estimator
    }

    /// Change the noise model; the current estimate is kept
    ///
    /// Negative or non-finite values are treated as zero.
    pub fn configure(&mut self, process_noise: f32, measurement_noise: f32) {
        self.process_noise = sanitize(process_noise);
        self.measurement_noise = sanitize(measurement_noise);
    }

    /// Feed one raw sample, get the new estimate
    pub fn filter(&mut self, raw: f32) -> f32 {
        let estimate = match self.estimate {
            None => {
                self.covariance = self.measurement_noise;
                raw
            }
            Some(previous) => {
                // Predict: constant model, uncertainty grows by Q
                let predicted_cov = self.covariance + self.process_noise;

                // Update
                let denominator = predicted_cov + self.measurement_noise;
                let gain = if denominator > f32::EPSILON {
                    predicted_cov / denominator
                } else {
                    1.0
                };

                self.covariance = (1.0 - gain) * predicted_cov;
                previous + gain * (raw - previous)
            }
        };

        self.estimate = Some(estimate);
        estimate
    }

    /// Filter a receiver sample and round back onto the 0–255 RSSI scale
    pub fn filter_rssi(&mut self, raw: u8) -> u8 {
        let estimate = self.filter(f32::from(raw));
        libm::roundf(estimate).clamp(0.0, f32::from(RSSI_MAX)) as u8
    }

    /// Current estimate, if any sample has been seen
    pub fn estimate(&self) -> Option<f32> {
        self.estimate
    }

    /// Current error covariance
    pub fn covariance(&self) -> f32 {
        self.covariance
    }

    /// Forget the estimate; the next sample seeds it again
    pub fn reset(&mut self) {
        self.estimate = None;
        self.covariance = 0.0;
    }
}

fn sanitize(noise: f32) -> f32 {
    if noise.is_finite() && noise > 0.0 {
        noise
    } else {
        0.0
    }
}
