//! Synthetic RSSI traces
//!
//! A gate pass is modelled as a symmetric triangle on top of a flat noise
//! floor: the signal climbs while the drone approaches the antenna, peaks
//! at the gate and falls away. Real passes are messier, but the detector only
//! cares about the peak and the fall below the exit threshold.

use gatetimer_core::time::Timestamp;

/// One drone pass through the gate
#[derive(Debug, Clone, Copy)]
pub struct GatePass {
    /// Time of the signal maximum
    pub center_ms: Timestamp,
    /// Time from floor to peak
    pub half_width_ms: u64,
    /// Signal level at the peak
    pub peak: u8,
}

impl GatePass {
    pub fn at(center_ms: Timestamp) -> Self {
        Self {
            center_ms,
            half_width_ms: 300,
            peak: 200,
        }
    }

    pub fn with_peak(mut self, peak: u8) -> Self {
        self.peak = peak;
        self
    }

    pub fn with_half_width(mut self, half_width_ms: u64) -> Self {
        self.half_width_ms = half_width_ms;
        self
    }

    fn level_at(&self, t: Timestamp, floor: u8) -> Option<f32> {
        let distance = t.abs_diff(self.center_ms);
        if distance >= self.half_width_ms {
            return None;
        }
        let rise = f32::from(self.peak.saturating_sub(floor));
        let fraction = 1.0 - distance as f32 / self.half_width_ms as f32;
        Some(f32::from(floor) + rise * fraction)
    }
}

/// Noise floor plus a list of passes
#[derive(Debug, Clone)]
pub struct RaceSignal {
    pub floor: u8,
    pub passes: Vec<GatePass>,
    noise_amplitude: f32,
    seed: u32,
}

impl RaceSignal {
    pub fn new(floor: u8) -> Self {
        Self {
            floor,
            passes: Vec::new(),
            noise_amplitude: 0.0,
            seed: 42,
        }
    }

    pub fn pass(mut self, pass: GatePass) -> Self {
        self.passes.push(pass);
        self
    }

    /// Passes at a fixed lap period, the first at `first_ms`
    pub fn laps(mut self, first_ms: Timestamp, period_ms: u64, count: usize) -> Self {
        for lap in 0..count as u64 {
            self.passes.push(GatePass::at(first_ms + lap * period_ms));
        }
        self
    }

    /// Uniform noise of ±`amplitude` on every sample
    pub fn with_noise(mut self, amplitude: f32) -> Self {
        self.noise_amplitude = amplitude;
        self
    }

    pub fn sample_at(&mut self, t: Timestamp) -> u8 {
        let level = self
            .passes
            .iter()
            .filter_map(|pass| pass.level_at(t, self.floor))
            .fold(f32::from(self.floor), f32::max);

        let noise = if self.noise_amplitude > 0.0 {
            (self.random_unit() * 2.0 - 1.0) * self.noise_amplitude
        } else {
            0.0
        };

        (level + noise).round().clamp(0.0, 255.0) as u8
    }

    /// One sample per tick for ticks at `0, step, 2*step, ...` below `until`
    pub fn trace(&mut self, step_ms: u64, until: Timestamp) -> Vec<u8> {
        (0..until).step_by(step_ms as usize).map(|t| self.sample_at(t)).collect()
    }

    fn random_unit(&mut self) -> f32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.seed as f32) / (u32::MAX as f32)
    }
}
