//! Threshold Tuning Example
//!
//! Records a calibration run (one slow fly-by), looks at the filtered signal
//! and proposes enter/exit thresholds, then checks them with the config layer.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_threshold_tuning
//! ```

use gatetimer_core::{Channel, ConfigError, FilterConfig, RaceConfig, ScalarEstimator};

/// Floor of 50 with a fly-by peaking at 190 around t = 5 s
fn calibration_trace() -> Vec<u8> {
    let mut seed = 11u32;
    (0..10_000u64)
        .map(|t| {
            seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
            let noise = (seed >> 27) as i32 - 16;
            let distance = t.abs_diff(5_000);
            let pass = if distance < 500 { 140 * (500 - distance) / 500 } else { 0 } as i32;
            (50 + pass + noise).clamp(0, 255) as u8
        })
        .collect()
}

fn main() {
    env_logger::init();

    println!("Gatetimer Threshold Tuning");
    println!("==========================\n");

    let trace = calibration_trace();
    let mut estimator = ScalarEstimator::new(FilterConfig::default());
    let filtered: Vec<u8> = trace.iter().map(|&raw| estimator.filter_rssi(raw)).collect();

    let raw_peak = trace.iter().copied().max().unwrap_or(0);
    let peak = filtered.iter().copied().max().unwrap_or(0);
    // Floor from the first second, before the drone shows up
    let floor = filtered[200..1000].iter().copied().max().unwrap_or(0);

    println!("Raw peak:       {}", raw_peak);
    println!("Filtered peak:  {}", peak);
    println!("Filtered floor: {}", floor);

    let span = peak.saturating_sub(floor);
    let enter = floor + span * 3 / 4;
    let exit = floor + span / 2;
    println!("\nSuggested enter {} / exit {}", enter, exit);

    let config = RaceConfig::default()
        .with_thresholds(enter, exit)
        .with_min_lap_ms(8_000)
        .with_channel(Channel::parse("F4").unwrap_or_default());

    match config.validate() {
        Ok(()) => println!("Config is valid"),
        Err(e) => println!("Config rejected: {}", e),
    }

    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("\nPersisted form:\n{}", json),
        Err(e) => println!("Could not serialize config: {}", e),
    }

    // What the config layer says about common mistakes
    println!("\nCommon mistakes:");
    let mistakes: [(&str, Result<(), ConfigError>); 3] = [
        ("exit above enter", RaceConfig::default().with_thresholds(100, 120).validate()),
        ("minimum lap 0.5 s", RaceConfig::default().with_min_lap_ms(500).validate()),
        ("unknown channel", Channel::parse("Z9").map(|_| ())),
    ];
    for (what, result) in mistakes {
        match result {
            Ok(()) => println!("  {:<18} accepted", what),
            Err(e) => println!("  {:<18} {}", what, e),
        }
    }
}
