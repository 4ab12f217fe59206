//! Race Simulation Example
//!
//! Runs a five-lap race against a synthetic receiver and prints what the
//! dashboard and the display would show.
//!
//! ## What You'll Learn
//!
//! - Wiring a `LapTimer` to a receiver, an event buffer and the indicator link
//! - Ticking the primary and background loops
//! - Turning engine events into dashboard frames
//!
//! ## Running the Example
//!
//! ```bash
//! RUST_LOG=info cargo run --example 01_race_simulation
//! ```

use gatetimer_core::{
    time::{FixedTime, StdClock, TimeSource},
    traits::{BuzzerOutput, LedOutput, RssiSource},
    EventLog, IndicatorLink, LapTimer, PeripheralLoop, RaceConfig, RaceState, SseFrame, WebFeed,
};

/// Drone passing the gate at the given times, with a little noise on top
struct SimulatedReceiver {
    now: u64,
    passes: Vec<u64>,
    seed: u32,
}

impl SimulatedReceiver {
    fn new(passes: Vec<u64>) -> Self {
        Self { now: 0, passes, seed: 7 }
    }

    fn noise(&mut self) -> i32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.seed >> 28) as i32 - 8
    }
}

impl RssiSource for SimulatedReceiver {
    fn read_rssi(&mut self) -> u8 {
        let t = self.now;
        self.now += 1;

        let signal = self
            .passes
            .iter()
            .map(|&centre| {
                let distance = t.abs_diff(centre);
                if distance < 400 {
                    160 * (400 - distance) / 400
                } else {
                    0
                }
            })
            .max()
            .unwrap_or(0) as i32;

        (45 + signal + self.noise()).clamp(0, 255) as u8
    }
}

/// Prints buzzer changes instead of driving a pin
struct ConsoleBuzzer;

impl BuzzerOutput for ConsoleBuzzer {
    fn on(&mut self) {
        println!("    [buzzer] beep");
    }

    fn tone(&mut self, frequency_hz: u16) {
        println!("    [buzzer] {} Hz", frequency_hz);
    }

    fn off(&mut self) {}
}

struct QuietLed;

impl LedOutput for QuietLed {
    fn set(&mut self, _on: bool) {}
}

fn main() {
    env_logger::init();

    println!("Gatetimer Race Simulation");
    println!("=========================\n");

    // Countdown ends at 3 s; the pilot then laps in roughly 13 s
    let passes = vec![16_200, 29_050, 41_700, 54_900, 67_350];
    let until = 69_000;

    let config = RaceConfig::default();
    println!(
        "Thresholds: enter {} / exit {}, minimum lap {} ms, {} MHz\n",
        config.enter_rssi,
        config.exit_rssi,
        config.min_lap_ms(),
        config.frequency_mhz
    );

    let link = IndicatorLink::new();
    let mut timer = LapTimer::new(
        SimulatedReceiver::new(passes),
        config,
        EventLog::<16>::new(),
        link.handle(),
    );
    let mut peripherals = PeripheralLoop::new(&link, ConsoleBuzzer, QuietLed);
    let mut feed = WebFeed::new();
    let mut last_status = String::new();
    // Simulated clock, one millisecond per receiver sample
    let mut clock = FixedTime::new(0);
    let wall = StdClock::new();

    timer.start(clock.now());

    while clock.now() < until {
        let now = clock.now();
        // Primary context
        timer.tick(now);
        // Background context
        peripherals.tick(now);

        for event in timer.events_mut().drain() {
            let frame = SseFrame::from(event);
            println!("{:>6} ms  {:<12} {}", now, frame.name, frame.data);
        }

        for frame in feed.poll(&mut timer, now) {
            println!("{:>6} ms  {:<12} {}", now, frame.name, frame.data);
        }

        let status = timer.status(now).to_string();
        if status != last_status {
            println!("{:>6} ms  [display]    {}", now, status);
            last_status = status;
        }

        clock.advance(1);
    }

    timer.stop();
    for event in timer.events_mut().drain() {
        println!("{:>6} ms  {}", until, SseFrame::from(event).render().trim_end());
    }
    peripherals.tick(until);

    assert_eq!(timer.state(), RaceState::Stopped);
    println!("\nMailbox commands replaced before playback: {}", link.superseded());
    println!("Simulated {} ms of racing in {} ms", until, wall.now());
}
