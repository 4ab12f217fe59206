//! Primary and background contexts running side by side
//!
//! The engine ticks on one thread, the buzzer and LED timers on another, and
//! a third plays the role of the web server posting control requests and
//! threshold edits. Nothing is shared except the atomics in `IndicatorLink`,
//! `ControlLatch` and `SharedThresholds`.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use gatetimer_core::{
    constants::tones::{STOP_TONE_HZ, STOP_TONE_MS},
    indicator::{BuzzerCommand, LedCommand},
    traits::{BuzzerOutput, LedOutput},
    ControlLatch, ControlRequest, FilterConfig, IndicatorLink, LapTimer, PeripheralLoop,
    RaceEvent, RaceState, SharedThresholds, Thresholds,
};

use common::{generators::RaceSignal, laps, ScriptedReceiver};

/// Buzzer pin that logs every change
#[derive(Debug, Default)]
struct LoggedBuzzer {
    log: Vec<Option<u16>>,
}

impl BuzzerOutput for LoggedBuzzer {
    fn on(&mut self) {
        self.log.push(Some(0));
    }

    fn tone(&mut self, frequency_hz: u16) {
        self.log.push(Some(frequency_hz));
    }

    fn off(&mut self) {
        self.log.push(None);
    }
}

#[derive(Debug, Default)]
struct LoggedLed {
    writes: usize,
}

impl LedOutput for LoggedLed {
    fn set(&mut self, _on: bool) {
        self.writes += 1;
    }
}

static STATIC_LINK: IndicatorLink = IndicatorLink::new();
static STATIC_LATCH: ControlLatch = ControlLatch::new();

#[test]
fn link_and_latch_can_be_statics() {
    let mut timer = LapTimer::new(
        ScriptedReceiver::flat(40),
        Thresholds::default(),
        Vec::<RaceEvent>::new(),
        STATIC_LINK.handle(),
    );

    STATIC_LATCH.request_start();
    assert_eq!(timer.drain_control(&STATIC_LATCH, 0), Some(ControlRequest::Start));
    assert_eq!(timer.state(), RaceState::Countdown);
    assert!(STATIC_LINK.take_buzzer().is_some());
}

#[test]
fn race_across_three_contexts() {
    const TICK_MS: u64 = 10;
    let until = 40_000;

    let link = IndicatorLink::new();
    let latch = ControlLatch::new();
    let thresholds = SharedThresholds::default();
    let finished = AtomicBool::new(false);
    let background_output = Mutex::new(None);

    let samples = RaceSignal::new(40).laps(15_000, 12_000, 3).trace(TICK_MS, until);

    let events = std::thread::scope(|s| {
        // Web context: tighten thresholds, then ask for a race
        s.spawn(|| {
            thresholds.store(Thresholds { enter_rssi: 130, exit_rssi: 90, min_lap_ms: 8_000 });
            latch.request_start();
        });

        // Background context
        s.spawn(|| {
            let mut peripherals = PeripheralLoop::new(&link, LoggedBuzzer::default(), LoggedLed::default());
            let mut now = 0u64;
            loop {
                let done = finished.load(Ordering::Acquire);
                peripherals.tick(now);
                now += 1;
                if done {
                    break;
                }
                std::thread::yield_now();
            }
            *background_output.lock().unwrap() = Some((
                peripherals.buzzer().output().log.clone(),
                peripherals.led().output().writes,
            ));
        });

        // Primary context
        let primary = s.spawn(|| {
            let mut timer = LapTimer::new(
                ScriptedReceiver::new(samples),
                &thresholds,
                Vec::<RaceEvent>::new(),
                link.handle(),
            )
            .with_filter(FilterConfig::passthrough());

            while timer.drain_control(&latch, 0).is_none() {
                std::thread::yield_now();
            }

            let mut now = 0;
            while now < until {
                timer.tick_with_control(&latch, now);
                now += TICK_MS;
            }
            timer.stop();
            finished.store(true, Ordering::Release);

            std::mem::take(timer.events_mut())
        });

        primary.join().unwrap()
    });

    assert_eq!(events.first(), Some(&RaceEvent::CountdownTick { remaining: 3 }));
    assert_eq!(laps(&events), vec![(0, 12_000), (1, 12_000), (2, 12_000)]);
    assert_eq!(events.last(), Some(&RaceEvent::RaceFinished));

    let (buzzer_log, led_writes) = background_output
        .into_inner()
        .unwrap()
        .expect("background loop reported");

    // The stop cue is the last command and is never lost behind older ones
    let last_sound = buzzer_log.iter().rev().find_map(|entry| *entry);
    assert_eq!(last_sound, Some(STOP_TONE_HZ));
    assert!(led_writes > 1);
}

#[test]
fn stop_overrides_pending_cues() {
    let link = IndicatorLink::new();
    let mut timer = LapTimer::new(
        ScriptedReceiver::flat(40),
        Thresholds::default(),
        Vec::<RaceEvent>::new(),
        link.handle(),
    );

    // Countdown cue is still sitting in the mailbox when stop lands
    timer.start(0);
    timer.stop();

    assert_eq!(link.take_buzzer(), Some(BuzzerCommand::tone(STOP_TONE_HZ, STOP_TONE_MS)));
    assert_eq!(link.take_led(), Some(LedCommand::On { duration_ms: STOP_TONE_MS }));
    assert_eq!(link.superseded(), 2);
}
