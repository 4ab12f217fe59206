//! End-to-end race scenarios
//!
//! Each test builds a synthetic RSSI trace, drives a `LapTimer` through it at
//! a fixed tick period and checks the events, lap ring and indicator cues.
//! Most tests disable smoothing so peak times land exactly on the pass
//! centres; `default_filter_keeps_lap_spacing` runs the real tuning.

mod common;

use gatetimer_core::{
    constants::tones::{
        COUNTDOWN_TONE_HZ, COUNTDOWN_TONE_MS, LAP_BEEP_MS, START_TONE_HZ, START_TONE_MS,
        STOP_TONE_HZ, STOP_TONE_MS,
    },
    indicator::{BuzzerCommand, LedCommand},
    traits::ThresholdSource,
    Channel, FilterConfig, LapTimer, RaceConfig, RaceEvent, RaceState, SharedThresholds,
    Thresholds,
};

use common::{
    count, countdown,
    generators::{GatePass, RaceSignal},
    laps, run, RecordingIndicators, ScriptedReceiver,
};

const TICK_MS: u64 = 10;

type TestTimer<C = RaceConfig> =
    LapTimer<ScriptedReceiver, C, Vec<RaceEvent>, RecordingIndicators>;

fn timer_with<C: ThresholdSource>(samples: Vec<u8>, config: C) -> TestTimer<C> {
    common::init_logging();
    LapTimer::new(
        ScriptedReceiver::new(samples),
        config,
        Vec::new(),
        RecordingIndicators::default(),
    )
    .with_filter(FilterConfig::passthrough())
}

fn timer(samples: Vec<u8>) -> TestTimer {
    timer_with(samples, RaceConfig::default())
}

#[test]
fn countdown_emits_three_two_one_then_starts() {
    let mut timer = timer(vec![40]);

    timer.start(0);
    assert_eq!(timer.status(0).to_string(), "Start 3");
    run(&mut timer, 0, 3500, TICK_MS);

    assert_eq!(
        timer.events().as_slice(),
        &[
            RaceEvent::CountdownTick { remaining: 3 },
            RaceEvent::CountdownTick { remaining: 2 },
            RaceEvent::CountdownTick { remaining: 1 },
            RaceEvent::RaceStarted,
        ]
    );
    assert_eq!(timer.state(), RaceState::Running);
    assert_eq!(timer.race_start(), 3000);
    assert_eq!(timer.status(3500).to_string(), "Lap0 started");

    let beep = BuzzerCommand::tone(COUNTDOWN_TONE_HZ, COUNTDOWN_TONE_MS);
    assert_eq!(
        timer.indicators().buzzer_commands(),
        vec![beep, beep, beep, BuzzerCommand::tone(START_TONE_HZ, START_TONE_MS)]
    );
    let blink = LedCommand::Blink { duration_ms: COUNTDOWN_TONE_MS };
    assert_eq!(
        timer.indicators().led_commands(),
        vec![blink, blink, blink, LedCommand::On { duration_ms: START_TONE_MS }]
    );
}

#[test]
fn sparse_ticks_still_count_down_three_two_one() {
    let mut timer = timer(vec![40]);

    timer.start(0);
    timer.tick(1500);
    timer.tick(3000);

    assert_eq!(countdown(timer.events()), vec![3, 2, 1]);
    assert_eq!(count(timer.events(), RaceEvent::RaceStarted), 1);
    assert_eq!(timer.state(), RaceState::Running);
    assert_eq!(timer.race_start(), 3000);
}

#[test]
fn stop_during_countdown_finishes_once() {
    let mut timer = timer(vec![40]);

    timer.start(0);
    run(&mut timer, 0, 1500, TICK_MS);
    timer.stop();
    run(&mut timer, 1500, 5000, TICK_MS);

    let events = timer.events();
    assert_eq!(countdown(events), vec![3, 2]);
    assert_eq!(count(events, RaceEvent::RaceFinished), 1);
    assert_eq!(count(events, RaceEvent::RaceStarted), 0);
    assert_eq!(events.last(), Some(&RaceEvent::RaceFinished));
    assert_eq!(timer.state(), RaceState::Stopped);
    assert_eq!(timer.status(5000).to_string(), "Wait start");
    assert_eq!(
        timer.indicators().last_buzzer(),
        Some(BuzzerCommand::tone(STOP_TONE_HZ, STOP_TONE_MS))
    );
}

#[test]
fn second_start_restarts_countdown() {
    let mut timer = timer(vec![40]);

    timer.start(0);
    run(&mut timer, 0, 1500, TICK_MS);
    timer.start(1500);
    run(&mut timer, 1500, 6000, TICK_MS);

    let events = timer.events();
    assert_eq!(countdown(events), vec![3, 2, 3, 2, 1]);
    assert_eq!(count(events, RaceEvent::RaceStarted), 1);
    assert_eq!(count(events, RaceEvent::RaceFinished), 0);
    assert_eq!(timer.race_start(), 4500);
}

#[test]
fn twelve_laps_wrap_the_ring() {
    // Lap k+1 is 11.0 s + k × 0.1 s so every slot is distinguishable
    let mut centres = vec![15_000u64];
    for k in 1..12u64 {
        let previous = centres[centres.len() - 1];
        centres.push(previous + 11_000 + 100 * k);
    }
    let until = centres[11] + 1000;

    let mut signal = RaceSignal::new(40);
    for &centre in &centres {
        signal = signal.pass(GatePass::at(centre));
    }
    let mut timer = timer(signal.trace(TICK_MS, until));

    timer.start(0);
    run(&mut timer, 0, until, TICK_MS);

    let recorded = laps(timer.events());
    assert_eq!(recorded.len(), 12);
    let slots: Vec<u8> = recorded.iter().map(|&(slot, _)| slot).collect();
    assert_eq!(slots, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1]);

    assert_eq!(recorded[0].1, 12_000, "first lap is measured from the race start");
    for (k, &(_, duration)) in recorded.iter().enumerate().skip(1) {
        assert_eq!(duration, 11_000 + 100 * k as u32, "lap {}", k + 1);
    }

    assert!(timer.has_wrapped());
    assert_eq!(timer.lap_count(), 2);
    assert_eq!(timer.laps().latest_slot(), 1);
    assert_eq!(timer.lap_time(), 12_100);
    assert_eq!(timer.laps().slot(2), Some(11_200));
    assert_eq!(timer.status(until).to_string(), "Lap2: 12.10s");
}

#[test]
fn min_lap_suppresses_retrigger() {
    let signal = RaceSignal::new(40)
        .pass(GatePass::at(15_000))
        // Same drone still near the gate
        .pass(GatePass::at(17_000))
        .pass(GatePass::at(27_000));
    let until = 28_000;
    let mut timer = timer(signal.clone().trace(TICK_MS, until));

    timer.start(0);
    run(&mut timer, 0, until, TICK_MS);

    assert_eq!(laps(timer.events()), vec![(0, 12_000), (1, 12_000)]);
}

#[test]
fn first_lap_window_is_always_open() {
    let until = 5000;
    let mut timer = timer(RaceSignal::new(40).pass(GatePass::at(3500)).trace(TICK_MS, until));

    timer.start(0);
    run(&mut timer, 0, until, TICK_MS);

    assert_eq!(laps(timer.events()), vec![(0, 500)]);
}

#[test]
fn second_lap_before_poll_is_not_flagged_twice() {
    let config = RaceConfig::default().with_min_lap_ms(1000);
    let until = 8000;
    let signal = RaceSignal::new(40).pass(GatePass::at(5000)).pass(GatePass::at(6500));
    let mut timer = timer_with(signal.clone().trace(TICK_MS, until), config);

    timer.start(0);
    run(&mut timer, 0, until, TICK_MS);

    // Both laps were announced...
    assert_eq!(laps(timer.events()), vec![(0, 2000), (1, 1500)]);

    // ...but the poll only ever sees the latest
    assert!(timer.is_lap_available());
    assert_eq!(timer.lap_time(), 1500);
    assert!(!timer.is_lap_available());
    assert_eq!(timer.lap_count(), 2);
}

#[test]
fn lap_cues_follow_each_crossing() {
    let until = 28_000;
    let mut timer = timer(RaceSignal::new(40).laps(15_000, 12_000, 2).trace(TICK_MS, until));

    timer.start(0);
    run(&mut timer, 0, until, TICK_MS);
    timer.stop();

    let lap_beep = BuzzerCommand::Beep { duration_ms: LAP_BEEP_MS };
    let buzzer = timer.indicators().buzzer_commands();
    assert_eq!(buzzer.iter().filter(|&&cmd| cmd == lap_beep).count(), 2);
    assert_eq!(buzzer.last(), Some(&BuzzerCommand::tone(STOP_TONE_HZ, STOP_TONE_MS)));
    assert_eq!(
        timer.indicators().led_commands().last(),
        Some(&LedCommand::On { duration_ms: STOP_TONE_MS })
    );
}

#[test]
fn thresholds_are_read_every_tick() {
    let shared = SharedThresholds::new(Thresholds { enter_rssi: 250, exit_rssi: 100, min_lap_ms: 10_000 });
    let until = 28_000;
    let samples = RaceSignal::new(40).laps(15_000, 12_000, 2).trace(TICK_MS, until);
    let mut timer = timer_with(samples, &shared);

    timer.start(0);
    // Enter level above the pass peak: first crossing is invisible
    run(&mut timer, 0, 20_000, TICK_MS);
    assert!(laps(timer.events()).is_empty());

    shared.store(Thresholds { enter_rssi: 120, exit_rssi: 100, min_lap_ms: 10_000 });
    run(&mut timer, 20_000, until, TICK_MS);
    assert_eq!(laps(timer.events()), vec![(0, 24_000)]);
}

#[test]
fn hole_shot_starts_on_first_crossing() {
    let until = 15_000;
    let signal = RaceSignal::new(40).pass(GatePass::at(2000)).pass(GatePass::at(14_000));
    let mut timer = timer(signal.clone().trace(TICK_MS, until));

    timer.arm();
    assert_eq!(timer.state(), RaceState::Armed);
    assert_eq!(timer.status(0).to_string(), "Starting...");
    run(&mut timer, 0, until, TICK_MS);

    assert_eq!(
        timer.events().as_slice(),
        &[RaceEvent::RaceStarted, RaceEvent::LapCompleted { lap: 0, duration_ms: 12_000 }]
    );
    assert_eq!(timer.race_start(), 2000);
    assert_eq!(
        timer.indicators().buzzer_commands(),
        vec![
            BuzzerCommand::tone(START_TONE_HZ, START_TONE_MS),
            BuzzerCommand::Beep { duration_ms: LAP_BEEP_MS },
        ]
    );
}

#[test]
fn hole_shot_applies_min_lap_to_first_window() {
    let until = 8000;
    let signal = RaceSignal::new(40).pass(GatePass::at(2000)).pass(GatePass::at(5000));
    let mut timer = timer(signal.clone().trace(TICK_MS, until));

    timer.arm();
    run(&mut timer, 0, until, TICK_MS);

    assert_eq!(timer.events().as_slice(), &[RaceEvent::RaceStarted]);
    assert_eq!(timer.race_start(), 2000);
    assert_eq!(timer.state(), RaceState::Running);
    assert!(!timer.is_lap_available());
}

#[test]
fn weak_pass_is_ignored() {
    let until = 20_000;
    let signal = RaceSignal::new(40).pass(GatePass::at(15_000).with_peak(110));
    let mut timer = timer(signal.clone().trace(TICK_MS, until));

    timer.start(0);
    run(&mut timer, 0, until, TICK_MS);

    assert!(laps(timer.events()).is_empty());
    assert_eq!(timer.status(until).to_string(), "Lap0 started");
}

#[test]
fn default_filter_keeps_lap_spacing() {
    const TICK: u64 = 1;
    let until = 41_000;
    let signal = RaceSignal::new(40)
        .pass(GatePass::at(15_000))
        .pass(GatePass::at(27_000))
        .pass(GatePass::at(39_500));
    let samples = signal.clone().trace(TICK, until);

    let mut timer = LapTimer::new(
        ScriptedReceiver::new(samples),
        RaceConfig::default(),
        Vec::new(),
        RecordingIndicators::default(),
    );

    timer.start(0);
    run(&mut timer, 0, until, TICK);

    let recorded = laps(timer.events());
    assert_eq!(recorded.len(), 3);

    // Smoothing delays every peak by the same amount
    let (_, first) = recorded[0];
    assert!(first > 12_000 && first < 12_300, "first lap {}", first);
    assert!(recorded[1].1.abs_diff(12_000) <= 15, "second lap {}", recorded[1].1);
    assert!(recorded[2].1.abs_diff(12_500) <= 15, "third lap {}", recorded[2].1);
}

#[test]
fn noisy_floor_does_not_trigger() {
    let until = 30_000;
    let samples = RaceSignal::new(60).with_noise(25.0).trace(TICK_MS, until);
    let mut timer = LapTimer::new(
        ScriptedReceiver::new(samples),
        RaceConfig::default(),
        Vec::new(),
        RecordingIndicators::default(),
    );

    timer.start(0);
    run(&mut timer, 0, until, TICK_MS);

    assert!(laps(timer.events()).is_empty());
    assert!(timer.rssi() < 100);
}

#[test]
fn stale_clock_reads_as_no_time() {
    let mut timer = timer(vec![40]);

    timer.start(5000);
    timer.tick(0);
    timer.tick(4999);
    assert_eq!(timer.state(), RaceState::Countdown);
    assert_eq!(timer.status(0).to_string(), "Start 3");
    assert_eq!(countdown(timer.events()), vec![3]);

    timer.tick(8000);
    assert_eq!(timer.state(), RaceState::Running);
}

#[test]
fn stop_clears_race_scope() {
    let until = 28_000;
    let mut timer = timer(RaceSignal::new(40).laps(15_000, 12_000, 2).trace(TICK_MS, until));

    timer.start(0);
    run(&mut timer, 0, until, TICK_MS);
    assert_eq!(timer.lap_count(), 2);

    timer.stop();
    assert_eq!(timer.lap_count(), 0);
    assert!(!timer.is_lap_available());
    assert!(!timer.has_wrapped());
    assert_eq!(timer.laps().slot(0), Some(0));
    assert_eq!(timer.rssi(), 0);
}

#[test]
fn receiver_follows_channel_changes() {
    let mut timer = timer(vec![40]);
    let r8 = Channel::parse("R8").unwrap();

    let retuned = timer.config().with_channel(r8);
    *timer.config_mut() = retuned;
    timer.tune(retuned.frequency_mhz);

    assert_eq!(timer.receiver_mut().tuned_to, Some(5917));
}
