//! Shared fixtures for the integration tests
//!
//! - [`ScriptedReceiver`]: replays a precomputed RSSI trace, one sample per tick
//! - [`RecordingIndicators`]: keeps every cue the engine issues, in order
//! - [`run`]: drives a timer across a time range at a fixed tick period
//! - [`generators`]: synthetic gate-pass signals

#![allow(dead_code)]

pub mod generators;

use gatetimer_core::{
    indicator::{BuzzerCommand, LedCommand},
    time::Timestamp,
    traits::{EventSink, IndicatorSink, RssiSource, ThresholdSource},
    LapTimer, RaceEvent,
};

/// Receiver that plays back a fixed trace and then holds the last sample
#[derive(Debug, Default)]
pub struct ScriptedReceiver {
    samples: Vec<u8>,
    position: usize,
    pub tuned_to: Option<u16>,
}

impl ScriptedReceiver {
    pub fn new(samples: Vec<u8>) -> Self {
        Self {
            samples,
            position: 0,
            tuned_to: None,
        }
    }

    /// Constant signal
    pub fn flat(level: u8) -> Self {
        Self::new(vec![level])
    }

    pub fn samples_read(&self) -> usize {
        self.position
    }
}

impl RssiSource for ScriptedReceiver {
    fn read_rssi(&mut self) -> u8 {
        let sample = self
            .samples
            .get(self.position)
            .or_else(|| self.samples.last())
            .copied()
            .unwrap_or(0);
        self.position += 1;
        sample
    }

    fn tune(&mut self, frequency_mhz: u16) {
        self.tuned_to = Some(frequency_mhz);
    }
}

/// One indicator command as issued by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Buzzer(BuzzerCommand),
    Led(LedCommand),
}

/// Indicator sink that remembers everything
#[derive(Debug, Default)]
pub struct RecordingIndicators {
    pub cues: Vec<Cue>,
}

impl RecordingIndicators {
    pub fn buzzer_commands(&self) -> Vec<BuzzerCommand> {
        self.cues
            .iter()
            .filter_map(|cue| match cue {
                Cue::Buzzer(cmd) => Some(*cmd),
                Cue::Led(_) => None,
            })
            .collect()
    }

    pub fn led_commands(&self) -> Vec<LedCommand> {
        self.cues
            .iter()
            .filter_map(|cue| match cue {
                Cue::Led(cmd) => Some(*cmd),
                Cue::Buzzer(_) => None,
            })
            .collect()
    }

    pub fn last_buzzer(&self) -> Option<BuzzerCommand> {
        self.buzzer_commands().last().copied()
    }
}

impl IndicatorSink for RecordingIndicators {
    fn buzzer(&mut self, command: BuzzerCommand) {
        self.cues.push(Cue::Buzzer(command));
    }

    fn led(&mut self, command: LedCommand) {
        self.cues.push(Cue::Led(command));
    }
}

/// Route engine logs to the test output (`RUST_LOG=debug`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tick `timer` at every `step_ms` in `[from, to)`
pub fn run<R, C, E, I, const LAPS: usize>(
    timer: &mut LapTimer<R, C, E, I, LAPS>,
    from: Timestamp,
    to: Timestamp,
    step_ms: u64,
) where
    R: RssiSource,
    C: ThresholdSource,
    E: EventSink,
    I: IndicatorSink,
{
    let mut now = from;
    while now < to {
        timer.tick(now);
        now += step_ms;
    }
}

/// Lap events only
pub fn laps(events: &[RaceEvent]) -> Vec<(u8, u32)> {
    events
        .iter()
        .filter_map(|event| match *event {
            RaceEvent::LapCompleted { lap, duration_ms } => Some((lap, duration_ms)),
            _ => None,
        })
        .collect()
}

/// Countdown values in order
pub fn countdown(events: &[RaceEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|event| match *event {
            RaceEvent::CountdownTick { remaining } => Some(remaining),
            _ => None,
        })
        .collect()
}

pub fn count(events: &[RaceEvent], wanted: RaceEvent) -> usize {
    events.iter().filter(|event| **event == wanted).count()
}
