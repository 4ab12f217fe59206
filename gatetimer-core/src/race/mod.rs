//! Race State Machine
//!
//! ## Overview
//!
//! [`LapTimer`] owns the whole per-tick pipeline and the race bookkeeping:
//!
//! ```text
//!  RssiSource ──► ScalarEstimator ──► RssiHistory
//!                        │
//!                        ▼
//!                  PeakDetector ──► LapHistory
//!                        │
//!            ┌───────────┴───────────┐
//!            ▼                       ▼
//!        EventSink              IndicatorSink
//!   (countdown, start,       (tones and flashes for
//!    laps, finish)            the background loop)
//! ```
//!
//! ## Phases
//!
//! ```text
//!            start()                  3000 ms
//!  Stopped ──────────► Countdown ─────────────► Running ◄─┐
//!     ▲  │                                         │  │   │ crossing:
//!     │  │ arm()          first crossing           │  └───┘ record lap
//!     │  └──────────► Armed ───────────────────────┘
//!     │                                    stop() from any phase
//!     └────────────────────────────────────────────────────
//! ```
//!
//! `start()` from any phase restarts the countdown. `stop()` from any phase,
//! `Stopped` included, re-issues the stop cue and `RaceFinished`.
//!
//! ## Lap windows
//!
//! After each confirmed crossing the detector is reset and a new lap window
//! opens at the crossing's peak time. Capture stays suppressed until the
//! minimum lap has elapsed since then, which rejects re-triggers from the
//! same pass. The first window of a race is always open.
//!
//! ## Timing
//!
//! The caller samples its clock once per tick and passes `now` in. Every
//! comparison against a stored time is checked: a `now` older than the stored
//! time means no time has elapsed.

mod state;
mod status;

pub use state::{CountdownState, RaceState};
pub use status::{RaceStatus, STATUS_CAPACITY};

use crate::constants::buffers::LAP_HISTORY_SIZE;
use crate::constants::timing::COUNTDOWN_WINDOW_MS;
use crate::constants::tones::{
    COUNTDOWN_TONE_HZ, COUNTDOWN_TONE_MS, LAP_BEEP_MS, START_TONE_HZ, START_TONE_MS,
    STOP_TONE_HZ, STOP_TONE_MS,
};
use crate::config::Thresholds;
use crate::control::{ControlLatch, ControlRequest};
use crate::detector::{PeakCapture, PeakDetector};
use crate::events::RaceEvent;
use crate::filter::{FilterConfig, ScalarEstimator};
use crate::history::{LapHistory, RssiHistory};
use crate::indicator::{BuzzerCommand, LedCommand};
use crate::time::{elapsed_since, span_ms, Timestamp};
use crate::traits::{EventSink, IndicatorSink, RssiSource, ThresholdSource};

/// Lap-detection engine
///
/// Generic over its collaborators:
/// - `R`: receiver driver
/// - `C`: threshold settings, read at the start of every tick
/// - `E`: event consumer
/// - `I`: indicator command consumer
/// - `LAPS`: lap ring capacity
pub struct LapTimer<R, C, E, I, const LAPS: usize = LAP_HISTORY_SIZE> {
    receiver: R,
    config: C,
    events: E,
    indicators: I,

    filter: ScalarEstimator,
    detector: PeakDetector,
    laps: LapHistory<LAPS>,
    rssi: RssiHistory,

    state: RaceState,
    countdown: CountdownState,
    race_start: Timestamp,
    lap_start: Timestamp,
    /// Capture ignores the minimum lap until the first crossing after a
    /// countdown start
    first_window_open: bool,
}

impl<R, C, E, I> LapTimer<R, C, E, I>
where
    R: RssiSource,
    C: ThresholdSource,
    E: EventSink,
    I: IndicatorSink,
{
    /// Engine with the default lap ring, in `Stopped`
    ///
    /// Construction emits no events and commands nothing.
    pub fn new(receiver: R, config: C, events: E, indicators: I) -> Self {
        Self::with_lap_slots(receiver, config, events, indicators)
    }
}

impl<R, C, E, I, const LAPS: usize> LapTimer<R, C, E, I, LAPS>
where
    R: RssiSource,
    C: ThresholdSource,
    E: EventSink,
    I: IndicatorSink,
{
    /// Engine with a `LAPS`-slot lap ring, in `Stopped`
    pub fn with_lap_slots(receiver: R, config: C, events: E, indicators: I) -> Self {
        Self {
            receiver,
            config,
            events,
            indicators,
            filter: ScalarEstimator::new(FilterConfig::default()),
            detector: PeakDetector::new(),
            laps: LapHistory::new(),
            rssi: RssiHistory::new(),
            state: RaceState::Stopped,
            countdown: CountdownState::begin(0),
            race_start: 0,
            lap_start: 0,
            first_window_open: false,
        }
    }

    /// Replace the estimator tuning
    pub fn with_filter(mut self, config: FilterConfig) -> Self {
        self.filter = ScalarEstimator::new(config);
        self
    }

    // ===== Commands =====

    /// Start the 3-2-1 countdown, restarting it if a race is in progress
    pub fn start(&mut self, now: Timestamp) {
        self.reset_race();
        self.countdown = CountdownState::begin(now);
        self.state = RaceState::Countdown;
        log_info!("Countdown started at {}", now);

        self.countdown_beep(self.countdown.beeps_remaining);
    }

    /// Wait for the first gate crossing to start the clock
    pub fn arm(&mut self) {
        self.reset_race();
        self.state = RaceState::Armed;
        log_info!("Armed for hole shot");
    }

    /// End the race
    ///
    /// Always plays the stop cue and emits `RaceFinished`, even when already
    /// stopped. The stop cue replaces any cue still waiting in the mailbox.
    pub fn stop(&mut self) {
        let was = self.state;
        self.reset_race();
        self.state = RaceState::Stopped;
        log_info!("Race stopped (was {})", was.name());

        self.indicators.buzzer(BuzzerCommand::tone(STOP_TONE_HZ, STOP_TONE_MS));
        self.indicators.led(LedCommand::On { duration_ms: STOP_TONE_MS });
        self.events.emit(RaceEvent::RaceFinished);
    }

    /// Apply a request posted from another context
    ///
    /// Call at the top of the tick, before [`Self::tick`].
    pub fn drain_control(&mut self, latch: &ControlLatch, now: Timestamp) -> Option<ControlRequest> {
        let request = latch.take()?;
        match request {
            ControlRequest::Start => self.start(now),
            ControlRequest::Stop => self.stop(),
            ControlRequest::Arm => self.arm(),
        }
        Some(request)
    }

    /// [`Self::drain_control`] followed by [`Self::tick`]
    pub fn tick_with_control(&mut self, latch: &ControlLatch, now: Timestamp) {
        self.drain_control(latch, now);
        self.tick(now);
    }

    /// Retune the receiver
    pub fn tune(&mut self, frequency_mhz: u16) {
        self.receiver.tune(frequency_mhz);
    }

    // ===== Tick =====

    /// One primary-context step: read, filter, detect, transition
    pub fn tick(&mut self, now: Timestamp) {
        let thresholds = self.config.thresholds();
        let sample = self.filter.filter_rssi(self.receiver.read_rssi());
        self.rssi.push(sample);

        match self.state {
            RaceState::Stopped => {}
            RaceState::Countdown => self.advance_countdown(now),
            RaceState::Armed => self.detect_hole_shot(sample, now, &thresholds),
            RaceState::Running => self.detect_lap(sample, now, &thresholds),
        }
    }

    fn advance_countdown(&mut self, now: Timestamp) {
        let Some(elapsed) = self.countdown.elapsed(now) else {
            return;
        };

        // Catch up on every beep due, however far apart the ticks are
        while self.countdown.beeps_remaining > 0 && elapsed >= self.countdown.next_beep_at() {
            self.countdown.beeps_remaining -= 1;
            if self.countdown.beeps_remaining > 0 {
                self.countdown_beep(self.countdown.beeps_remaining);
            }
        }

        if elapsed >= COUNTDOWN_WINDOW_MS {
            self.begin_race(now);
        }
    }

    fn countdown_beep(&mut self, remaining: u8) {
        log_debug!("Countdown {}", remaining);
        self.indicators.buzzer(BuzzerCommand::tone(COUNTDOWN_TONE_HZ, COUNTDOWN_TONE_MS));
        self.indicators.led(LedCommand::Blink { duration_ms: COUNTDOWN_TONE_MS });
        self.events.emit(RaceEvent::CountdownTick { remaining });
    }

    fn begin_race(&mut self, now: Timestamp) {
        self.race_start = now;
        self.state = RaceState::Running;
        log_info!("Race started at {}", now);

        self.start_cue();
        self.events.emit(RaceEvent::RaceStarted);
        self.open_lap_window(now);
        self.first_window_open = true;
    }

    fn detect_hole_shot(&mut self, sample: u8, now: Timestamp, thresholds: &Thresholds) {
        self.detector.capture(sample, now, thresholds);
        if !self.detector.is_captured(sample, thresholds) {
            return;
        }

        let peak = self.detector.peak();
        self.race_start = peak.time;
        self.state = RaceState::Running;
        log_info!("Hole shot at {}, peak {}", peak.time, peak.value);

        self.start_cue();
        self.events.emit(RaceEvent::RaceStarted);
        self.open_lap_window(peak.time);
    }

    fn detect_lap(&mut self, sample: u8, now: Timestamp, thresholds: &Thresholds) {
        if self.gate_open(now, thresholds.min_lap_ms) {
            self.detector.capture(sample, now, thresholds);
        }

        if self.detector.is_captured(sample, thresholds) {
            let peak = self.detector.peak();
            self.finish_lap(peak);
            self.open_lap_window(peak.time);
            self.indicators.buzzer(BuzzerCommand::Beep { duration_ms: LAP_BEEP_MS });
            self.indicators.led(LedCommand::On { duration_ms: LAP_BEEP_MS });
        }
    }

    /// Whether capture may run in the current lap window
    ///
    /// The hole shot already was a crossing, so after `arm()` the minimum lap
    /// applies from the first window on.
    fn gate_open(&self, now: Timestamp, min_lap_ms: u32) -> bool {
        if self.first_window_open {
            return true;
        }
        elapsed_since(now, self.lap_start).is_some_and(|elapsed| elapsed > u64::from(min_lap_ms))
    }

    fn is_first_lap(&self) -> bool {
        self.laps.lap_count() == 0 && !self.laps.has_wrapped()
    }

    fn finish_lap(&mut self, peak: PeakCapture) {
        let duration_ms = if self.is_first_lap() {
            span_ms(peak.time, self.race_start)
        } else {
            span_ms(peak.time, self.lap_start)
        };

        let slot = self.laps.record(duration_ms);
        self.first_window_open = false;
        log_debug!("Lap finished in slot {}: {} ms (peak {})", slot, duration_ms, peak.value);

        self.events.emit(RaceEvent::LapCompleted {
            lap: u8::try_from(slot).unwrap_or(u8::MAX),
            duration_ms,
        });
    }

    fn open_lap_window(&mut self, at: Timestamp) {
        self.lap_start = at;
        self.detector.reset();
    }

    fn start_cue(&mut self) {
        self.indicators.buzzer(BuzzerCommand::tone(START_TONE_HZ, START_TONE_MS));
        self.indicators.led(LedCommand::On { duration_ms: START_TONE_MS });
    }

    fn reset_race(&mut self) {
        self.laps.clear();
        self.rssi.clear();
        self.detector.reset();
        self.race_start = 0;
        self.lap_start = 0;
        self.first_window_open = false;
    }

    // ===== Accessors =====

    /// Latest filtered RSSI
    pub fn rssi(&self) -> u8 {
        self.rssi.latest()
    }

    /// Current phase
    pub fn state(&self) -> RaceState {
        self.state
    }

    /// Laps recorded since the ring last wrapped
    pub fn lap_count(&self) -> usize {
        self.laps.lap_count()
    }

    /// Whether the lap ring wrapped during this race
    pub fn has_wrapped(&self) -> bool {
        self.laps.has_wrapped()
    }

    /// Whether a lap completed since the last [`Self::lap_time`]
    pub fn is_lap_available(&self) -> bool {
        self.laps.is_available()
    }

    /// Most recent lap duration; clears the lap-available flag
    pub fn lap_time(&mut self) -> u32 {
        self.laps.most_recent()
    }

    /// Lap ring
    pub fn laps(&self) -> &LapHistory<LAPS> {
        &self.laps
    }

    /// Current peak in the open lap window
    pub fn peak(&self) -> PeakCapture {
        self.detector.peak()
    }

    /// Race clock origin (0 until the race starts)
    pub fn race_start(&self) -> Timestamp {
        self.race_start
    }

    /// Display status at `now`
    pub fn status(&self, now: Timestamp) -> RaceStatus {
        RaceStatus::compute(
            self.state,
            self.countdown.elapsed_or_zero(now),
            self.laps.lap_count(),
            self.laps.latest(),
        )
    }

    /// Threshold settings
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Threshold settings, for in-place edits between ticks
    pub fn config_mut(&mut self) -> &mut C {
        &mut self.config
    }

    /// Event consumer
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Event consumer, for draining buffered events
    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Indicator consumer
    pub fn indicators(&self) -> &I {
        &self.indicators
    }

    /// Receiver driver
    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }
}

impl<R, C, E, I, const LAPS: usize> core::fmt::Debug for LapTimer<R, C, E, I, LAPS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LapTimer")
            .field("state", &self.state)
            .field("lap_count", &self.laps.lap_count())
            .field("has_wrapped", &self.laps.has_wrapped())
            .field("race_start", &self.race_start)
            .field("lap_start", &self.lap_start)
            .field("peak", &self.detector.peak())
            .finish_non_exhaustive()
    }
}
