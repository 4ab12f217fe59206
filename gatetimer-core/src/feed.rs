//! Dashboard event feed
//!
//! Turns engine output into server-sent-event frames for the web dashboard.
//! Event names and payloads match what the dashboard script listens for:
//!
//! | Source | `event:` | `data:` |
//! |---|---|---|
//! | `CountdownTick` | `countdown` | `3` / `2` / `1` |
//! | `RaceStarted` | `race` | `start` |
//! | `LapCompleted` | `lapComplete` | `{"lap":N,"time":T}` |
//! | `RaceFinished` | `race` | `finish` |
//! | lap-available poll | `lap` | lap time in ms |
//! | RSSI poll (rate-limited) | `rssi` | filtered RSSI |
//!
//! The HTTP transport itself lives outside this crate.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::constants::timing::RSSI_FEED_INTERVAL_MS;
use crate::events::RaceEvent;
use crate::race::LapTimer;
use crate::time::{elapsed_since, Timestamp};
use crate::traits::{EventSink, IndicatorSink, RssiSource, ThresholdSource};

/// Room for the largest payload (`{"lap":255,"time":4294967295}`)
pub const FRAME_DATA_CAPACITY: usize = 32;

/// Room for a whole rendered frame
pub const FRAME_TEXT_CAPACITY: usize = 64;

/// One server-sent event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// `event:` field
    pub name: &'static str,
    /// `data:` field
    pub data: String<FRAME_DATA_CAPACITY>,
}

impl SseFrame {
    fn with(name: &'static str, args: fmt::Arguments<'_>) -> Self {
        let mut data = String::new();
        // Every payload above fits the capacity
        let _ = data.write_fmt(args);
        Self { name, data }
    }

    /// Frame for an engine event
    pub fn from_event(event: &RaceEvent) -> Self {
        match *event {
            RaceEvent::CountdownTick { remaining } => {
                Self::with("countdown", format_args!("{}", remaining))
            }
            RaceEvent::RaceStarted => Self::with("race", format_args!("start")),
            RaceEvent::LapCompleted { lap, duration_ms } => Self::with(
                "lapComplete",
                format_args!("{{\"lap\":{},\"time\":{}}}", lap, duration_ms),
            ),
            RaceEvent::RaceFinished => Self::with("race", format_args!("finish")),
        }
    }

    /// Polled lap time
    pub fn lap(duration_ms: u32) -> Self {
        Self::with("lap", format_args!("{}", duration_ms))
    }

    /// Polled RSSI
    pub fn rssi(rssi: u8) -> Self {
        Self::with("rssi", format_args!("{}", rssi))
    }

    /// Wire text: `event: <name>\ndata: <data>\n\n`
    pub fn render(&self) -> String<FRAME_TEXT_CAPACITY> {
        let mut text = String::new();
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for SseFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event: {}\ndata: {}\n\n", self.name, self.data)
    }
}

impl From<RaceEvent> for SseFrame {
    fn from(event: RaceEvent) -> Self {
        Self::from_event(&event)
    }
}

/// Polled part of the feed
///
/// [`WebFeed::poll`] takes the engine mutably (it clears the lap flag), so
/// the primary context calls it after its tick and hands the frames to the
/// web context, e.g. through a `heapless::spsc` queue. Pushed events go
/// through [`SseFrame::from_event`] as they are drained from the engine's
/// sink.
#[derive(Debug, Clone, Default)]
pub struct WebFeed {
    rssi_enabled: bool,
    rssi_sent: Timestamp,
}

impl WebFeed {
    /// Feed with RSSI streaming off
    pub const fn new() -> Self {
        Self {
            rssi_enabled: false,
            rssi_sent: 0,
        }
    }

    /// Turn RSSI streaming on or off (the dashboard's calibration view)
    pub fn set_rssi_streaming(&mut self, enabled: bool) {
        self.rssi_enabled = enabled;
    }

    /// Whether RSSI frames are being produced
    pub fn is_streaming_rssi(&self) -> bool {
        self.rssi_enabled
    }

    /// Frames due at `now`: a `lap` frame if a lap is waiting, an `rssi`
    /// frame if streaming and the rate limit has passed
    ///
    /// Taking the lap clears the engine's lap-available flag.
    pub fn poll<R, C, E, I, const LAPS: usize>(
        &mut self,
        timer: &mut LapTimer<R, C, E, I, LAPS>,
        now: Timestamp,
    ) -> Vec<SseFrame, 2>
    where
        R: RssiSource,
        C: ThresholdSource,
        E: EventSink,
        I: IndicatorSink,
    {
        let mut frames = Vec::new();

        if timer.is_lap_available() {
            let _ = frames.push(SseFrame::lap(timer.lap_time()));
        }

        if self.rssi_due(now) {
            self.rssi_sent = now;
            let _ = frames.push(SseFrame::rssi(timer.rssi()));
        }

        frames
    }

    fn rssi_due(&self, now: Timestamp) -> bool {
        self.rssi_enabled
            && elapsed_since(now, self.rssi_sent).is_some_and(|e| e > RSSI_FEED_INTERVAL_MS)
    }
}
