//! Cross-context command mailbox
//!
//! One atomic word per device. The engine posts with `Release`, the
//! background loop takes with `swap(0, AcqRel)`. There is no queue behind a
//! slot: a newer command replaces an unconsumed one, which is what makes the
//! stop cue authoritative.
//!
//! ```text
//!   primary context            IndicatorLink             background context
//!  ┌───────────────┐   post   ┌──────────────┐   take   ┌────────────────┐
//!  │ LapTimer      │─────────►│ buzzer: u32  │─────────►│ PeripheralLoop │
//!  │ (IndicatorHandle)        │ led:    u32  │          │ Buzzer / Led   │
//!  └───────────────┘          └──────────────┘          └────────────────┘
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use super::command::{BuzzerCommand, LedCommand};
use crate::traits::IndicatorSink;

const EMPTY: u32 = 0;

/// One device's slot
#[derive(Debug, Default)]
pub struct CommandSlot {
    raw: AtomicU32,
}

impl CommandSlot {
    /// Empty slot
    pub const fn new() -> Self {
        Self { raw: AtomicU32::new(EMPTY) }
    }

    /// Publish a packed command; returns true if it replaced an unconsumed one
    pub fn post(&self, raw: u32) -> bool {
        self.raw.swap(raw, Ordering::Release) != EMPTY
    }

    /// Take the pending command, leaving the slot empty
    pub fn take(&self) -> Option<u32> {
        match self.raw.swap(EMPTY, Ordering::AcqRel) {
            EMPTY => None,
            raw => Some(raw),
        }
    }

    /// Whether a command is waiting
    pub fn is_pending(&self) -> bool {
        self.raw.load(Ordering::Acquire) != EMPTY
    }
}

/// Buzzer and LED mailboxes shared by both contexts
///
/// Lives in a `static` on the device or on the stack of a scoped-thread test.
#[derive(Debug, Default)]
pub struct IndicatorLink {
    buzzer: CommandSlot,
    led: CommandSlot,
    superseded: AtomicU32,
}

impl IndicatorLink {
    /// Empty link
    pub const fn new() -> Self {
        Self {
            buzzer: CommandSlot::new(),
            led: CommandSlot::new(),
            superseded: AtomicU32::new(0),
        }
    }

    /// Producer handle for the engine
    pub fn handle(&self) -> IndicatorHandle<'_> {
        IndicatorHandle { link: self }
    }

    /// Post a buzzer command
    pub fn post_buzzer(&self, command: BuzzerCommand) {
        if self.buzzer.post(command.pack()) {
            self.note_superseded();
        }
    }

    /// Post an LED command
    pub fn post_led(&self, command: LedCommand) {
        if self.led.post(command.pack()) {
            self.note_superseded();
        }
    }

    /// Take the pending buzzer command
    pub fn take_buzzer(&self) -> Option<BuzzerCommand> {
        self.buzzer.take().and_then(BuzzerCommand::unpack)
    }

    /// Take the pending LED command
    pub fn take_led(&self) -> Option<LedCommand> {
        self.led.take().and_then(LedCommand::unpack)
    }

    /// Commands replaced before the background loop picked them up
    pub fn superseded(&self) -> u32 {
        self.superseded.load(Ordering::Relaxed)
    }

    fn note_superseded(&self) {
        self.superseded.fetch_add(1, Ordering::Relaxed);
    }
}

/// Engine-side view of an [`IndicatorLink`]
#[derive(Debug, Clone, Copy)]
pub struct IndicatorHandle<'a> {
    link: &'a IndicatorLink,
}

impl IndicatorSink for IndicatorHandle<'_> {
    fn buzzer(&mut self, command: BuzzerCommand) {
        self.link.post_buzzer(command);
    }

    fn led(&mut self, command: LedCommand) {
        self.link.post_led(command);
    }
}
