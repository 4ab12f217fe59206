//! Audible and visual race cues
//!
//! The engine decides *when* to beep or flash; the hardware is timed from the
//! background context. The two meet in an [`IndicatorLink`]:
//!
//! - [`IndicatorHandle`] is the engine's [`IndicatorSink`](crate::traits::IndicatorSink)
//! - [`PeripheralLoop`] drains the link and runs the [`Buzzer`] and [`Led`] timers
//!
//! Neither side ever blocks.

mod buzzer;
mod command;
mod led;
mod mailbox;

pub use buzzer::{Buzzer, BuzzerState};
pub use command::{BuzzerCommand, LedCommand};
pub use led::{Led, LedState};
pub use mailbox::{CommandSlot, IndicatorHandle, IndicatorLink};

use crate::time::Timestamp;
use crate::traits::{BuzzerOutput, LedOutput};

/// Background-context step: mailbox in, pin changes out
#[derive(Debug)]
pub struct PeripheralLoop<'a, B: BuzzerOutput, L: LedOutput> {
    link: &'a IndicatorLink,
    buzzer: Buzzer<B>,
    led: Led<L>,
}

impl<'a, B: BuzzerOutput, L: LedOutput> PeripheralLoop<'a, B, L> {
    /// Wrap the hardware; both outputs start silent and dark
    pub fn new(link: &'a IndicatorLink, buzzer: B, led: L) -> Self {
        Self {
            link,
            buzzer: Buzzer::new(buzzer),
            led: Led::new(led),
        }
    }

    /// Apply pending commands, then advance both timers
    pub fn tick(&mut self, now: Timestamp) {
        if let Some(command) = self.link.take_buzzer() {
            self.buzzer.apply(command, now);
        }
        if let Some(command) = self.link.take_led() {
            self.led.apply(command, now);
        }

        self.buzzer.tick(now);
        self.led.tick(now);
    }

    /// Buzzer timer
    pub fn buzzer(&self) -> &Buzzer<B> {
        &self.buzzer
    }

    /// LED timer
    pub fn led(&self) -> &Led<L> {
        &self.led
    }
}

/// Buzzer output that does nothing (headless builds, benches)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBuzzer;

impl BuzzerOutput for NullBuzzer {
    fn on(&mut self) {}

    fn tone(&mut self, _frequency_hz: u16) {}

    fn off(&mut self) {}
}

/// LED output that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLed;

impl LedOutput for NullLed {
    fn set(&mut self, _on: bool) {}
}
