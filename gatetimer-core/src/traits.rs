//! Collaborator traits
//!
//! The engine talks to everything outside the timing core through these
//! traits. Keep them simple - each one is implemented by a hardware driver on
//! the device and by a few lines of test code on the host.
//!
//! | Trait | Direction | Implemented by |
//! |---|---|---|
//! | [`RssiSource`] | in | RX5808 ADC driver, scripted traces |
//! | [`ThresholdSource`] | in | [`crate::RaceConfig`], [`crate::SharedThresholds`] |
//! | [`EventSink`] | out | [`crate::EventLog`], SPSC producer, `Vec` |
//! | [`IndicatorSink`] | out | [`crate::IndicatorHandle`] (mailbox) |
//! | [`BuzzerOutput`], [`LedOutput`] | out (background) | GPIO/PWM drivers |

use crate::config::Thresholds;
use crate::events::RaceEvent;
use crate::indicator::{BuzzerCommand, LedCommand};

/// Receiver driver: one RSSI sample per tick
pub trait RssiSource {
    /// Read the raw RSSI, scaled to 0–255
    ///
    /// Must not block; called once per primary tick.
    fn read_rssi(&mut self) -> u8;

    /// Retune the receiver. Drivers without tuning ignore it.
    fn tune(&mut self, _frequency_mhz: u16) {}
}

/// Settings read at the start of every tick
pub trait ThresholdSource {
    /// Current thresholds and minimum lap
    fn thresholds(&self) -> Thresholds;
}

/// Consumer of race events
///
/// Delivery is fire-and-forget: a sink that cannot take an event drops it.
/// Events are never replayed.
pub trait EventSink {
    /// Deliver one event
    fn emit(&mut self, event: RaceEvent);
}

/// Consumer of indicator commands issued by the engine
pub trait IndicatorSink {
    /// Command the buzzer
    fn buzzer(&mut self, command: BuzzerCommand);

    /// Command the LED
    fn led(&mut self, command: LedCommand);
}

/// Buzzer hardware, driven from the background context
pub trait BuzzerOutput {
    /// Drive an active buzzer
    fn on(&mut self);

    /// Drive a passive buzzer with a square wave
    fn tone(&mut self, frequency_hz: u16);

    /// Silence
    fn off(&mut self);
}

/// LED hardware, driven from the background context
pub trait LedOutput {
    /// Switch the LED
    fn set(&mut self, on: bool);
}

impl<T: RssiSource + ?Sized> RssiSource for &mut T {
    fn read_rssi(&mut self) -> u8 {
        (**self).read_rssi()
    }

    fn tune(&mut self, frequency_mhz: u16) {
        (**self).tune(frequency_mhz)
    }
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, event: RaceEvent) {
        (**self).emit(event)
    }
}

impl<T: IndicatorSink + ?Sized> IndicatorSink for &mut T {
    fn buzzer(&mut self, command: BuzzerCommand) {
        (**self).buzzer(command)
    }

    fn led(&mut self, command: LedCommand) {
        (**self).led(command)
    }
}

/// Discards events
impl EventSink for () {
    fn emit(&mut self, _event: RaceEvent) {}
}

/// Discards indicator commands
impl IndicatorSink for () {
    fn buzzer(&mut self, _command: BuzzerCommand) {}

    fn led(&mut self, _command: LedCommand) {}
}
