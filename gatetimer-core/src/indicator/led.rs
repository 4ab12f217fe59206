//! Non-blocking LED timer
//!
//! Solid flashes and blinking both end on their own once the commanded
//! duration passes. A zero duration holds the pattern until the next command.

use crate::constants::tones::BLINK_HALF_PERIOD_MS;
use crate::indicator::LedCommand;
use crate::time::{elapsed_since, Timestamp};
use crate::traits::LedOutput;

/// What the LED is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    /// Dark
    Off,
    /// Solid
    On {
        /// When it lit
        started: Timestamp,
        /// How long it stays lit (0 = until the next command)
        duration_ms: u16,
    },
    /// Toggling every [`BLINK_HALF_PERIOD_MS`]
    Blinking {
        /// When blinking began
        started: Timestamp,
        /// How long it blinks (0 = until the next command)
        duration_ms: u16,
        /// Time of the last toggle
        toggled: Timestamp,
        /// Current level
        lit: bool,
    },
}

/// LED driven from the background context
#[derive(Debug)]
pub struct Led<O: LedOutput> {
    output: O,
    state: LedState,
}

impl<O: LedOutput> Led<O> {
    /// Take ownership of the output and switch it off
    pub fn new(mut output: O) -> Self {
        output.set(false);
        Self { output, state: LedState::Off }
    }

    /// Start executing a command
    pub fn apply(&mut self, command: LedCommand, now: Timestamp) {
        match command {
            LedCommand::On { duration_ms } => {
                self.output.set(true);
                self.state = LedState::On { started: now, duration_ms };
            }
            LedCommand::Blink { duration_ms } => {
                self.output.set(true);
                self.state = LedState::Blinking {
                    started: now,
                    duration_ms,
                    toggled: now,
                    lit: true,
                };
            }
            LedCommand::Off => self.switch_off(),
        }
    }

    /// Advance the blink pattern and expire finished patterns
    pub fn tick(&mut self, now: Timestamp) {
        match self.state {
            LedState::Off => {}
            LedState::On { started, duration_ms } => {
                if expired(now, started, duration_ms) {
                    self.switch_off();
                }
            }
            LedState::Blinking { started, duration_ms, toggled, lit } => {
                if expired(now, started, duration_ms) {
                    self.switch_off();
                    return;
                }

                let due = elapsed_since(now, toggled)
                    .is_some_and(|elapsed| elapsed >= BLINK_HALF_PERIOD_MS);
                if due {
                    self.output.set(!lit);
                    self.state = LedState::Blinking {
                        started,
                        duration_ms,
                        toggled: now,
                        lit: !lit,
                    };
                }
            }
        }
    }

    /// Current state
    pub fn state(&self) -> LedState {
        self.state
    }

    /// Whether the LED is currently lit
    pub fn is_lit(&self) -> bool {
        match self.state {
            LedState::Off => false,
            LedState::On { .. } => true,
            LedState::Blinking { lit, .. } => lit,
        }
    }

    /// Hardware output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Release the hardware
    pub fn into_inner(self) -> O {
        self.output
    }

    fn switch_off(&mut self) {
        self.output.set(false);
        self.state = LedState::Off;
    }
}

/// Stale clocks never expire a pattern
fn expired(now: Timestamp, started: Timestamp, duration_ms: u16) -> bool {
    duration_ms != 0
        && elapsed_since(now, started).is_some_and(|elapsed| elapsed > u64::from(duration_ms))
}
