//! Non-blocking buzzer timer
//!
//! Started by a command, stopped by [`Buzzer::tick`] once the duration has
//! passed. The start time is the background loop's own clock reading, but the
//! expiry check still goes through [`elapsed_since`] so a clock that steps
//! backwards keeps the buzzer on instead of cutting it short.

use crate::indicator::BuzzerCommand;
use crate::time::{elapsed_since, Timestamp};
use crate::traits::BuzzerOutput;

/// What the buzzer is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerState {
    /// Silent
    Idle,
    /// Active-buzzer beep in progress
    Beeping {
        /// When the beep began
        started: Timestamp,
        /// How long it lasts
        duration_ms: u16,
    },
    /// PWM tone in progress
    Tone {
        /// When the tone began
        started: Timestamp,
        /// How long it lasts
        duration_ms: u16,
    },
}

/// Buzzer driven from the background context
#[derive(Debug)]
pub struct Buzzer<O: BuzzerOutput> {
    output: O,
    state: BuzzerState,
}

impl<O: BuzzerOutput> Buzzer<O> {
    /// Take ownership of the output and silence it
    pub fn new(mut output: O) -> Self {
        output.off();
        Self { output, state: BuzzerState::Idle }
    }

    /// Start executing a command
    pub fn apply(&mut self, command: BuzzerCommand, now: Timestamp) {
        match command {
            BuzzerCommand::Beep { duration_ms } => {
                self.output.on();
                self.state = BuzzerState::Beeping { started: now, duration_ms };
            }
            BuzzerCommand::Tone { frequency_hz, duration_ms } => {
                self.output.tone(frequency_hz);
                self.state = BuzzerState::Tone { started: now, duration_ms };
            }
            BuzzerCommand::Off => self.silence(),
        }
    }

    /// Silence once the current sound has run its course
    pub fn tick(&mut self, now: Timestamp) {
        let (started, duration_ms) = match self.state {
            BuzzerState::Idle => return,
            BuzzerState::Beeping { started, duration_ms }
            | BuzzerState::Tone { started, duration_ms } => (started, duration_ms),
        };

        // Stale clock: nothing has elapsed yet
        let Some(elapsed) = elapsed_since(now, started) else {
            return;
        };

        if elapsed > u64::from(duration_ms) {
            self.silence();
        }
    }

    /// Current state
    pub fn state(&self) -> BuzzerState {
        self.state
    }

    /// Whether a sound is playing
    pub fn is_active(&self) -> bool {
        self.state != BuzzerState::Idle
    }

    /// Hardware output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Release the hardware
    pub fn into_inner(self) -> O {
        self.output
    }

    fn silence(&mut self) {
        self.output.off();
        self.state = BuzzerState::Idle;
    }
}
