//! Indicator commands and their packed mailbox form
//!
//! A command crosses contexts as a single `u32` so it can never be observed
//! half-written:
//!
//! ```text
//!  31   29 28            16 15                 0
//! ┌───────┬────────────────┬────────────────────┐
//! │ kind  │ frequency (Hz) │ duration (ms)      │
//! │ 3 bit │ 13 bit         │ 16 bit             │
//! └───────┴────────────────┴────────────────────┘
//! ```
//!
//! Kind 0 is reserved for "empty", so a packed command is never zero.

use crate::constants::tones::MAX_TONE_HZ;

const KIND_SHIFT: u32 = 29;
const FREQ_SHIFT: u32 = 16;
const FREQ_MASK: u32 = 0x1FFF;
const DURATION_MASK: u32 = 0xFFFF;

const KIND_ON: u32 = 1;
const KIND_PATTERN: u32 = 2;
const KIND_OFF: u32 = 3;

/// What the buzzer should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerCommand {
    /// Drive the buzzer pin for `duration_ms`
    Beep {
        /// Length of the beep
        duration_ms: u16,
    },
    /// Square wave at `frequency_hz` for `duration_ms`
    Tone {
        /// Pitch, at most [`MAX_TONE_HZ`]
        frequency_hz: u16,
        /// Length of the tone
        duration_ms: u16,
    },
    /// Silence immediately
    Off,
}

impl BuzzerCommand {
    /// Tone with the pitch clamped into the packable range
    pub fn tone(frequency_hz: u16, duration_ms: u16) -> Self {
        BuzzerCommand::Tone {
            frequency_hz: frequency_hz.min(MAX_TONE_HZ),
            duration_ms,
        }
    }

    /// Packed mailbox form
    pub fn pack(self) -> u32 {
        match self {
            BuzzerCommand::Beep { duration_ms } => pack(KIND_ON, 0, duration_ms),
            BuzzerCommand::Tone { frequency_hz, duration_ms } => {
                pack(KIND_PATTERN, frequency_hz, duration_ms)
            }
            BuzzerCommand::Off => pack(KIND_OFF, 0, 0),
        }
    }

    /// Decode a packed command; `None` for the empty value or garbage
    pub fn unpack(raw: u32) -> Option<Self> {
        let (kind, frequency_hz, duration_ms) = unpack(raw);
        match kind {
            KIND_ON => Some(BuzzerCommand::Beep { duration_ms }),
            KIND_PATTERN => Some(BuzzerCommand::Tone { frequency_hz, duration_ms }),
            KIND_OFF => Some(BuzzerCommand::Off),
            _ => None,
        }
    }
}

/// What the LED should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedCommand {
    /// Light for `duration_ms`; 0 keeps it lit until the next command
    On {
        /// Length of the flash
        duration_ms: u16,
    },
    /// Toggle for `duration_ms`; 0 blinks until the next command
    Blink {
        /// Length of the blinking
        duration_ms: u16,
    },
    /// Dark immediately
    Off,
}

impl LedCommand {
    /// Packed mailbox form
    pub fn pack(self) -> u32 {
        match self {
            LedCommand::On { duration_ms } => pack(KIND_ON, 0, duration_ms),
            LedCommand::Blink { duration_ms } => pack(KIND_PATTERN, 0, duration_ms),
            LedCommand::Off => pack(KIND_OFF, 0, 0),
        }
    }

    /// Decode a packed command; `None` for the empty value or garbage
    pub fn unpack(raw: u32) -> Option<Self> {
        let (kind, _, duration_ms) = unpack(raw);
        match kind {
            KIND_ON => Some(LedCommand::On { duration_ms }),
            KIND_PATTERN => Some(LedCommand::Blink { duration_ms }),
            KIND_OFF => Some(LedCommand::Off),
            _ => None,
        }
    }
}

#[inline]
fn pack(kind: u32, frequency_hz: u16, duration_ms: u16) -> u32 {
    (kind << KIND_SHIFT)
        | ((u32::from(frequency_hz) & FREQ_MASK) << FREQ_SHIFT)
        | (u32::from(duration_ms) & DURATION_MASK)
}

#[inline]
fn unpack(raw: u32) -> (u32, u16, u16) {
    (
        raw >> KIND_SHIFT,
        ((raw >> FREQ_SHIFT) & FREQ_MASK) as u16,
        (raw & DURATION_MASK) as u16,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_commands_are_never_empty() {
        let commands = [
            BuzzerCommand::Beep { duration_ms: 0 }.pack(),
            BuzzerCommand::tone(0, 0).pack(),
            BuzzerCommand::Off.pack(),
            LedCommand::On { duration_ms: 0 }.pack(),
            LedCommand::Blink { duration_ms: 0 }.pack(),
            LedCommand::Off.pack(),
        ];
        assert!(commands.iter().all(|&raw| raw != 0));
    }

    #[test]
    fn stop_tone_survives_packing() {
        let stop = BuzzerCommand::tone(400, 500);
        assert_eq!(BuzzerCommand::unpack(stop.pack()), Some(stop));
    }

    #[test]
    fn pitch_is_clamped_to_field_width() {
        assert_eq!(
            BuzzerCommand::tone(10_000, 100),
            BuzzerCommand::Tone { frequency_hz: MAX_TONE_HZ, duration_ms: 100 }
        );
    }

    #[test]
    fn empty_and_garbage_decode_to_none() {
        assert_eq!(BuzzerCommand::unpack(0), None);
        assert_eq!(LedCommand::unpack(0), None);
        assert_eq!(LedCommand::unpack(7 << KIND_SHIFT), None);
    }
}
