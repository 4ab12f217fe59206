//! Indicator Constants
//!
//! Buzzer tones and LED durations for each race cue. Countdown and lap cues
//! are short and high, the stop cue is long and low so it is recognisable
//! without looking at the device.

/// Countdown beep pitch.
pub const COUNTDOWN_TONE_HZ: u16 = 500;

/// Countdown beep and blink length.
pub const COUNTDOWN_TONE_MS: u16 = 250;

/// Race start pitch.
pub const START_TONE_HZ: u16 = 800;

/// Race start tone and LED length.
pub const START_TONE_MS: u16 = 500;

/// Stop pitch.
pub const STOP_TONE_HZ: u16 = 400;

/// Stop tone and LED length.
pub const STOP_TONE_MS: u16 = 500;

/// Lap confirmation beep and LED length.
pub const LAP_BEEP_MS: u16 = 200;

/// Half-period of LED blinking.
pub const BLINK_HALF_PERIOD_MS: u64 = 50;

/// Highest frequency a packed buzzer command can carry.
pub const MAX_TONE_HZ: u16 = 0x1FFF;
