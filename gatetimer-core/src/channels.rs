//! 5.8 GHz video channel table
//!
//! The receiver is tuned by frequency; pilots talk in band letter plus channel
//! number ("R1", "F4"). This table maps between the two and provides the
//! band/channel stepping the single-button UI uses.

use core::fmt;

use crate::errors::{ConfigError, ConfigResult};

/// Channels per band
pub const CHANNELS_PER_BAND: u8 = 8;

/// Video transmitter band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Band {
    /// Boscam A
    A = 0,
    /// Boscam B
    B = 1,
    /// Boscam E
    E = 2,
    /// Fatshark / IRC
    F = 3,
    /// Raceband
    R = 4,
}

impl Band {
    /// All bands in UI order
    pub const ALL: [Band; 5] = [Band::A, Band::B, Band::E, Band::F, Band::R];

    const fn frequencies(self) -> &'static [u16; CHANNELS_PER_BAND as usize] {
        match self {
            Band::A => &[5865, 5845, 5825, 5805, 5785, 5765, 5745, 5725],
            Band::B => &[5733, 5752, 5771, 5790, 5809, 5828, 5847, 5866],
            Band::E => &[5705, 5685, 5665, 5645, 5885, 5905, 5925, 5945],
            Band::F => &[5740, 5760, 5780, 5800, 5820, 5840, 5860, 5880],
            Band::R => &[5658, 5695, 5732, 5769, 5806, 5843, 5880, 5917],
        }
    }

    /// Single letter used on the display
    pub const fn letter(self) -> char {
        match self {
            Band::A => 'A',
            Band::B => 'B',
            Band::E => 'E',
            Band::F => 'F',
            Band::R => 'R',
        }
    }

    /// Long name
    pub const fn name(self) -> &'static str {
        match self {
            Band::A => "Band A",
            Band::B => "Band B",
            Band::E => "Band E",
            Band::F => "Band F",
            Band::R => "Band R",
        }
    }

    /// Parse a band letter (case-insensitive)
    pub fn from_letter(letter: char) -> ConfigResult<Band> {
        match letter.to_ascii_uppercase() {
            'A' => Ok(Band::A),
            'B' => Ok(Band::B),
            'E' => Ok(Band::E),
            'F' => Ok(Band::F),
            'R' => Ok(Band::R),
            _ => Err(ConfigError::UnknownChannel),
        }
    }

    /// Next band, wrapping R → A
    pub fn next(self) -> Band {
        Band::ALL[(self as usize + 1) % Band::ALL.len()]
    }
}

/// Band plus 0-based channel index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    band: Band,
    index: u8,
}

impl Channel {
    /// R1, the power-on channel
    pub const DEFAULT: Channel = Channel { band: Band::R, index: 0 };

    /// Create from band and 1-based channel number
    pub fn new(band: Band, number: u8) -> ConfigResult<Channel> {
        if number == 0 || number > CHANNELS_PER_BAND {
            return Err(ConfigError::UnknownChannel);
        }
        Ok(Channel { band, index: number - 1 })
    }

    /// Parse "R1", "f4", ...
    pub fn parse(name: &str) -> ConfigResult<Channel> {
        let mut chars = name.trim().chars();
        let band = Band::from_letter(chars.next().ok_or(ConfigError::UnknownChannel)?)?;
        let number = chars
            .as_str()
            .parse::<u8>()
            .map_err(|_| ConfigError::UnknownChannel)?;
        Channel::new(band, number)
    }

    /// Find the channel for a frequency
    ///
    /// A few frequencies appear in two bands (5880 is F8 and R7); the first
    /// match in [`Band::ALL`] order wins.
    pub fn from_frequency(frequency_mhz: u16) -> ConfigResult<Channel> {
        Band::ALL
            .iter()
            .find_map(|&band| {
                band.frequencies()
                    .iter()
                    .position(|&f| f == frequency_mhz)
                    .map(|index| Channel { band, index: index as u8 })
            })
            .ok_or(ConfigError::FrequencyOutOfBand { frequency_mhz })
    }

    /// Band
    pub fn band(&self) -> Band {
        self.band
    }

    /// 1-based channel number
    pub fn number(&self) -> u8 {
        self.index + 1
    }

    /// Centre frequency in MHz
    pub const fn frequency_mhz(&self) -> u16 {
        self.band.frequencies()[self.index as usize]
    }

    /// Next channel in the same band, wrapping 8 → 1
    pub fn next_channel(self) -> Channel {
        Channel {
            band: self.band,
            index: (self.index + 1) % CHANNELS_PER_BAND,
        }
    }

    /// Same channel number in the next band
    pub fn next_band(self) -> Channel {
        Channel {
            band: self.band.next(),
            index: self.index,
        }
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.band.letter(), self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raceband_frequencies() {
        let r1 = Channel::new(Band::R, 1).unwrap();
        assert_eq!(r1.frequency_mhz(), 5658);
        assert_eq!(Channel::new(Band::R, 8).unwrap().frequency_mhz(), 5917);
    }

    #[test]
    fn parse_names() {
        assert_eq!(Channel::parse("F4").unwrap().frequency_mhz(), 5800);
        assert_eq!(Channel::parse(" e5 ").unwrap().frequency_mhz(), 5885);
        assert_eq!(Channel::parse("R9"), Err(ConfigError::UnknownChannel));
        assert_eq!(Channel::parse("X1"), Err(ConfigError::UnknownChannel));
        assert_eq!(Channel::parse(""), Err(ConfigError::UnknownChannel));
    }

    #[test]
    fn frequency_lookup() {
        let ch = Channel::from_frequency(5732).unwrap();
        assert_eq!(ch.to_string(), "R3");

        // Shared frequency resolves to the earlier band
        assert_eq!(Channel::from_frequency(5880).unwrap().to_string(), "F8");

        assert_eq!(
            Channel::from_frequency(5000),
            Err(ConfigError::FrequencyOutOfBand { frequency_mhz: 5000 })
        );
    }

    #[test]
    fn stepping_wraps() {
        let r8 = Channel::new(Band::R, 8).unwrap();
        assert_eq!(r8.next_channel().to_string(), "R1");
        assert_eq!(r8.next_band().to_string(), "A8");
        assert_eq!(Band::A.next(), Band::B);
    }
}
