//! Shared types used across the Morse transmitter
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

/// Milliseconds read from a monotonic clock
pub type Millis = u64;

/// Sending speed in words per minute
///
/// Always non-zero, so the derived unit duration is always finite.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wpm(u8);

impl Wpm {
    /// Slowest accepted speed
    pub const MIN: u8 = 1;

    /// Fastest accepted speed
    pub const MAX: u8 = u8::MAX;

    /// Create a speed from words per minute, returns None for zero
    #[must_use]
    pub const fn new(wpm: u8) -> Option<Self> {
        if wpm >= Self::MIN {
            Some(Self(wpm))
        } else {
            None
        }
    }

    /// Get the speed in words per minute
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for Wpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wpm({})", self.0)
    }
}

impl fmt::Display for Wpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} WPM", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Wpm {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} WPM", self.0);
    }
}

/// Physical channel identifier
///
/// A GPIO line number for toggle channels, a tone channel number for
/// continuous-wave channels. Each kind numbers its channels independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId(u8);

impl ChannelId {
    /// Highest channel id the registry can track
    pub const MAX: u8 = crate::config::MAX_CHANNEL_ID;

    /// Create a channel id, returns None if above [`ChannelId::MAX`]
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if id <= Self::MAX {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Get the raw id
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ch{}", self.0);
    }
}

/// Kind of actuator a channel drives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelKind {
    /// Digital line switched high/low (LED, keying transistor)
    Toggle,
    /// Continuous-wave tone generator switched on/off
    ContinuousWave,
}

impl ChannelKind {
    /// Raw code for a toggle channel
    pub const RAW_TOGGLE: u8 = 0;

    /// Raw code for a continuous-wave channel
    pub const RAW_CONTINUOUS_WAVE: u8 = 1;

    /// Raw code for an analog input; known but unable to transmit
    pub const RAW_ANALOG_INPUT: u8 = 2;

    /// Get the raw code
    #[must_use]
    pub const fn raw(self) -> u8 {
        match self {
            Self::Toggle => Self::RAW_TOGGLE,
            Self::ContinuousWave => Self::RAW_CONTINUOUS_WAVE,
        }
    }
}

impl TryFrom<u8> for ChannelKind {
    type Error = ConfigError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            Self::RAW_TOGGLE => Ok(Self::Toggle),
            Self::RAW_CONTINUOUS_WAVE => Ok(Self::ContinuousWave),
            Self::RAW_ANALOG_INPUT => Err(ConfigError::UnsupportedChannelKind),
            other => Err(ConfigError::UnknownChannelKind(other)),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelKind {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Toggle => defmt::write!(f, "TOGGLE"),
            Self::ContinuousWave => defmt::write!(f, "CW"),
        }
    }
}

/// Logical output level requested by the transmitter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Level {
    /// Key up: line low, tone disabled
    #[default]
    Off,
    /// Key down: line high, tone enabled
    On,
}

impl Level {
    /// Check if this is the key-down level
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for Level {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Level {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// Channel configuration failure
///
/// There is no safe degraded behaviour for a misconfigured output line,
/// so the application treats all of these as fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Raw channel kind code not recognised
    UnknownChannelKind(u8),
    /// Channel kind recognised but cannot transmit
    UnsupportedChannelKind,
    /// Words per minute was zero
    InvalidWpm,
    /// Channel id above [`ChannelId::MAX`]
    ChannelIdOutOfRange(u8),
    /// A transmitter is already bound to this channel
    ChannelInUse(ChannelId),
    /// Configured kind does not match the actuator supplied
    KindMismatch {
        /// Kind the actuator implements
        expected: ChannelKind,
        /// Kind named in the configuration
        found: ChannelKind,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChannelKind(raw) => write!(f, "unknown channel kind {raw}"),
            Self::UnsupportedChannelKind => write!(f, "channel kind cannot transmit"),
            Self::InvalidWpm => write!(f, "words per minute must be non-zero"),
            Self::ChannelIdOutOfRange(raw) => write!(f, "channel id {raw} out of range"),
            Self::ChannelInUse(id) => write!(f, "channel {} already configured", id.raw()),
            Self::KindMismatch { expected, found } => {
                write!(f, "channel kind {found:?} given to a {expected:?} actuator")
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::UnknownChannelKind(raw) => defmt::write!(f, "unknown channel kind {}", raw),
            Self::UnsupportedChannelKind => defmt::write!(f, "channel kind cannot transmit"),
            Self::InvalidWpm => defmt::write!(f, "wpm must be non-zero"),
            Self::ChannelIdOutOfRange(raw) => defmt::write!(f, "channel id {} out of range", raw),
            Self::ChannelInUse(id) => defmt::write!(f, "{} already configured", id),
            Self::KindMismatch { expected, found } => {
                defmt::write!(f, "kind {} given to a {} actuator", found, expected);
            }
        }
    }
}
