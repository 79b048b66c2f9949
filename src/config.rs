//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the Morse transmitter.
//! Pin mappings, timing defaults, and channel limits are centralized here.

use crate::types::{ChannelId, ChannelKind, ConfigError, Wpm};

/// Default sending speed in words per minute
pub const DEFAULT_WPM: u8 = 15;

/// Maximum message length in characters
///
/// The character index is an 8-bit counter on the smallest targets.
pub const MAX_MESSAGE_LEN: usize = 255;

/// Highest physical channel id that can be configured
pub const MAX_CHANNEL_ID: u8 = 31;

/// Interval between ticks of the polling loop in milliseconds
///
/// Must stay well below one unit at the fastest speed in use.
pub const POLL_INTERVAL_MS: u64 = 5;

/// Sidetone frequency for the continuous-wave channel
pub const SIDETONE_HZ: u32 = 700;

/// Message sent repeatedly by the beacon application
pub const BEACON_TEXT: &str = "VVV DE N0CALL `AR`";

/// Pause between beacon repetitions in milliseconds
pub const BEACON_PAUSE_MS: u64 = 10_000;

/// Speed of the continuous-wave beacon channel
pub const BEACON_CW_WPM: u8 = 20;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Keying line / status LED
    pub const KEY_LINE: &str = "PA5";

    /// Raw channel id of the keying line
    pub const KEY_LINE_ID: u8 = 5;

    /// Sidetone PWM output (TIM3 CH1)
    pub const SIDETONE: &str = "PA6";

    /// Raw channel id of the sidetone output
    pub const SIDETONE_ID: u8 = 6;
}

/// Description of one channel to configure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Actuator kind
    pub kind: ChannelKind,
    /// Physical channel id
    pub id: ChannelId,
    /// Initial sending speed
    pub wpm: Wpm,
}

impl ChannelConfig {
    /// Validate raw configuration values
    ///
    /// # Errors
    ///
    /// Returns the first invalid field: kind, then id, then speed.
    pub fn new(kind: u8, id: u8, wpm: u8) -> Result<Self, ConfigError> {
        let kind = ChannelKind::try_from(kind)?;
        let id = ChannelId::new(id).ok_or(ConfigError::ChannelIdOutOfRange(id))?;
        let wpm = Wpm::new(wpm).ok_or(ConfigError::InvalidWpm)?;
        Ok(Self { kind, id, wpm })
    }

    /// Toggle channel on the given id at the default speed
    #[must_use]
    pub const fn toggle(id: ChannelId) -> Self {
        Self {
            kind: ChannelKind::Toggle,
            id,
            wpm: default_wpm(),
        }
    }

    /// Continuous-wave channel on the given id at the default speed
    #[must_use]
    pub const fn continuous_wave(id: ChannelId) -> Self {
        Self {
            kind: ChannelKind::ContinuousWave,
            id,
            wpm: default_wpm(),
        }
    }

    /// Replace the speed
    #[must_use]
    pub const fn with_wpm(mut self, wpm: Wpm) -> Self {
        self.wpm = wpm;
        self
    }
}

/// Build the default sending speed
#[must_use]
pub const fn default_wpm() -> Wpm {
    match Wpm::new(DEFAULT_WPM) {
        Some(wpm) => wpm,
        None => panic!("DEFAULT_WPM must be non-zero"),
    }
}
