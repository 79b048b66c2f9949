//! Morse Unit Timing
//!
//! Converts a words-per-minute speed into the base unit and the standard
//! element and gap durations. Uses the PARIS convention of 50 units per
//! word, so one unit lasts `60 / (50 × wpm)` seconds.

use crate::morse::code_table::Element;
use crate::types::{Millis, Wpm};

/// A timed interval of the Morse waveform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interval {
    /// Dit tone (1 unit)
    Dit,
    /// Dah tone (3 units)
    Dah,
    /// Silence between elements of one character (1 unit)
    ElementGap,
    /// Silence between characters (3 units)
    CharGap,
    /// Silent hold for a space character (7 units)
    WordSpace,
}

impl Interval {
    /// Get duration in timing units
    #[must_use]
    pub const fn units(self) -> u8 {
        match self {
            Self::Dit | Self::ElementGap => 1,
            Self::Dah | Self::CharGap => 3,
            Self::WordSpace => 7,
        }
    }

    /// Check if this interval keys the output
    #[must_use]
    pub const fn is_tone(self) -> bool {
        matches!(self, Self::Dit | Self::Dah)
    }
}

impl From<Element> for Interval {
    fn from(element: Element) -> Self {
        match element {
            Element::Dit => Self::Dit,
            Element::Dah => Self::Dah,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Interval {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Dit => defmt::write!(f, "DIT"),
            Self::Dah => defmt::write!(f, "DAH"),
            Self::ElementGap => defmt::write!(f, "IE_GAP"),
            Self::CharGap => defmt::write!(f, "IC_GAP"),
            Self::WordSpace => defmt::write!(f, "WORD"),
        }
    }
}

/// Unit durations for one speed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitTiming {
    wpm: Wpm,
    unit_ms: f32,
}

impl UnitTiming {
    /// Seconds per minute
    const SECONDS_PER_MINUTE: f32 = 60.0;

    /// Units in the reference word "PARIS "
    const UNITS_PER_WORD: f32 = 50.0;

    /// Derive the unit durations for a speed
    #[must_use]
    pub fn from_wpm(wpm: Wpm) -> Self {
        let unit_ms =
            (Self::SECONDS_PER_MINUTE / (Self::UNITS_PER_WORD * f32::from(wpm.get()))) * 1000.0;
        Self { wpm, unit_ms }
    }

    /// Speed these durations were derived from
    #[must_use]
    pub const fn wpm(&self) -> Wpm {
        self.wpm
    }

    /// Base unit in milliseconds
    #[must_use]
    pub const fn unit(&self) -> f32 {
        self.unit_ms
    }

    /// Dit duration in milliseconds
    #[must_use]
    pub fn dit(&self) -> f32 {
        self.interval(Interval::Dit)
    }

    /// Dah duration in milliseconds
    #[must_use]
    pub fn dah(&self) -> f32 {
        self.interval(Interval::Dah)
    }

    /// Gap between elements of a character in milliseconds
    #[must_use]
    pub fn element_gap(&self) -> f32 {
        self.interval(Interval::ElementGap)
    }

    /// Gap between characters in milliseconds
    #[must_use]
    pub fn char_gap(&self) -> f32 {
        self.interval(Interval::CharGap)
    }

    /// Word space in milliseconds
    #[must_use]
    pub fn word_space(&self) -> f32 {
        self.interval(Interval::WordSpace)
    }

    /// Duration of an interval in (fractional) milliseconds
    #[must_use]
    pub fn interval(&self, interval: Interval) -> f32 {
        f32::from(interval.units()) * self.unit_ms
    }

    /// Duration of an interval in whole milliseconds, truncated
    #[must_use]
    pub fn duration_ms(&self, interval: Interval) -> Millis {
        // Always positive and far below u32::MAX, so the cast only truncates
        self.interval(interval) as Millis
    }
}

impl Default for UnitTiming {
    fn default() -> Self {
        Self::from_wpm(crate::config::default_wpm())
    }
}
