//! PWM Sidetone
//!
//! Continuous-wave tone generator built on a timer PWM channel running a
//! 50% square wave at the sidetone frequency. Keying enables and disables
//! the channel output; the waveform itself keeps running.

use embassy_stm32::timer::low_level::OutputPolarity;
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_stm32::timer::GeneralInstance4Channel;

use crate::morse::ToneGenerator;

/// Output polarity of the tone channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TonePolarity {
    /// Active high
    #[default]
    Normal,
    /// Active low, for inverting output stages
    Inverted,
}

impl TonePolarity {
    const fn as_output_polarity(self) -> OutputPolarity {
        match self {
            Self::Normal => OutputPolarity::ActiveHigh,
            Self::Inverted => OutputPolarity::ActiveLow,
        }
    }
}

impl defmt::Format for TonePolarity {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Normal => defmt::write!(f, "NORMAL"),
            Self::Inverted => defmt::write!(f, "INVERTED"),
        }
    }
}

/// Square-wave sidetone on one PWM channel
pub struct PwmTone<'d, T: GeneralInstance4Channel> {
    channel: SimplePwmChannel<'d, T>,
    polarity: TonePolarity,
}

impl<'d, T: GeneralInstance4Channel> PwmTone<'d, T> {
    /// Select and configure the channel; the tone starts disabled
    #[must_use]
    pub fn new(mut channel: SimplePwmChannel<'d, T>, polarity: TonePolarity) -> Self {
        channel.disable();
        channel.set_polarity(polarity.as_output_polarity());
        channel.set_duty_cycle_fraction(1, 2);
        Self { channel, polarity }
    }

    /// Get the configured polarity
    #[must_use]
    pub const fn polarity(&self) -> TonePolarity {
        self.polarity
    }

    /// Check if the channel output is enabled
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.channel.is_enabled()
    }
}

impl<T: GeneralInstance4Channel> ToneGenerator for PwmTone<'_, T> {
    fn enable_tone(&mut self) {
        self.channel.enable();
    }

    fn disable_tone(&mut self) {
        self.channel.disable();
    }
}
