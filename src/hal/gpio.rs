//! GPIO Abstractions
//!
//! Keying line on a push-pull output. The toggle channel drives it through
//! `embedded_hal::digital::OutputPin`, which embassy outputs implement.

use embassy_stm32::gpio::{Level, Output, Pin, Speed};
use embassy_stm32::Peripheral;

use crate::morse::ToggleLine;

/// Keying line on an embassy output pin
pub type KeyLine<'d> = ToggleLine<Output<'d>>;

/// Configure `pin` as a keying line, initially key up
#[must_use]
pub fn key_line<'d>(pin: impl Peripheral<P = impl Pin> + 'd) -> KeyLine<'d> {
    ToggleLine::new(Output::new(pin, Level::Low, Speed::Low))
}
