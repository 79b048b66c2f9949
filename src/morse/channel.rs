//! Channel Adapters
//!
//! Binds a [`Transmitter`] to a physical actuator. Two actuator kinds share
//! the same transmitter logic:
//!
//! - [`ToggleLine`]: a digital output switched high for key down
//! - [`ToneKey`]: a continuous-wave tone generator enabled for key down
//!
//! Channels are created through
//! [`ChannelRegistry::configure`](crate::morse::registry::ChannelRegistry::configure),
//! which guarantees one transmitter per physical channel. A channel holds
//! its claim until it is released or dropped.

use embedded_hal::digital::OutputPin;

use crate::morse::registry::Claim;
use crate::morse::transmitter::{Keying, Phase, SubmitOutcome, Transmitter};
use crate::types::{ChannelId, ChannelKind, Level, Millis, Wpm};

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary epoch, never decreasing
    fn now_millis(&self) -> Millis;
}

impl<F: Fn() -> Millis> Clock for F {
    fn now_millis(&self) -> Millis {
        self()
    }
}

/// Continuous-wave tone generator
pub trait ToneGenerator {
    /// Start the tone
    fn enable_tone(&mut self);
    /// Stop the tone
    fn disable_tone(&mut self);
}

impl<T: ToneGenerator + ?Sized> ToneGenerator for &mut T {
    fn enable_tone(&mut self) {
        (**self).enable_tone();
    }

    fn disable_tone(&mut self) {
        (**self).disable_tone();
    }
}

/// Keying output with a fixed channel kind
pub trait Actuator: Keying {
    /// Kind of channel this actuator serves
    const KIND: ChannelKind;
}

/// Digital keying line
#[derive(Debug)]
pub struct ToggleLine<P> {
    pin: P,
    level: Level,
}

impl<P: OutputPin> ToggleLine<P> {
    /// Wrap an output pin, driving it low
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self {
            pin,
            level: Level::Off,
        }
    }

    /// Last level written
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Get the underlying pin
    #[must_use]
    pub const fn pin(&self) -> &P {
        &self.pin
    }

    /// Release the underlying pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Keying for ToggleLine<P> {
    fn key(&mut self, level: Level) {
        // A pin error cannot be reported from the tick path; the next
        // write retries the same level.
        let _ = match level {
            Level::On => self.pin.set_high(),
            Level::Off => self.pin.set_low(),
        };
        self.level = level;
    }
}

impl<P: OutputPin> Actuator for ToggleLine<P> {
    const KIND: ChannelKind = ChannelKind::Toggle;
}

/// Tone generator keyed on and off
///
/// Tracks the generator state and drops repeated requests for the level it
/// already has.
#[derive(Debug)]
pub struct ToneKey<T> {
    generator: T,
    enabled: bool,
}

impl<T: ToneGenerator> ToneKey<T> {
    /// Wrap a tone generator, disabling it
    pub fn new(mut generator: T) -> Self {
        generator.disable_tone();
        Self {
            generator,
            enabled: false,
        }
    }

    /// Check if the tone is currently enabled
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the underlying generator
    #[must_use]
    pub const fn generator(&self) -> &T {
        &self.generator
    }

    /// Release the underlying generator
    pub fn release(self) -> T {
        self.generator
    }
}

impl<T: ToneGenerator> Keying for ToneKey<T> {
    fn key(&mut self, level: Level) {
        match (level, self.enabled) {
            (Level::On, false) => {
                self.generator.enable_tone();
                self.enabled = true;
            }
            (Level::Off, true) => {
                self.generator.disable_tone();
                self.enabled = false;
            }
            _ => {}
        }
    }
}

impl<T: ToneGenerator> Actuator for ToneKey<T> {
    const KIND: ChannelKind = ChannelKind::ContinuousWave;
}

/// Channel driving a keying line
pub type ToggleChannel<'r, P> = Channel<'r, ToggleLine<P>>;

/// Channel driving a tone generator
pub type CwChannel<'r, T> = Channel<'r, ToneKey<T>>;

/// One transmitter bound to one actuator
#[derive(Debug)]
pub struct Channel<'r, A> {
    claim: Claim<'r>,
    transmitter: Transmitter,
    actuator: A,
}

impl<'r, A: Actuator> Channel<'r, A> {
    /// Bind a transmitter to an actuator; use the registry to configure
    pub(crate) fn new(claim: Claim<'r>, wpm: Wpm, actuator: A) -> Self {
        Self {
            claim,
            transmitter: Transmitter::new(wpm),
            actuator,
        }
    }

    /// Start sending `text` and key its first element
    ///
    /// A message already in flight is left untouched and `text` is dropped.
    /// The output is already keyed up whenever the channel is idle.
    pub fn submit(&mut self, text: &str, now: Millis) -> SubmitOutcome {
        if self.transmitter.is_sending() {
            #[cfg(feature = "embedded")]
            defmt::warn!("{}: busy, message dropped", self.id());
            return SubmitOutcome::Busy;
        }

        let outcome = self.transmitter.submit(text, now);
        #[cfg(feature = "embedded")]
        defmt::debug!("{}: sending {=str}", self.id(), self.transmitter.message());

        self.tick(now);
        outcome
    }

    /// Advance the transmitter to `now`
    pub fn tick(&mut self, now: Millis) {
        if !self.transmitter.is_sending() {
            return;
        }
        self.transmitter.tick(now, &mut self.actuator);

        #[cfg(feature = "embedded")]
        if !self.transmitter.is_sending() {
            defmt::debug!("{}: message complete", self.id());
        }
    }

    /// Advance the transmitter to the clock's current reading
    pub fn poll<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.tick(clock.now_millis());
    }

    /// Abandon the current message and key up
    pub fn stop(&mut self) {
        #[cfg(feature = "embedded")]
        if self.transmitter.is_sending() {
            defmt::info!("{}: stopped", self.id());
        }
        self.transmitter.stop();
        self.actuator.key(Level::Off);
    }

    /// Change speed, effective from the next element boundary
    pub fn set_wpm(&mut self, wpm: Wpm) {
        #[cfg(feature = "embedded")]
        defmt::debug!("{}: speed {}", self.id(), wpm);
        self.transmitter.set_wpm(wpm);
    }

    /// Check if a message is in flight
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        self.transmitter.is_sending()
    }

    /// Current transmitter phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.transmitter.phase()
    }

    /// Physical channel id
    #[must_use]
    pub const fn id(&self) -> ChannelId {
        self.claim.id()
    }

    /// Channel kind
    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        A::KIND
    }

    /// Current speed
    #[must_use]
    pub const fn wpm(&self) -> Wpm {
        self.transmitter.wpm()
    }

    /// Inspect the transmitter
    #[must_use]
    pub const fn transmitter(&self) -> &Transmitter {
        &self.transmitter
    }

    /// Inspect the actuator
    #[must_use]
    pub const fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Unbind and return the actuator, freeing the claim
    pub(crate) fn into_actuator(self) -> A {
        self.actuator
    }
}
