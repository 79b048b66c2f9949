//! Dual-Channel Station
//!
//! Runs a keying-line channel and a continuous-wave channel side by side
//! from one polling loop. The channels keep independent speeds, messages
//! and state; they share only the read-only code table.

use embedded_hal::digital::OutputPin;

use crate::config::ChannelConfig;
use crate::morse::channel::{Clock, CwChannel, ToggleChannel, ToggleLine, ToneGenerator, ToneKey};
use crate::morse::registry::ChannelRegistry;
use crate::morse::transmitter::SubmitOutcome;
use crate::types::{ConfigError, Millis};

/// Keying line plus tone generator, ticked together
#[derive(Debug)]
pub struct Station<'r, P, T> {
    key: ToggleChannel<'r, P>,
    cw: CwChannel<'r, T>,
}

impl<'r, P: OutputPin, T: ToneGenerator> Station<'r, P, T> {
    /// Configure both channels
    ///
    /// # Errors
    ///
    /// Fails if either channel cannot be configured; no channel stays bound
    /// in that case.
    pub fn configure(
        registry: &'r ChannelRegistry,
        key_config: ChannelConfig,
        pin: P,
        cw_config: ChannelConfig,
        generator: T,
    ) -> Result<Self, ConfigError> {
        let key = registry.configure(key_config, ToggleLine::new(pin))?;
        match registry.configure(cw_config, ToneKey::new(generator)) {
            Ok(cw) => Ok(Self { key, cw }),
            Err(err) => {
                registry.release(key);
                Err(err)
            }
        }
    }

    /// Combine two already configured channels
    #[must_use]
    pub const fn new(key: ToggleChannel<'r, P>, cw: CwChannel<'r, T>) -> Self {
        Self { key, cw }
    }

    /// Submit the same text to both channels
    pub fn submit_both(&mut self, text: &str, now: Millis) -> (SubmitOutcome, SubmitOutcome) {
        (self.key.submit(text, now), self.cw.submit(text, now))
    }

    /// Advance both channels to `now`
    pub fn tick(&mut self, now: Millis) {
        self.key.tick(now);
        self.cw.tick(now);
    }

    /// Advance both channels to the clock's current reading
    pub fn poll<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.tick(clock.now_millis());
    }

    /// Check if neither channel is sending
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.key.is_sending() && !self.cw.is_sending()
    }

    /// Stop both channels and key up
    pub fn stop_all(&mut self) {
        self.key.stop();
        self.cw.stop();
    }

    /// Keying-line channel
    #[must_use]
    pub const fn key(&self) -> &ToggleChannel<'r, P> {
        &self.key
    }

    /// Keying-line channel, mutable
    pub fn key_mut(&mut self) -> &mut ToggleChannel<'r, P> {
        &mut self.key
    }

    /// Continuous-wave channel
    #[must_use]
    pub const fn cw(&self) -> &CwChannel<'r, T> {
        &self.cw
    }

    /// Continuous-wave channel, mutable
    pub fn cw_mut(&mut self) -> &mut CwChannel<'r, T> {
        &mut self.cw
    }

    /// Split back into the two channels
    pub fn into_channels(self) -> (ToggleChannel<'r, P>, CwChannel<'r, T>) {
        (self.key, self.cw)
    }
}
