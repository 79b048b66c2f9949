//! Channel Registry
//!
//! Hands out [`Channel`]s and makes sure no physical channel is driven by
//! more than one transmitter.
//!
//! Toggle lines and tone generators are separate namespaces: GPIO line 1 and
//! tone channel 1 are different physical channels. Every configured channel
//! holds a [`Claim`] on its `(kind, id)` pair, and the pair is freed when the
//! channel is released or dropped.

use core::cell::Cell;

use crate::config::ChannelConfig;
use crate::morse::channel::{Actuator, Channel};
use crate::types::{ChannelId, ChannelKind, ConfigError};

/// Tracks which physical channels have a transmitter bound
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    /// Bit n set when toggle line n is bound
    toggle: Cell<u32>,
    /// Bit n set when tone channel n is bound
    tone: Cell<u32>,
}

impl ChannelRegistry {
    /// Create an empty registry
    #[must_use]
    pub const fn new() -> Self {
        Self {
            toggle: Cell::new(0),
            tone: Cell::new(0),
        }
    }

    /// Bind a new transmitter to `actuator`
    ///
    /// # Errors
    ///
    /// Fails if the configured kind differs from the actuator's kind or the
    /// channel is already bound.
    pub fn configure<A: Actuator>(
        &self,
        config: ChannelConfig,
        actuator: A,
    ) -> Result<Channel<'_, A>, ConfigError> {
        if config.kind != A::KIND {
            return Err(ConfigError::KindMismatch {
                expected: A::KIND,
                found: config.kind,
            });
        }
        let claim = self.claim(config.kind, config.id)?;

        #[cfg(feature = "embedded")]
        defmt::info!("{} configured as {} at {}", config.id, config.kind, config.wpm);

        Ok(Channel::new(claim, config.wpm, actuator))
    }

    /// Validate raw values and bind a new transmitter to `actuator`
    ///
    /// # Errors
    ///
    /// Fails on an unknown or unsupported kind, an out-of-range id, a zero
    /// speed, or any error from [`ChannelRegistry::configure`].
    pub fn configure_raw<A: Actuator>(
        &self,
        kind: u8,
        id: u8,
        wpm: u8,
        actuator: A,
    ) -> Result<Channel<'_, A>, ConfigError> {
        let config = ChannelConfig::new(kind, id, wpm)?;
        self.configure(config, actuator)
    }

    /// Unbind a channel, returning its actuator
    ///
    /// Any message in flight is abandoned with the output keyed up.
    pub fn release<A: Actuator>(&self, mut channel: Channel<'_, A>) -> A {
        channel.stop();
        channel.into_actuator()
    }

    /// Check if a transmitter is bound to channel `id` of `kind`
    #[must_use]
    pub fn is_claimed(&self, kind: ChannelKind, id: ChannelId) -> bool {
        self.claims(kind).get() & Self::mask(id) != 0
    }

    /// Number of bound channels
    #[must_use]
    pub fn len(&self) -> u32 {
        self.toggle.get().count_ones() + self.tone.get().count_ones()
    }

    /// Check if no channel is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn claim(&self, kind: ChannelKind, id: ChannelId) -> Result<Claim<'_>, ConfigError> {
        if self.is_claimed(kind, id) {
            return Err(ConfigError::ChannelInUse(id));
        }
        let claims = self.claims(kind);
        claims.set(claims.get() | Self::mask(id));
        Ok(Claim {
            registry: self,
            kind,
            id,
        })
    }

    fn unclaim(&self, kind: ChannelKind, id: ChannelId) {
        let claims = self.claims(kind);
        claims.set(claims.get() & !Self::mask(id));

        #[cfg(feature = "embedded")]
        defmt::debug!("{} {} released", kind, id);
    }

    const fn claims(&self, kind: ChannelKind) -> &Cell<u32> {
        match kind {
            ChannelKind::Toggle => &self.toggle,
            ChannelKind::ContinuousWave => &self.tone,
        }
    }

    const fn mask(id: ChannelId) -> u32 {
        1 << id.raw()
    }
}

/// Exclusive hold on one physical channel, freed on drop
#[derive(Debug)]
pub struct Claim<'r> {
    registry: &'r ChannelRegistry,
    kind: ChannelKind,
    id: ChannelId,
}

impl Claim<'_> {
    /// Claimed channel id
    #[must_use]
    pub const fn id(&self) -> ChannelId {
        self.id
    }

    /// Claimed channel kind
    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.registry.unclaim(self.kind, self.id);
    }
}
