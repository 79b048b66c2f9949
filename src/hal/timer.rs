//! Timer Abstractions
//!
//! Millisecond clock for the transmitters and the fixed-rate ticker that
//! paces the polling loop.

use embassy_time::{Duration, Instant, Ticker};

use crate::morse::Clock;
use crate::types::Millis;

/// Clock reading milliseconds since boot
#[derive(Clone, Copy, Debug, Default)]
pub struct UptimeClock;

impl UptimeClock {
    /// Create the uptime clock
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for UptimeClock {
    fn now_millis(&self) -> Millis {
        Instant::now().as_millis()
    }
}

impl defmt::Format for UptimeClock {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Uptime({}ms)", self.now_millis());
    }
}

/// Fixed-rate pacing for the transmitter polling loop
pub struct PollTicker {
    ticker: Ticker,
    period_ms: u64,
}

impl PollTicker {
    /// Create a ticker firing every `period_ms` milliseconds
    #[must_use]
    pub fn from_ms(period_ms: u64) -> Self {
        Self {
            ticker: Ticker::every(Duration::from_millis(period_ms)),
            period_ms,
        }
    }

    /// Wait for the next poll slot
    pub async fn next(&mut self) {
        self.ticker.next().await;
    }

    /// Get the poll period in milliseconds
    #[must_use]
    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Restart the schedule from now
    pub fn reset(&mut self) {
        self.ticker.reset();
    }
}

impl defmt::Format for PollTicker {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PollTicker({}ms)", self.period_ms);
    }
}
