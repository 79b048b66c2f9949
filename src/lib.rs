//! Morse Code Transmitter Library
//!
//! Drives timed Morse code waveforms on one or more output channels from an
//! arbitrary text string, without ever blocking the caller. Built for the
//! STM32G474 firmware of the SDR transceiver, where keying has to share a
//! single execution context with other periodic work.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        Beacon loop  │  Station (key line + CW tone)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     MORSE CORE                               │
//! │  Channel adapters │ Transmitter state machine │ Registry     │
//! │  Code table       │ Unit timing                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │     Uptime clock  │  GPIO key line  │  PWM sidetone          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Caller owns the loop**: no timers or tasks inside the core; every
//!   `tick` is bounded and returns immediately
//! - **Type-driven design**: `Wpm`, `ChannelId` and `Pattern` can't hold
//!   invalid values
//! - **No unsafe in application code**: All unsafe isolated in HAL/FFI layers
//! - **Functional core, imperative shell**: Pure logic separated from I/O
//! - **Explicit error handling**: Configuration returns `Result`, the tick
//!   path is total

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Embassy-backed clock, key line and tone generator.
#[cfg(feature = "embedded")]
pub mod hal;

/// Morse Transmission
///
/// Code table, timing, transmitter state machine and channel adapters.
pub mod morse;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::morse::{
        ChannelRegistry, Clock, Keying, Station, SubmitOutcome, ToneGenerator,
    };
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::OutputPin;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
