//! Morse Transmission
//!
//! Character encoding, unit timing, the non-blocking transmitter state
//! machine, and the channel adapters that bind it to hardware.
//!
//! ```text
//!  text ──► Channel::submit ──► Transmitter ◄── Channel::tick(now)
//!                                   │
//!                     code_table ◄──┤──► timing
//!                                   ▼
//!                      Keying ──► ToggleLine (GPIO)
//!                             └─► ToneKey (tone generator)
//! ```

pub mod code_table;
pub mod timing;
pub mod transmitter;
pub mod channel;
pub mod registry;
pub mod station;

pub use channel::{
    Actuator, Channel, Clock, CwChannel, ToggleChannel, ToggleLine, ToneGenerator, ToneKey,
};
pub use code_table::{encode, Element, Pattern};
pub use registry::{ChannelRegistry, Claim};
pub use station::Station;
pub use timing::{Interval, UnitTiming};
pub use transmitter::{Keying, Phase, SubmitOutcome, Transmitter};
