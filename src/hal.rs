//! Hardware Abstraction Layer
//!
//! Provides embassy-backed implementations of the capabilities the Morse
//! core consumes: a millisecond clock, a keying line, and a tone generator.

pub mod gpio;
pub mod pwm;
pub mod timer;
