//! Morse Transmission State Machine
//!
//! Turns a message into a timed sequence of key-down and key-up requests
//! without blocking. The caller owns the scheduling loop and calls
//! [`Transmitter::tick`] with the current clock reading; each call does a
//! bounded amount of work and issues at most one [`Keying::key`] request.
//!
//! # Phases
//!
//! ```text
//!            submit
//!   Idle ───────────► AwaitingCharacter ──(end of message)──► Idle
//!                        │        ▲
//!             load char  │        │ character done
//!                        ▼        │
//!   ┌──────────────► ElementOn    │
//!   │                    │ deadline reached
//!   │                    ▼        │
//!   │            ElementGapPending│
//!   │                    │ key up, schedule gap
//!   │                    ▼        │
//!   └─ next element ─ GapActive ──┘
//! ```
//!
//! Every phase duration is measured from the tick that started it, so a
//! late tick stretches the current phase but never reorders elements.
//! A message always ends with the gap after its last character.

use heapless::String;

use crate::config::MAX_MESSAGE_LEN;
use crate::morse::code_table::{self, Pattern, DIGRAPH_TOGGLE, NOOP_MARKER};
use crate::morse::timing::{Interval, UnitTiming};
use crate::types::{Level, Millis, Wpm};

/// Receiver of key-down / key-up requests
pub trait Keying {
    /// Drive the output to `level`
    fn key(&mut self, level: Level);
}

impl<K: Keying + ?Sized> Keying for &mut K {
    fn key(&mut self, level: Level) {
        (**self).key(level);
    }
}

/// Transmitter phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not sending
    #[default]
    Idle,
    /// Ready to load the character at the current index
    AwaitingCharacter,
    /// Element tone (or word-space hold) in progress
    ElementOn,
    /// Element finished, gap not yet scheduled
    ElementGapPending,
    /// Inter-element or inter-character gap in progress
    GapActive,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Phase {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "IDLE"),
            Self::AwaitingCharacter => defmt::write!(f, "AWAIT_CHAR"),
            Self::ElementOn => defmt::write!(f, "ELEMENT_ON"),
            Self::ElementGapPending => defmt::write!(f, "GAP_PENDING"),
            Self::GapActive => defmt::write!(f, "GAP_ACTIVE"),
        }
    }
}

/// Result of a submit request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Message accepted, transmission started
    Started,
    /// A message was already in flight; the new one was dropped
    Busy,
}

impl SubmitOutcome {
    /// Check if the message was accepted
    #[must_use]
    pub const fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }
}

/// Non-blocking Morse transmitter for one channel
#[derive(Clone, Debug)]
pub struct Transmitter {
    /// Upper-cased message being sent
    message: String<MAX_MESSAGE_LEN>,
    /// Byte offset of the current character in `message`
    char_index: usize,
    /// Encoded current character
    pattern: Pattern,
    /// Element of `pattern` being sent
    bit_index: u8,
    /// Run characters together with element spacing
    digraph: bool,
    /// Current phase
    phase: Phase,
    /// Clock reading when the current phase started
    phase_start: Millis,
    /// Length of the current phase
    phase_duration: Millis,
    /// Durations for the configured speed
    timing: UnitTiming,
}

impl Transmitter {
    /// Create an idle transmitter
    #[must_use]
    pub fn new(wpm: Wpm) -> Self {
        Self {
            message: String::new(),
            char_index: 0,
            pattern: Pattern::NOT_FOUND,
            bit_index: 0,
            digraph: false,
            phase: Phase::Idle,
            phase_start: 0,
            phase_duration: 0,
            timing: UnitTiming::from_wpm(wpm),
        }
    }

    /// Start sending `text`
    ///
    /// Ignored while another message is in flight. Text beyond
    /// [`MAX_MESSAGE_LEN`] bytes is dropped at a character boundary.
    pub fn submit(&mut self, text: &str, now: Millis) -> SubmitOutcome {
        if self.is_sending() {
            return SubmitOutcome::Busy;
        }

        self.message.clear();
        for c in text.chars() {
            if self.message.push(c.to_ascii_uppercase()).is_err() {
                break;
            }
        }

        self.char_index = 0;
        self.bit_index = 0;
        self.digraph = false;
        self.enter(Phase::AwaitingCharacter, now, 0);
        SubmitOutcome::Started
    }

    /// Advance the state machine to `now`
    ///
    /// Returns immediately when idle. Never blocks.
    pub fn tick<K: Keying + ?Sized>(&mut self, now: Millis, out: &mut K) {
        loop {
            match self.phase {
                Phase::Idle => return,

                Phase::AwaitingCharacter => {
                    if self.load_character() {
                        self.start_element(now, out);
                    } else {
                        self.finish();
                    }
                    return;
                }

                Phase::ElementOn => {
                    if !self.phase_elapsed(now) {
                        return;
                    }
                    self.phase = Phase::ElementGapPending;
                }

                Phase::ElementGapPending => {
                    self.start_gap(now, out);
                    return;
                }

                Phase::GapActive => {
                    if !self.phase_elapsed(now) {
                        return;
                    }
                    if self.pattern.has_element(self.bit_index) {
                        self.start_element(now, out);
                        return;
                    }
                    self.bit_index = 0;
                    self.advance_char();
                    self.phase = Phase::AwaitingCharacter;
                }
            }
        }
    }

    /// Abandon the current message and return to idle
    ///
    /// The output is left at whatever level it had.
    pub fn stop(&mut self) {
        self.finish();
    }

    /// Change speed, effective from the next phase
    pub fn set_wpm(&mut self, wpm: Wpm) {
        self.timing = UnitTiming::from_wpm(wpm);
    }

    /// Check if a message is in flight
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Get current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Get the current (or last) message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the character being sent
    #[must_use]
    pub const fn char_index(&self) -> usize {
        self.char_index
    }

    /// Index of the element being sent within the current character
    #[must_use]
    pub const fn bit_index(&self) -> u8 {
        self.bit_index
    }

    /// Check if run-together sending is active
    #[must_use]
    pub const fn is_digraph(&self) -> bool {
        self.digraph
    }

    /// Pattern of the character being sent
    #[must_use]
    pub const fn pattern(&self) -> Option<Pattern> {
        match self.phase {
            Phase::ElementOn | Phase::ElementGapPending | Phase::GapActive => Some(self.pattern),
            Phase::Idle | Phase::AwaitingCharacter => None,
        }
    }

    /// Clock reading at which the current timed phase ends
    #[must_use]
    pub const fn phase_deadline(&self) -> Option<Millis> {
        match self.phase {
            Phase::ElementOn | Phase::GapActive => {
                Some(self.phase_start.saturating_add(self.phase_duration))
            }
            Phase::Idle | Phase::AwaitingCharacter | Phase::ElementGapPending => None,
        }
    }

    /// Current timing
    #[must_use]
    pub const fn timing(&self) -> &UnitTiming {
        &self.timing
    }

    /// Current speed
    #[must_use]
    pub const fn wpm(&self) -> Wpm {
        self.timing.wpm()
    }

    /// Consume control markers and load the next keyed character
    ///
    /// Returns false when the message is exhausted.
    fn load_character(&mut self) -> bool {
        while let Some(c) = self.current_char() {
            match c {
                NOOP_MARKER => self.advance_char(),
                DIGRAPH_TOGGLE => {
                    self.digraph = !self.digraph;
                    self.advance_char();
                }
                _ => {
                    self.pattern = code_table::encode(c);
                    self.bit_index = 0;
                    return true;
                }
            }
        }
        false
    }

    /// Key the current element, or hold silence for a word space
    fn start_element<K: Keying + ?Sized>(&mut self, now: Millis, out: &mut K) {
        let interval = self.element_interval();
        if interval.is_tone() {
            out.key(Level::On);
        }
        self.enter(Phase::ElementOn, now, self.timing.duration_ms(interval));
    }

    /// Release the key and schedule the following gap
    fn start_gap<K: Keying + ?Sized>(&mut self, now: Millis, out: &mut K) {
        if self.element_interval().is_tone() {
            out.key(Level::Off);
        }
        self.bit_index += 1;

        let gap = if self.pattern.has_element(self.bit_index) || self.digraph {
            Interval::ElementGap
        } else {
            Interval::CharGap
        };
        self.enter(Phase::GapActive, now, self.timing.duration_ms(gap));
    }

    fn element_interval(&self) -> Interval {
        if self.pattern.is_word_space() {
            Interval::WordSpace
        } else {
            self.pattern
                .element(self.bit_index)
                .map_or(Interval::Dit, Interval::from)
        }
    }

    fn enter(&mut self, phase: Phase, now: Millis, duration: Millis) {
        self.phase = phase;
        self.phase_start = now;
        self.phase_duration = duration;
    }

    /// A clock that steps backwards counts as no time elapsed
    fn phase_elapsed(&self, now: Millis) -> bool {
        now.saturating_sub(self.phase_start) >= self.phase_duration
    }

    fn current_char(&self) -> Option<char> {
        self.message
            .get(self.char_index..)
            .and_then(|rest| rest.chars().next())
    }

    fn advance_char(&mut self) {
        if let Some(c) = self.current_char() {
            self.char_index += c.len_utf8();
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Idle;
        self.char_index = 0;
        self.bit_index = 0;
        self.digraph = false;
        self.phase_duration = 0;
    }
}

impl Default for Transmitter {
    fn default() -> Self {
        Self::new(crate::config::default_wpm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        levels: std::vec::Vec<Level>,
    }

    impl Keying for Recorder {
        fn key(&mut self, level: Level) {
            self.levels.push(level);
        }
    }

    fn transmitter() -> Transmitter {
        Transmitter::new(Wpm::new(15).unwrap())
    }

    #[test]
    fn new_is_idle() {
        let tx = transmitter();
        assert!(!tx.is_sending());
        assert_eq!(tx.phase(), Phase::Idle);
        assert_eq!(tx.pattern(), None);
    }

    #[test]
    fn submit_upper_cases_message() {
        let mut tx = transmitter();
        assert_eq!(tx.submit("cq de", 0), SubmitOutcome::Started);
        assert_eq!(tx.message(), "CQ DE");
        assert_eq!(tx.phase(), Phase::AwaitingCharacter);
    }

    #[test]
    fn busy_submit_is_ignored() {
        let mut tx = transmitter();
        tx.submit("SOS", 0);
        assert_eq!(tx.submit("TEST", 5), SubmitOutcome::Busy);
        assert_eq!(tx.message(), "SOS");
    }

    #[test]
    fn letter_e_sequence() {
        let mut tx = transmitter();
        let mut out = Recorder::default();
        tx.submit("E", 0);

        tx.tick(0, &mut out);
        assert_eq!(out.levels, [Level::On]);
        assert_eq!(tx.phase_deadline(), Some(80));

        tx.tick(79, &mut out);
        assert_eq!(out.levels, [Level::On]);

        tx.tick(80, &mut out);
        assert_eq!(out.levels, [Level::On, Level::Off]);
        assert_eq!(tx.phase(), Phase::GapActive);
        assert_eq!(tx.phase_deadline(), Some(320));

        tx.tick(320, &mut out);
        assert!(!tx.is_sending());
    }

    #[test]
    fn word_space_keys_nothing() {
        let mut tx = transmitter();
        let mut out = Recorder::default();
        tx.submit("T T", 0);
        for now in 0..2_000 {
            tx.tick(now, &mut out);
        }
        assert!(!tx.is_sending());
        assert_eq!(out.levels, [Level::On, Level::Off, Level::On, Level::Off]);
    }

    #[test]
    fn clock_stepping_back_waits() {
        let mut tx = transmitter();
        let mut out = Recorder::default();
        tx.submit("T", 100);
        tx.tick(100, &mut out);
        tx.tick(50, &mut out);
        assert_eq!(tx.phase(), Phase::ElementOn);
        assert_eq!(out.levels, [Level::On]);
    }

    #[test]
    fn oversized_message_is_truncated() {
        let mut tx = transmitter();
        let long: std::string::String = core::iter::repeat('e').take(MAX_MESSAGE_LEN + 10).collect();
        tx.submit(&long, 0);
        assert_eq!(tx.message().len(), MAX_MESSAGE_LEN);
    }
}
