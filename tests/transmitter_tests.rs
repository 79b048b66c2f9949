//! Transmitter State Machine Tests
//!
//! Drives the transmitter with a simulated millisecond clock and checks the
//! keyed waveform: element order, durations, gaps, and termination.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test transmitter_tests

use morse_tx::morse::code_table::{encode, SUPPORTED};
use morse_tx::morse::transmitter::{Keying, Phase, SubmitOutcome, Transmitter};
use morse_tx::types::{Level, Millis, Wpm};

/// Records every key request with the clock reading of the tick issuing it
#[derive(Default)]
struct Trace {
    now: Millis,
    events: Vec<(Millis, Level)>,
}

impl Keying for Trace {
    fn key(&mut self, level: Level) {
        self.events.push((self.now, level));
    }
}

impl Trace {
    /// Durations of (key down, key up after it) pairs
    fn tones(&self) -> Vec<Millis> {
        self.events
            .chunks(2)
            .filter_map(|pair| match pair {
                [(on, Level::On), (off, Level::Off)] => Some(off - on),
                _ => None,
            })
            .collect()
    }

    /// Silences between a key up and the next key down
    fn gaps(&self) -> Vec<Millis> {
        self.events
            .windows(2)
            .filter_map(|pair| match pair {
                [(off, Level::Off), (on, Level::On)] => Some(on - off),
                _ => None,
            })
            .collect()
    }

    /// Tones rendered as dots and dashes
    fn symbols(&self, unit: Millis) -> String {
        self.tones()
            .into_iter()
            .map(|d| if d >= 2 * unit { '-' } else { '.' })
            .collect()
    }
}

const WPM: u8 = 15;
const UNIT: Millis = 80;

fn transmitter() -> Transmitter {
    Transmitter::new(Wpm::new(WPM).unwrap())
}

/// Submit at t=0 and tick every `step` ms until idle; returns the idle time
fn run(tx: &mut Transmitter, trace: &mut Trace, text: &str, step: Millis) -> Millis {
    assert_eq!(tx.submit(text, 0), SubmitOutcome::Started);
    let mut now = 0;
    while tx.is_sending() {
        trace.now = now;
        tx.tick(now, trace);
        if !tx.is_sending() {
            break;
        }
        now += step;
        assert!(now < 1_000_000, "transmission did not terminate");
    }
    now
}

// =============================================================================
// Encoding Round Trip Tests
// =============================================================================

#[test]
fn every_character_round_trips() {
    for &c in SUPPORTED.iter().filter(|&&c| c != ' ') {
        let mut tx = transmitter();
        let mut trace = Trace::default();
        run(&mut tx, &mut trace, &c.to_string(), 1);
        assert_eq!(trace.symbols(UNIT), encode(c).to_string(), "character {c:?}");
    }
}

#[test]
fn sos_round_trips() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    run(&mut tx, &mut trace, "sos", 1);
    assert_eq!(trace.symbols(UNIT), "...---...");
}

#[test]
fn unsupported_character_sends_not_found_pattern() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    run(&mut tx, &mut trace, "#", 1);
    assert_eq!(trace.symbols(UNIT), "......-");
}

// =============================================================================
// Timing Scenario Tests
// =============================================================================

#[test]
fn letter_e_keys_one_dit_then_trailing_gap() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    let idle_at = run(&mut tx, &mut trace, "E", 1);

    assert_eq!(trace.events, [(0, Level::On), (UNIT, Level::Off)]);
    // Trailing inter-character gap before going idle
    assert_eq!(idle_at, UNIT + 3 * UNIT);
}

#[test]
fn exact_deadline_completes_phase() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    tx.submit("E", 0);
    tx.tick(0, &mut trace);
    assert_eq!(tx.phase_deadline(), Some(UNIT));

    tx.tick(UNIT - 1, &mut trace);
    assert_eq!(tx.phase(), Phase::ElementOn);

    tx.tick(UNIT, &mut trace);
    assert_eq!(tx.phase(), Phase::GapActive);
    assert_eq!(tx.phase_deadline(), Some(4 * UNIT));
}

#[test]
fn element_and_character_gaps() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    run(&mut tx, &mut trace, "AN", 1);

    // A: .-  N: -.
    assert_eq!(trace.tones(), [UNIT, 3 * UNIT, 3 * UNIT, UNIT]);
    assert_eq!(trace.gaps(), [UNIT, 3 * UNIT, UNIT]);
}

#[test]
fn space_holds_word_space_with_output_off() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    tx.submit(" ", 0);

    tx.tick(0, &mut trace);
    assert_eq!(tx.phase(), Phase::ElementOn);
    assert_eq!(tx.phase_deadline(), Some(7 * UNIT));

    tx.tick(7 * UNIT - 1, &mut trace);
    assert_eq!(tx.phase(), Phase::ElementOn);

    tx.tick(7 * UNIT, &mut trace);
    assert_eq!(tx.phase(), Phase::GapActive);

    tx.tick(10 * UNIT, &mut trace);
    assert!(!tx.is_sending());
    assert!(trace.events.is_empty());
}

#[test]
fn word_space_between_words() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    run(&mut tx, &mut trace, "E E", 1);

    // char gap after E, word space hold, char gap after the space
    assert_eq!(trace.gaps(), [3 * UNIT + 7 * UNIT + 3 * UNIT]);
}

#[test]
fn coarse_ticks_stretch_but_keep_order() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    run(&mut tx, &mut trace, "PARIS", 50);

    assert_eq!(trace.symbols(UNIT), ".--..-.-......");
    assert!(trace.tones().iter().all(|&d| d % 50 == 0));
}

// =============================================================================
// Control Character Tests
// =============================================================================

#[test]
fn noop_marker_alone_completes_in_first_tick() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    tx.submit("~", 0);
    assert!(tx.is_sending());

    tx.tick(0, &mut trace);
    assert!(!tx.is_sending());
    assert!(trace.events.is_empty());
}

#[test]
fn control_only_message_completes_in_first_tick() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    tx.submit("~`~`~", 0);
    tx.tick(0, &mut trace);
    assert!(!tx.is_sending());
    assert!(!tx.is_digraph());
    assert!(trace.events.is_empty());
}

#[test]
fn noop_marker_adds_no_delay() {
    let mut plain = Trace::default();
    let mut marked = Trace::default();
    let plain_idle = run(&mut transmitter(), &mut plain, "ET", 1);
    let marked_idle = run(&mut transmitter(), &mut marked, "E~~T", 1);

    assert_eq!(plain.events, marked.events);
    assert_eq!(plain_idle, marked_idle);
}

#[test]
fn digraph_runs_characters_together() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    run(&mut tx, &mut trace, "`AR`", 1);

    assert_eq!(trace.symbols(UNIT), ".-.-.");
    assert!(trace.gaps().iter().all(|&g| g == UNIT));
    assert!(!tx.is_digraph());
}

#[test]
fn digraph_closes_after_second_toggle() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    run(&mut tx, &mut trace, "`AR`EE", 1);

    // A-R run together, R-E still element gap (toggle applies at next load),
    // E-E normal character gap
    let gaps = trace.gaps();
    assert_eq!(gaps.len(), 6);
    assert!(gaps[..5].iter().all(|&g| g == UNIT));
    assert_eq!(gaps[5], 3 * UNIT);
}

#[test]
fn digraph_state_visible_while_sending() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    tx.submit("`A`E", 0);
    tx.tick(0, &mut trace);
    assert!(tx.is_digraph());
}

#[test]
fn digraph_never_changes_element_length() {
    let mut plain = Trace::default();
    let mut joined = Trace::default();
    run(&mut transmitter(), &mut plain, "KN", 1);
    run(&mut transmitter(), &mut joined, "`KN`", 1);
    assert_eq!(plain.tones(), joined.tones());
}

// =============================================================================
// Submit / Stop Tests
// =============================================================================

#[test]
fn submit_while_sending_changes_nothing() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    tx.submit("SOS", 0);
    tx.tick(0, &mut trace);
    tx.tick(UNIT, &mut trace);

    let phase = tx.phase();
    let index = tx.char_index();
    let bit = tx.bit_index();
    let deadline = tx.phase_deadline();

    assert_eq!(tx.submit("TEST", UNIT + 10), SubmitOutcome::Busy);
    assert_eq!(tx.message(), "SOS");
    assert_eq!(tx.phase(), phase);
    assert_eq!(tx.char_index(), index);
    assert_eq!(tx.bit_index(), bit);
    assert_eq!(tx.phase_deadline(), deadline);
}

#[test]
fn stop_returns_to_idle() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    tx.submit("`AR`", 0);
    tx.tick(0, &mut trace);
    assert!(tx.is_digraph());

    tx.stop();
    assert!(!tx.is_sending());
    assert_eq!(tx.phase(), Phase::Idle);
    assert_eq!(tx.char_index(), 0);
    assert_eq!(tx.bit_index(), 0);
    assert!(!tx.is_digraph());
    // No key-up is issued by the transmitter itself
    assert_eq!(trace.events, [(0, Level::On)]);
}

#[test]
fn resubmit_after_completion() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    run(&mut tx, &mut trace, "T", 1);
    assert_eq!(tx.submit("E", 1000), SubmitOutcome::Started);
    assert_eq!(tx.message(), "E");
}

#[test]
fn ticking_idle_transmitter_does_nothing() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    for now in 0..100 {
        tx.tick(now, &mut trace);
    }
    assert!(trace.events.is_empty());
    assert_eq!(tx.phase(), Phase::Idle);
}

// =============================================================================
// Speed Change and Clock Tests
// =============================================================================

#[test]
fn speed_change_applies_at_next_boundary() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    tx.submit("T", 0);
    tx.tick(0, &mut trace);
    assert_eq!(tx.phase_deadline(), Some(3 * UNIT));

    tx.set_wpm(Wpm::new(30).unwrap());
    assert_eq!(tx.phase_deadline(), Some(3 * UNIT));

    tx.tick(3 * UNIT, &mut trace);
    // Char gap at 30 WPM: 3 × 40 ms
    assert_eq!(tx.phase_deadline(), Some(3 * UNIT + 120));
}

#[test]
fn clock_going_backwards_is_clamped() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    tx.submit("E", 1000);
    tx.tick(1000, &mut trace);
    tx.tick(10, &mut trace);
    assert_eq!(tx.phase(), Phase::ElementOn);

    tx.tick(1000 + UNIT, &mut trace);
    assert_eq!(tx.phase(), Phase::GapActive);
}

#[test]
fn arbitrary_text_terminates() {
    let texts = [
        "CQ CQ DE N0CALL",
        "hello, world!",
        "~`~",
        "ÄÖÜ naïve café",
        "  ",
        "$&'()+,-./:;=?@_\"",
        "",
    ];
    for text in texts {
        let mut tx = transmitter();
        let mut trace = Trace::default();
        run(&mut tx, &mut trace, text, 7);
        assert!(!tx.is_sending(), "{text:?}");
    }
}

#[test]
fn at_most_one_key_request_per_tick() {
    let mut tx = transmitter();
    let mut trace = Trace::default();
    run(&mut tx, &mut trace, "`SOS` 73", 1);
    let times: Vec<Millis> = trace.events.iter().map(|&(t, _)| t).collect();
    let mut deduped = times.clone();
    deduped.dedup();
    assert_eq!(times, deduped);
}
