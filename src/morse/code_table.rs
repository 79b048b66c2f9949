//! Morse Code Table
//!
//! Maps characters to a compact binary form of their International Morse
//! code. Each pattern is a single byte read from bit 0 upwards: a clear bit
//! is a dit, a set bit is a dah, and the highest set bit is a sentinel that
//! terminates the sequence.
//!
//! ```text
//! 'A'  .-    0b0000_0110   sentinel at bit 2, elements: 0 (dit), 1 (dah)
//! 'S'  ...   0b0000_1000   sentinel at bit 3, elements: 0, 0, 0
//! ' '        0b0000_0001   sentinel only: word space
//! ```

use core::fmt;

/// A single keyed element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    /// Short element (1 unit)
    Dit,
    /// Long element (3 units)
    Dah,
}

impl Element {
    /// Get duration in timing units
    #[must_use]
    pub const fn units(self) -> u8 {
        match self {
            Self::Dit => 1,
            Self::Dah => 3,
        }
    }

    /// Dot/dash symbol for this element
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Dit => '.',
            Self::Dah => '-',
        }
    }
}

/// Encoded Morse pattern of one character
///
/// Never zero: the sentinel bit is always present.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern(u8);

impl Pattern {
    /// Sentinel only: a 7-unit silent word space
    pub const WORD_SPACE: Self = Self(0b1);

    /// Sent in place of characters missing from the table (`......-`)
    pub const NOT_FOUND: Self = Self(0b1100_0000);

    /// Create from raw bits, returns None for zero (no sentinel)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits == 0 {
            None
        } else {
            Some(Self(bits))
        }
    }

    /// Get the raw bits including the sentinel
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if this pattern is the word space
    #[must_use]
    pub const fn is_word_space(self) -> bool {
        self.0 == Self::WORD_SPACE.0
    }

    /// Number of elements before the sentinel
    #[must_use]
    pub const fn len(self) -> u8 {
        7 - self.0.leading_zeros() as u8
    }

    /// Check if the pattern has no elements (only the word space)
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Check if an element exists at `index`
    #[must_use]
    pub const fn has_element(self, index: u8) -> bool {
        index < self.len()
    }

    /// Get the element at `index`
    #[must_use]
    pub const fn element(self, index: u8) -> Option<Element> {
        if !self.has_element(index) {
            None
        } else if (self.0 >> index) & 1 == 1 {
            Some(Element::Dah)
        } else {
            Some(Element::Dit)
        }
    }

    /// Iterate over the elements in sending order
    #[must_use]
    pub const fn elements(self) -> Elements {
        Elements {
            pattern: self,
            index: 0,
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:#010b} \"{}\")", self.0, self)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_word_space() {
            return f.write_str(" ");
        }
        for element in self.elements() {
            write!(f, "{}", element.symbol())?;
        }
        Ok(())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Pattern {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8:#b}", self.0);
    }
}

/// Iterator over the elements of a [`Pattern`]
#[derive(Clone, Debug)]
pub struct Elements {
    pattern: Pattern,
    index: u8,
}

impl Iterator for Elements {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        let element = self.pattern.element(self.index)?;
        self.index += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.pattern.len().saturating_sub(self.index));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Elements {}

/// Marker consumed without delay or output
pub const NOOP_MARKER: char = '~';

/// Toggles run-together (prosign) sending
pub const DIGRAPH_TOGGLE: char = '`';

/// Every character with its own table entry
pub const SUPPORTED: &[char] = &[
    ' ', '!', '"', '$', '&', '\'', '(', ')', '+', ',', '-', '.', '/', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9', ':', ';', '=', '?', '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H',
    'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    '_',
];

/// Encode a character
///
/// Lower-case ASCII letters share the upper-case entry. Anything without an
/// entry, including the control markers, yields [`Pattern::NOT_FOUND`].
#[must_use]
pub const fn encode(c: char) -> Pattern {
    Pattern(match c.to_ascii_uppercase() {
        ' ' => 0b1,
        '!' => 0b111_0101,
        '"' => 0b101_0010,
        '$' => 0b1100_1000,
        '&' => 0b10_0010,
        '\'' => 0b101_1110,
        '(' => 0b10_1101,
        ')' => 0b110_1101,
        '+' => 0b10_1010,
        ',' => 0b111_0011,
        '-' => 0b110_0001,
        '.' => 0b110_1010,
        '/' => 0b10_1001,

        '0' => 0b11_1111,
        '1' => 0b11_1110,
        '2' => 0b11_1100,
        '3' => 0b11_1000,
        '4' => 0b11_0000,
        '5' => 0b10_0000,
        '6' => 0b10_0001,
        '7' => 0b10_0011,
        '8' => 0b10_0111,
        '9' => 0b10_1111,

        ':' => 0b100_0111,
        ';' => 0b101_0101,
        '=' => 0b11_0001,
        '?' => 0b100_1100,
        '@' => 0b101_0110,

        'A' => 0b110,
        'B' => 0b1_0001,
        'C' => 0b1_0101,
        'D' => 0b1001,
        'E' => 0b10,
        'F' => 0b1_0100,
        'G' => 0b1011,
        'H' => 0b1_0000,
        'I' => 0b100,
        'J' => 0b1_1110,
        'K' => 0b1101,
        'L' => 0b1_0010,
        'M' => 0b111,
        'N' => 0b101,
        'O' => 0b1111,
        'P' => 0b1_0110,
        'Q' => 0b1_1011,
        'R' => 0b1010,
        'S' => 0b1000,
        'T' => 0b11,
        'U' => 0b1100,
        'V' => 0b1_1000,
        'W' => 0b1110,
        'X' => 0b1_1001,
        'Y' => 0b1_1101,
        'Z' => 0b1_0011,

        '_' => 0b110_1100,

        _ => Pattern::NOT_FOUND.0,
    })
}
