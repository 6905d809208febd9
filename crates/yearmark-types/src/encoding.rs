//! Digit/letter pairs produced by encoding a year.

use serde::{Deserialize, Serialize};

/// One row of the digit/letter table: a year digit and its mnemonic letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitLetter {
    /// The decimal digit taken from the year.
    pub digit: char,
    /// The uppercase letter the digit maps to.
    pub letter: char,
}

/// The result of encoding a year: the year as text plus the ordered
/// digit/letter pairs for every digit after the leading one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedYear {
    /// The year exactly as it was encoded (canonical base-10 form).
    pub year: String,
    /// Ordered pairs, one per encoded digit.
    pub pairs: Vec<DigitLetter>,
}

impl EncodedYear {
    /// The mnemonic letters, in year order.
    pub fn letters(&self) -> Vec<char> {
        self.pairs.iter().map(|p| p.letter).collect()
    }

    /// The letters joined by single spaces, e.g. `"L L G"`.
    pub fn spaced(&self) -> String {
        let mut out = String::with_capacity(self.pairs.len().saturating_mul(2));
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(pair.letter);
        }
        out
    }

    /// The digit/letter table for display.
    pub fn pairs(&self) -> &[DigitLetter] {
        &self.pairs
    }

    /// Number of encoded letters.
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when the year had no digits after the leading one.
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
