//! Year-to-letter encoding.
//!
//! A year is rendered in base 10, its leading digit is dropped, and every
//! remaining digit is mapped through a fixed table. The leading digit is
//! dropped whatever the year's length: `476` encodes `76`, `10000` encodes
//! `0000`, and a one-digit year encodes to nothing.

use yearmark_types::{DigitLetter, EncodedYear};

use crate::error::EncodeError;

/// Letter for each digit, indexed by digit value.
///
/// Letters need not be distinct; this table happens to be a bijection.
pub const DIGIT_LETTERS: [char; 10] = ['O', 'A', 'T', 'E', 'F', 'S', 'G', 'L', 'B', 'P'];

/// The mnemonic letter for a decimal digit character.
///
/// Returns `None` for anything other than `'0'..='9'`.
pub fn letter_for(digit: char) -> Option<char> {
    let value = digit.to_digit(10)?;
    DIGIT_LETTERS.get(usize::try_from(value).ok()?).copied()
}

/// Encode a year.
///
/// Never fails: the canonical rendering of a `u32` contains only digits.
pub fn encode(year: u32) -> EncodedYear {
    let text = year.to_string();
    let pairs = text
        .chars()
        .skip(1)
        .filter_map(|digit| letter_for(digit).map(|letter| DigitLetter { digit, letter }))
        .collect();
    EncodedYear { year: text, pairs }
}

/// Encode a year supplied as free-form text.
///
/// Surrounding whitespace is ignored; the remaining text is encoded as
/// written, leading zeros included.
///
/// # Errors
///
/// [`EncodeError::Empty`] for blank input, [`EncodeError::NonDigit`] for any
/// character outside `0`-`9` (signs included).
pub fn encode_str(text: &str) -> Result<EncodedYear, EncodeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EncodeError::Empty);
    }

    let mut pairs = Vec::with_capacity(trimmed.len());
    for (position, digit) in trimmed.chars().enumerate() {
        let letter = letter_for(digit).ok_or(EncodeError::NonDigit {
            found: digit,
            position,
        })?;
        if position > 0 {
            pairs.push(DigitLetter { digit, letter });
        }
    }

    Ok(EncodedYear {
        year: trimmed.to_owned(),
        pairs,
    })
}

/// The full digit table as display rows, `0` through `9`.
pub fn table() -> Vec<DigitLetter> {
    ('0'..='9')
        .filter_map(|digit| letter_for(digit).map(|letter| DigitLetter { digit, letter }))
        .collect()
}
