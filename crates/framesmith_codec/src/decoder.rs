//! Hex literal decoder.

use crate::error::{CodecError, CodecResult};

/// Result of leniently decoding a hex literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedLiteral {
    /// The packed bytes.
    pub bytes: Vec<u8>,
    /// Number of characters stripped that were neither hex digits nor whitespace.
    pub stripped: usize,
    /// Trailing nibble dropped because the digit count was odd.
    pub dropped_nibble: Option<char>,
}

impl DecodedLiteral {
    /// Returns true if decoding discarded anything the user typed.
    pub fn is_lossy(&self) -> bool {
        self.stripped > 0 || self.dropped_nibble.is_some()
    }
}

/// Decode a hex literal into bytes.
///
/// Every character outside `[0-9A-Fa-f]` is removed, then consecutive
/// digit pairs are packed high nibble first. A trailing odd nibble is
/// dropped. This never fails.
pub fn hex_string_to_bytes(text: &str) -> Vec<u8> {
    decode_hex_literal(text).bytes
}

/// Decode a hex literal, reporting what was discarded along the way.
pub fn decode_hex_literal(text: &str) -> DecodedLiteral {
    let mut decoded = DecodedLiteral {
        bytes: Vec::with_capacity(text.len() / 2),
        ..DecodedLiteral::default()
    };
    let mut high: Option<(char, u8)> = None;

    for c in text.chars() {
        let Some(nibble) = nibble_value(c) else {
            if !c.is_whitespace() {
                decoded.stripped += 1;
            }
            continue;
        };
        match high.take() {
            Some((_, h)) => decoded.bytes.push((h << 4) | nibble),
            None => high = Some((c, nibble)),
        }
    }

    decoded.dropped_nibble = high.map(|(c, _)| c);
    decoded
}

/// Strictly parse a compact or whitespace-separated hex string.
///
/// Whitespace is allowed between digits; anything else that is not a
/// hex digit is an error, as is an odd digit count.
///
/// # Errors
///
/// Returns [`CodecError::InvalidCharacter`] or [`CodecError::OddLength`].
pub fn parse_hex_exact(text: &str) -> CodecResult<Vec<u8>> {
    let mut digits = Vec::with_capacity(text.len());
    for (position, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        let nibble = nibble_value(c).ok_or(CodecError::invalid_character(c, position))?;
        digits.push(nibble);
    }

    if digits.len() % 2 != 0 {
        return Err(CodecError::OddLength {
            digits: digits.len(),
        });
    }

    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn nibble_value(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| d as u8)
}
