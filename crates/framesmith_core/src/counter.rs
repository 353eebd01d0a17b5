//! Persistent state of auto-increment tokens.
//!
//! Compiling never mutates token configuration. The live value of every
//! counter is kept here instead; the compiler takes a store, advances the
//! counters it touches and hands back the updated store for the caller to
//! persist. Concurrent sends sharing one store must be serialized by the
//! caller.

use crate::error::FrameResult;
use crate::segment::TokenId;
use crate::token::{AutoIncrementConfig, TokenKind, TokenTable};
use framesmith_codec::{bytes_to_hex, parse_hex_exact, CodecError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default limit on the width of an auto-increment counter, in bytes.
pub const MAX_COUNTER_WIDTH: usize = 32;

/// A counter value: big-endian bytes, serialized as compact hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CounterValue(Vec<u8>);

impl CounterValue {
    /// Wraps big-endian bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the big-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<String> for CounterValue {
    type Error = CodecError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        parse_hex_exact(&text).map(Self)
    }
}

impl From<CounterValue> for String {
    fn from(value: CounterValue) -> Self {
        bytes_to_hex(&value.0)
    }
}

/// Live counter values keyed by token id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterStore {
    values: BTreeMap<TokenId, CounterValue>,
}

impl CounterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value of a counter.
    pub fn get(&self, id: &TokenId) -> Option<&[u8]> {
        self.values.get(id).map(CounterValue::as_bytes)
    }

    /// Stores a counter value.
    pub fn set(&mut self, id: TokenId, bytes: Vec<u8>) {
        self.values.insert(id, CounterValue::new(bytes));
    }

    /// Stores a counter value given as hex text.
    ///
    /// # Errors
    ///
    /// Returns a codec error if `hex` is not well-formed.
    pub fn set_hex(&mut self, id: TokenId, hex: &str) -> FrameResult<()> {
        let bytes = parse_hex_exact(hex)?;
        self.set(id, bytes);
        Ok(())
    }

    /// Drops the stored value so the token's configured seed applies again.
    pub fn forget(&mut self, id: &TokenId) -> Option<Vec<u8>> {
        self.values.remove(id).map(|v| v.0)
    }

    /// Resets a counter to its configured default value.
    ///
    /// A counter wider than [`MAX_COUNTER_WIDTH`] is forgotten instead.
    pub fn reset(&mut self, id: TokenId, config: &AutoIncrementConfig) {
        if config.bytes > MAX_COUNTER_WIDTH {
            self.forget(&id);
            return;
        }
        let value = parse_counter_text(&config.default_value, config.bytes);
        self.set(id, value);
    }

    /// Resets every auto-increment token in `tokens` to its default value.
    pub fn reset_all(&mut self, tokens: &TokenTable) {
        for token in tokens.iter() {
            if let TokenKind::AutoIncrement(config) = &token.kind {
                self.reset(token.id.clone(), config);
            }
        }
    }

    /// Number of stored counters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no counter is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over stored counters in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&TokenId, &[u8])> {
        self.values.iter().map(|(id, v)| (id, v.as_bytes()))
    }
}

/// Parses counter text into exactly `width` big-endian bytes.
///
/// Non-hex characters are ignored. The digits are left-padded with zeros
/// to `2 * width`; surplus high-order digits are discarded. Callers bound
/// `width`; a width whose digit count overflows yields no bytes.
pub fn parse_counter_text(text: &str, width: usize) -> Vec<u8> {
    let Some(wanted) = width.checked_mul(2) else {
        return Vec::new();
    };

    let digits: Vec<u8> = text
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();

    let mut padded = vec![0u8; wanted.saturating_sub(digits.len())];
    padded.extend_from_slice(&digits[digits.len().saturating_sub(wanted)..]);

    padded
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect()
}

/// Fits stored bytes to `width`, keeping the low-order bytes.
pub fn fit_width(bytes: &[u8], width: usize) -> Vec<u8> {
    if bytes.len() >= width {
        bytes[bytes.len() - width..].to_vec()
    } else {
        let mut out = vec![0u8; width - bytes.len()];
        out.extend_from_slice(bytes);
        out
    }
}

/// Adds `step` to a big-endian value, wrapping modulo `2^(8 * len)`.
#[allow(clippy::cast_possible_truncation)]
pub fn wrapping_add(value: &[u8], step: u64) -> Vec<u8> {
    let mut out = value.to_vec();
    let mut carry = u128::from(step);
    for byte in out.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let sum = u128::from(*byte) + (carry & 0xFF);
        *byte = sum as u8;
        carry = (carry >> 8) + (sum >> 8);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    #[test]
    fn parse_pads_left() {
        assert_eq!(parse_counter_text("F", 1), vec![0x0F]);
        assert_eq!(parse_counter_text("1", 2), vec![0x00, 0x01]);
        assert_eq!(parse_counter_text("", 2), vec![0x00, 0x00]);
    }

    #[test]
    fn parse_keeps_low_order_digits() {
        assert_eq!(parse_counter_text("12345", 2), vec![0x23, 0x45]);
        assert_eq!(parse_counter_text("0x00 FF", 1), vec![0xFF]);
    }

    #[test]
    fn parse_rejects_overflowing_width() {
        assert!(parse_counter_text("01", usize::MAX).is_empty());
    }

    #[test]
    fn reset_forgets_oversized_counter() {
        let mut store = CounterStore::new();
        store.set(TokenId::from("seq"), vec![0x01]);
        store.reset(TokenId::from("seq"), &AutoIncrementConfig::new(usize::MAX));
        assert!(store.get(&TokenId::from("seq")).is_none());
    }

    #[test]
    fn fit_width_pads_and_truncates() {
        assert_eq!(fit_width(&[0x01], 2), vec![0x00, 0x01]);
        assert_eq!(fit_width(&[0x01, 0x02, 0x03], 2), vec![0x02, 0x03]);
    }

    #[test]
    fn add_wraps_single_byte() {
        assert_eq!(wrapping_add(&[0xFF], 1), vec![0x00]);
        assert_eq!(wrapping_add(&[0xFE], 1), vec![0xFF]);
    }

    #[test]
    fn add_carries_across_bytes() {
        assert_eq!(wrapping_add(&[0x00, 0xFF], 1), vec![0x01, 0x00]);
        assert_eq!(wrapping_add(&[0x00, 0xFF], 0x1FF), vec![0x02, 0xFE]);
    }

    #[test]
    fn add_step_larger_than_width_wraps() {
        // 0x0102 + 0x10000 mod 2^16 == 0x0102
        assert_eq!(wrapping_add(&[0x01, 0x02], 0x1_0000), vec![0x01, 0x02]);
        assert_eq!(wrapping_add(&[0x10], 0x1F5), vec![0x05]);
    }

    #[test]
    fn add_zero_step() {
        assert_eq!(wrapping_add(&[0xAB, 0xCD], 0), vec![0xAB, 0xCD]);
    }

    #[test]
    fn store_serializes_as_hex() {
        let mut store = CounterStore::new();
        store.set(TokenId::from("seq"), vec![0x00, 0x2A]);
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"seq":"002A"}"#);

        let back: CounterStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn store_rejects_malformed_state() {
        assert!(serde_json::from_str::<CounterStore>(r#"{"seq":"0G"}"#).is_err());
    }

    #[test]
    fn reset_uses_default_value() {
        let tokens: TokenTable = [
            Token::auto_increment(
                "seq",
                AutoIncrementConfig::new(2)
                    .with_current("0100")
                    .with_default("10"),
            ),
            Token::flag("f", "AA"),
        ]
        .into_iter()
        .collect();

        let mut store = CounterStore::new();
        store.set(TokenId::from("seq"), vec![0x99, 0x99]);
        store.reset_all(&tokens);

        assert_eq!(store.get(&TokenId::from("seq")), Some(&[0x00, 0x10][..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn forget_and_set_hex() {
        let mut store = CounterStore::new();
        store.set_hex(TokenId::from("a"), "0A").unwrap();
        assert!(store.set_hex(TokenId::from("b"), "ABC").is_err());
        assert_eq!(store.forget(&TokenId::from("a")), Some(vec![0x0A]));
        assert!(store.is_empty());
    }
}
