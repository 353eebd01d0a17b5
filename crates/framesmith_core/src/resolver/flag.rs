//! Flag tokens: a constant byte sequence.

use crate::token::FlagConfig;
use framesmith_codec::{decode_hex_literal, DecodedLiteral};

/// Decodes the flag's hex text. The caller reports anything that was lost.
pub fn resolve(config: &FlagConfig) -> DecodedLiteral {
    decode_hex_literal(&config.hex)
}
