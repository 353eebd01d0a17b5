//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised by the strict hex decoder.
///
/// Lenient literal decoding never fails; only values that must be
/// well-formed (stored counter state, CLI arguments) go through the
/// strict path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A character outside `[0-9A-Fa-f]` was found.
    #[error("invalid hex character {character:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character index within the input.
        position: usize,
    },

    /// The input has an odd number of hex digits.
    #[error("odd number of hex digits: {digits}")]
    OddLength {
        /// Number of hex digits found.
        digits: usize,
    },
}

impl CodecError {
    /// Create an invalid character error.
    pub fn invalid_character(character: char, position: usize) -> Self {
        Self::InvalidCharacter {
            character,
            position,
        }
    }
}
