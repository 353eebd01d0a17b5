//! Non-fatal problems found while compiling a frame.

use crate::segment::{SegmentId, TokenId};
use std::fmt;
use thiserror::Error;

/// Where a piece of hex text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralOrigin {
    /// A literal segment.
    Segment(SegmentId),
    /// The `hex` of a flag token.
    Flag(TokenId),
}

impl fmt::Display for LiteralOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Segment(id) => write!(f, "literal segment {id}"),
            Self::Flag(id) => write!(f, "flag token {id}"),
        }
    }
}

/// A recovered problem. The frame was still produced, but may not be what
/// the user intended.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileWarning {
    /// A segment references a token id missing from the table.
    #[error("segment {segment_id} references unknown token {token_id}")]
    DanglingReference {
        /// The referencing segment.
        segment_id: SegmentId,
        /// The missing token id.
        token_id: TokenId,
    },

    /// A token has a kind this compiler does not know.
    #[error("token {token_id} has an unknown kind and was skipped")]
    UnknownTokenKind {
        /// The token.
        token_id: TokenId,
    },

    /// Characters that are neither hex digits nor whitespace were removed.
    #[error("{origin}: stripped {count} non-hex character(s)")]
    StrippedCharacters {
        /// Where the text came from.
        origin: LiteralOrigin,
        /// Number of characters removed.
        count: usize,
    },

    /// An odd trailing nibble was dropped.
    #[error("{origin}: dropped trailing nibble {nibble:?}")]
    TruncatedNibble {
        /// Where the text came from.
        origin: LiteralOrigin,
        /// The dropped digit.
        nibble: char,
    },

    /// A checksum range fell outside the buffer and was clamped.
    #[error(
        "checksum token {token_id}: range start={start_index} end={end_index} \
         clamped to buffer of {buffer_len} byte(s)"
    )]
    ChecksumRangeClamped {
        /// The checksum token.
        token_id: TokenId,
        /// Configured start offset.
        start_index: usize,
        /// Configured end offset.
        end_index: i64,
        /// Buffer length when the checksum was resolved.
        buffer_len: usize,
    },

    /// An auto-increment counter is wider than the configured limit.
    #[error(
        "counter token {token_id} is {bytes} byte(s) wide, above the limit of {limit}, \
         and was skipped"
    )]
    CounterTooWide {
        /// The counter token.
        token_id: TokenId,
        /// Configured width.
        bytes: usize,
        /// Width limit in force.
        limit: usize,
    },

    /// A hex container references itself, directly or indirectly.
    #[error("hex container {token_id} re-enters itself and was skipped")]
    RecursiveContainer {
        /// The container token.
        token_id: TokenId,
    },

    /// Hex containers are nested deeper than allowed.
    #[error("hex container {token_id} exceeds nesting limit of {limit}")]
    ContainerTooDeep {
        /// The container token that was not expanded.
        token_id: TokenId,
        /// The configured limit.
        limit: usize,
    },

    /// An auto-increment token has a width of zero bytes.
    #[error("auto-increment token {token_id} has zero width")]
    ZeroWidthCounter {
        /// The counter token.
        token_id: TokenId,
    },
}
