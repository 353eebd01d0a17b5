//! Error types for framesmith core.

use crate::segment::TokenId;
use crate::warning::CompileWarning;
use thiserror::Error;

/// Result type for core operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors that abort a compile.
///
/// Most template problems are recovered and reported as
/// [`CompileWarning`]s instead; only configuration that would put a wrong
/// frame on the wire is fatal.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Hex codec error.
    #[error("codec error: {0}")]
    Codec(#[from] framesmith_codec::CodecError),

    /// A checksum token names an algorithm that is not implemented.
    #[error("checksum token {token_id} uses unsupported algorithm {name:?}")]
    UnsupportedAlgorithm {
        /// The checksum token.
        token_id: TokenId,
        /// The configured algorithm name.
        name: String,
    },

    /// A recoverable problem was found while compiling in strict mode.
    #[error("degraded frame rejected in strict mode: {0}")]
    Degraded(CompileWarning),
}

/// Error returned when parsing an unknown checksum algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported checksum algorithm: {name:?}")]
pub struct ParseAlgorithmError {
    /// The name that failed to parse.
    pub name: String,
}

/// Error returned when parsing an unknown output mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output mode {value:?}, expected \"text\" or \"hex\"")]
pub struct ParseModeError {
    /// The value that failed to parse.
    pub value: String,
}
