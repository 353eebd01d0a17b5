//! Checksum tokens.
//!
//! A checksum is computed over part of the bytes already assembled and
//! spliced back into that buffer rather than appended. With
//! `end_index = -k` the checked region stops `k` bytes before the current
//! end and the checksum is inserted right there, ahead of those `k` bytes:
//!
//! ```text
//! buffer:  AA BB CC | DD        (end_index = -1, split at 3)
//! result:  AA BB CC <crc> DD    (crc covers AA BB CC)
//! ```

use crate::checksum::ChecksumAlgorithm;
use crate::error::{FrameError, FrameResult};
use crate::segment::TokenId;
use crate::token::ChecksumConfig;
use std::ops::Range;

/// A checksum ready to be inserted into the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumSplice {
    /// The algorithm used.
    pub algorithm: ChecksumAlgorithm,
    /// The checked region of the buffer.
    pub range: Range<usize>,
    /// Offset at which the checksum is inserted.
    pub at: usize,
    /// Encoded checksum.
    pub bytes: Vec<u8>,
    /// Whether the configured range had to be clamped to the buffer.
    pub clamped: bool,
}

impl ChecksumSplice {
    /// Inserts the checksum into `buffer`, producing `head ++ checksum ++ tail`.
    pub fn apply(&self, buffer: &mut Vec<u8>) {
        buffer.splice(self.at..self.at, self.bytes.iter().copied());
    }
}

/// Computes the checksum for `buffer` as it stands.
///
/// # Errors
///
/// Returns [`FrameError::UnsupportedAlgorithm`] if the configured
/// algorithm name is not recognized.
pub fn resolve(
    token_id: &TokenId,
    config: &ChecksumConfig,
    buffer: &[u8],
) -> FrameResult<ChecksumSplice> {
    let algorithm = config
        .algorithm
        .parse::<ChecksumAlgorithm>()
        .map_err(|e| FrameError::UnsupportedAlgorithm {
            token_id: token_id.clone(),
            name: e.name,
        })?;

    let (at, end_clamped) = split_index(buffer.len(), config.end_index);
    let start = config.start_index.min(at);
    let clamped = end_clamped || config.start_index > at;

    let range = start..at;
    let bytes = algorithm.checksum_bytes(&buffer[range.clone()], config.byte_order);

    Ok(ChecksumSplice {
        algorithm,
        range,
        at,
        bytes,
        clamped,
    })
}

/// Returns the splice offset for a buffer of `len` bytes, and whether it
/// had to be clamped at zero.
pub fn split_index(len: usize, end_index: i64) -> (usize, bool) {
    if end_index >= 0 {
        return (len, false);
    }
    let back = usize::try_from(end_index.unsigned_abs()).unwrap_or(usize::MAX);
    match len.checked_sub(back) {
        Some(at) => (at, false),
        None => (0, true),
    }
}
