//! Small shared value types.

use crate::error::ParseModeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output encoding of a compiled frame.
///
/// Literals are always read as hex and checksums are always computed over
/// binary content. The mode only decides how the finished frame is
/// serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Printable ASCII-hex rendering of the frame (`"EE 01 00 00"`).
    Text,
    /// Raw binary frame.
    #[default]
    Hex,
}

impl Mode {
    /// Returns the mode name as used in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Hex => "hex",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "hex" => Ok(Self::Hex),
            _ => Err(ParseModeError {
                value: s.to_string(),
            }),
        }
    }
}

/// Byte order for multi-byte integers embedded in a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

impl ByteOrder {
    /// Encode the low `width` bytes of `value` in this byte order.
    ///
    /// Widths above 8 are left-padded with zero bytes (big-endian) or
    /// right-padded (little-endian).
    pub fn encode(self, value: u64, width: usize) -> Vec<u8> {
        let be = value.to_be_bytes();
        let mut out = if width <= be.len() {
            be[be.len() - width..].to_vec()
        } else {
            let mut padded = vec![0u8; width - be.len()];
            padded.extend_from_slice(&be);
            padded
        };
        if self == Self::Little {
            out.reverse();
        }
        out
    }
}
