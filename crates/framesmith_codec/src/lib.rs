//! # framesmith codec
//!
//! Hex literal handling for framesmith templates.
//!
//! Template literals are always interpreted as hex, whatever the output
//! mode. This crate provides both directions of that transform:
//!
//! - Lenient decoding of user-typed literals (non-hex characters are
//!   stripped, a trailing odd nibble is dropped)
//! - Strict decoding for machine-written values such as counter state
//! - Rendering bytes as visible uppercase hex, used for `text` mode output
//!
//! ## Usage
//!
//! ```
//! use framesmith_codec::{bytes_to_ascii_hex, hex_string_to_bytes};
//!
//! let bytes = hex_string_to_bytes("ee 01 00 00");
//! assert_eq!(bytes, vec![0xEE, 0x01, 0x00, 0x00]);
//!
//! let text = bytes_to_ascii_hex(&bytes);
//! assert_eq!(text, "EE 01 00 00");
//! assert_eq!(hex_string_to_bytes(&text), bytes);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;

pub use decoder::{decode_hex_literal, hex_string_to_bytes, parse_hex_exact, DecodedLiteral};
pub use encoder::{bytes_to_ascii_hex, bytes_to_hex};
pub use error::{CodecError, CodecResult};
