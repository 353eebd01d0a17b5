//! Visible hex encoder.

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Render bytes as space-separated uppercase hex, e.g. `"EE 01 0A"`.
///
/// This is the `text` mode serialization of a frame: the result is the
/// inverse of [`hex_string_to_bytes`](crate::hex_string_to_bytes), not of
/// UTF-8 decoding.
pub fn bytes_to_ascii_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, &byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        push_byte(&mut out, byte);
    }
    out
}

/// Render bytes as compact uppercase hex, e.g. `"EE010A"`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        push_byte(&mut out, byte);
    }
    out
}

#[inline]
fn push_byte(out: &mut String, byte: u8) {
    out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
    out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
}
