//! Checksum command implementation.

use crate::error::CliError;
use framesmith_codec::{bytes_to_ascii_hex, parse_hex_exact};
use framesmith_core::{ByteOrder, ChecksumAlgorithm};

/// A computed checksum.
#[derive(Debug)]
pub struct ChecksumResult {
    /// The algorithm used.
    pub algorithm: ChecksumAlgorithm,
    /// Number of input bytes.
    pub input_len: usize,
    /// The checksum as an integer.
    pub value: u32,
    /// The checksum in wire order.
    pub bytes: Vec<u8>,
}

/// Runs the checksum command.
pub fn run(
    algorithm: &str,
    hex: &[String],
    byte_order: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = compute(algorithm, hex, byte_order)?;
    let digits = result.algorithm.width() * 2;

    println!(
        "{} over {} byte(s): 0x{:0digits$X}",
        result.algorithm, result.input_len, result.value
    );
    println!("wire: {}", bytes_to_ascii_hex(&result.bytes));

    Ok(())
}

/// Computes the checksum of the concatenated hex arguments.
pub fn compute(
    algorithm: &str,
    hex: &[String],
    byte_order: Option<&str>,
) -> Result<ChecksumResult, Box<dyn std::error::Error>> {
    let algorithm: ChecksumAlgorithm = algorithm.parse()?;
    let input = parse_hex_exact(&hex.concat())?;
    let order = byte_order.map(parse_byte_order).transpose()?;

    Ok(ChecksumResult {
        algorithm,
        input_len: input.len(),
        value: algorithm.compute(&input),
        bytes: algorithm.checksum_bytes(&input, order),
    })
}

fn parse_byte_order(value: &str) -> Result<ByteOrder, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "big" | "be" => Ok(ByteOrder::Big),
        "little" | "le" => Ok(ByteOrder::Little),
        _ => Err(CliError::InvalidArgument {
            what: "byte order",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn modbus_in_natural_order() {
        let result = compute("modbus", &args(&["01 03 00 00 00 0A"]), None).unwrap();
        assert_eq!(result.algorithm, ChecksumAlgorithm::Crc16Modbus);
        assert_eq!(result.input_len, 6);
        assert_eq!(result.value, 0xCDC5);
        assert_eq!(result.bytes, vec![0xC5, 0xCD]);
    }

    #[test]
    fn arguments_are_concatenated() {
        let split = compute("crc32", &args(&["3132", "33 34", "3536373839"]), None).unwrap();
        assert_eq!(split.value, 0xCBF4_3926);
        assert_eq!(split.bytes, vec![0xCB, 0xF4, 0x39, 0x26]);
    }

    #[test]
    fn byte_order_override() {
        let result = compute("crc16-ccitt", &args(&["313233343536373839"]), Some("little")).unwrap();
        assert_eq!(result.bytes, vec![0xB1, 0x29]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(compute("adler32", &args(&["00"]), None).is_err());
        assert!(compute("crc32", &args(&["0G"]), None).is_err());
        assert!(compute("crc32", &args(&["123"]), None).is_err());
        assert!(compute("crc32", &args(&["00"]), Some("middle")).is_err());
    }
}
