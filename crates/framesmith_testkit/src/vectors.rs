//! Known-answer vectors for framesmith.
//!
//! Frame vectors are compiled with a clock fixed at
//! [`FIXED_CLOCK_MILLIS`](crate::fixtures::FIXED_CLOCK_MILLIS) so that
//! other implementations can reproduce them byte for byte.

use framesmith_core::{
    AutoIncrementConfig, ByteOrder, ChecksumAlgorithm, ChecksumConfig, CounterStore, Mode,
    Project, Segment, Template, TimestampConfig, TimestampFormat, Token, TokenId, TokenTable,
};
use serde::{Deserialize, Serialize};

/// "123456789" as hex, the input of the published CRC check values.
const CHECK_INPUT: &str = "313233343536373839";

/// A checksum over a fixed input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksumVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Algorithm name.
    pub algorithm: String,
    /// Input data (hex-encoded).
    pub input_hex: String,
    /// Expected checksum in its natural wire order (hex-encoded).
    pub expected_hex: String,
}

/// A whole project compiled from a given counter state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Output mode.
    pub mode: Mode,
    /// The project to compile.
    pub project: Project,
    /// Counter state before compiling.
    pub counters: CounterStore,
    /// Expected output: compact hex for `hex` mode, the literal text for `text` mode.
    pub expected: String,
    /// Expected counter state after compiling.
    pub expected_counters: CounterStore,
}

fn checksum_vector(
    id: &str,
    description: &str,
    algorithm: ChecksumAlgorithm,
    input_hex: &str,
    expected_hex: &str,
) -> ChecksumVector {
    ChecksumVector {
        id: id.into(),
        description: description.into(),
        algorithm: algorithm.name().into(),
        input_hex: input_hex.into(),
        expected_hex: expected_hex.into(),
    }
}

/// Checksum test vectors.
pub fn checksum_vectors() -> Vec<ChecksumVector> {
    use ChecksumAlgorithm::{Crc16Ccitt, Crc16Modbus, Crc32};

    vec![
        checksum_vector(
            "modbus_check",
            "CRC-16/MODBUS check value 0x4B37, low byte first",
            Crc16Modbus,
            CHECK_INPUT,
            "374B",
        ),
        checksum_vector(
            "modbus_read_10",
            "Read 10 holding registers from slave 1",
            Crc16Modbus,
            "01030000000A",
            "C5CD",
        ),
        checksum_vector(
            "modbus_read_1",
            "Read 1 holding register from slave 1",
            Crc16Modbus,
            "010300000001",
            "840A",
        ),
        checksum_vector("modbus_empty", "Empty input yields the init value", Crc16Modbus, "", "FFFF"),
        checksum_vector(
            "ccitt_check",
            "CRC-16/CCITT-FALSE check value",
            Crc16Ccitt,
            CHECK_INPUT,
            "29B1",
        ),
        checksum_vector("ccitt_empty", "Empty input yields the init value", Crc16Ccitt, "", "FFFF"),
        checksum_vector("crc32_check", "CRC-32 check value", Crc32, CHECK_INPUT, "CBF43926"),
        checksum_vector("crc32_empty", "Empty input", Crc32, "", "00000000"),
    ]
}

fn counters(entries: &[(&str, &[u8])]) -> CounterStore {
    let mut store = CounterStore::new();
    for (id, value) in entries {
        store.set(TokenId::from(*id), value.to_vec());
    }
    store
}

fn project(segments: Vec<Segment>, tokens: impl IntoIterator<Item = Token>) -> Project {
    let tokens: TokenTable = tokens.into_iter().collect();
    Project::new(Template::from_segments(segments), tokens)
}

/// Whole-frame test vectors.
pub fn frame_vectors() -> Vec<FrameVector> {
    let modbus = || Token::checksum("crc", ChecksumConfig::new(ChecksumAlgorithm::Crc16Modbus));

    vec![
        FrameVector {
            id: "modbus_append".into(),
            description: "Checksum over the whole buffer is appended".into(),
            mode: Mode::Hex,
            project: project(
                vec![
                    Segment::literal("01 03 00 00 00 0A").with_id("s1"),
                    Segment::token("crc").with_id("s2"),
                ],
                [modbus()],
            ),
            counters: CounterStore::new(),
            expected: "01030000000AC5CD".into(),
            expected_counters: CounterStore::new(),
        },
        FrameVector {
            id: "modbus_text".into(),
            description: "Text mode renders the binary frame".into(),
            mode: Mode::Text,
            project: project(
                vec![
                    Segment::literal("01 03 00 00 00 0A").with_id("s1"),
                    Segment::token("crc").with_id("s2"),
                ],
                [modbus()],
            ),
            counters: CounterStore::new(),
            expected: "01 03 00 00 00 0A C5 CD".into(),
            expected_counters: CounterStore::new(),
        },
        FrameVector {
            id: "start_index_skips_flag".into(),
            description: "Checksum starts after a leading flag".into(),
            mode: Mode::Hex,
            project: project(
                vec![
                    Segment::token("sof").with_id("s1"),
                    Segment::literal("01 03 00 00 00 01").with_id("s2"),
                    Segment::token("crc").with_id("s3"),
                ],
                [
                    Token::flag("sof", "7E"),
                    Token::checksum(
                        "crc",
                        ChecksumConfig::new(ChecksumAlgorithm::Crc16Modbus).with_start(1),
                    ),
                ],
            ),
            counters: CounterStore::new(),
            expected: "7E010300000001840A".into(),
            expected_counters: CounterStore::new(),
        },
        FrameVector {
            id: "splice_before_tail".into(),
            description: "Negative end index splices the checksum ahead of the trailer".into(),
            mode: Mode::Hex,
            project: project(
                vec![
                    Segment::literal("01 03 00 00 00 01 0D").with_id("s1"),
                    Segment::token("crc").with_id("s2"),
                ],
                [Token::checksum(
                    "crc",
                    ChecksumConfig::new(ChecksumAlgorithm::Crc16Modbus).with_end(-1),
                )],
            ),
            counters: CounterStore::new(),
            expected: "010300000001840A0D".into(),
            expected_counters: CounterStore::new(),
        },
        FrameVector {
            id: "container_then_ccitt".into(),
            description: "Hex container contents are covered by a later checksum".into(),
            mode: Mode::Hex,
            project: project(
                vec![
                    Segment::token("head").with_id("s1"),
                    Segment::literal("35 36 37 38 39").with_id("s2"),
                    Segment::token("crc").with_id("s3"),
                ],
                [
                    Token::hex_container("head", vec![Segment::literal("31 32 33 34").with_id("c1")]),
                    Token::checksum("crc", ChecksumConfig::new(ChecksumAlgorithm::Crc16Ccitt)),
                ],
            ),
            counters: CounterStore::new(),
            expected: "31323334353637383929B1".into(),
            expected_counters: CounterStore::new(),
        },
        FrameVector {
            id: "crc32_little_endian".into(),
            description: "Byte order override on a CRC-32".into(),
            mode: Mode::Hex,
            project: project(
                vec![
                    Segment::literal("31 32 33 34 35 36 37 38 39").with_id("s1"),
                    Segment::token("crc").with_id("s2"),
                ],
                [Token::checksum(
                    "crc",
                    ChecksumConfig::new(ChecksumAlgorithm::Crc32).with_byte_order(ByteOrder::Little),
                )],
            ),
            counters: CounterStore::new(),
            expected: "3132333435363738392639F4CB".into(),
            expected_counters: CounterStore::new(),
        },
        FrameVector {
            id: "counter_seeded_from_config".into(),
            description: "First send emits the configured value".into(),
            mode: Mode::Hex,
            project: project(
                vec![
                    Segment::literal("A5").with_id("s1"),
                    Segment::token("seq").with_id("s2"),
                ],
                [Token::auto_increment(
                    "seq",
                    AutoIncrementConfig::new(2).with_current("00FF"),
                )],
            ),
            counters: CounterStore::new(),
            expected: "A500FF".into(),
            expected_counters: counters(&[("seq", &[0x01, 0x00])]),
        },
        FrameVector {
            id: "counter_from_state".into(),
            description: "Stored state wins over the configured value".into(),
            mode: Mode::Hex,
            project: project(
                vec![
                    Segment::literal("A5").with_id("s1"),
                    Segment::token("seq").with_id("s2"),
                ],
                [Token::auto_increment(
                    "seq",
                    AutoIncrementConfig::new(2).with_current("00FF"),
                )],
            ),
            counters: counters(&[("seq", &[0x12, 0x34])]),
            expected: "A51234".into(),
            expected_counters: counters(&[("seq", &[0x12, 0x35])]),
        },
        FrameVector {
            id: "timestamp_seconds".into(),
            description: "Unix seconds, big-endian".into(),
            mode: Mode::Hex,
            project: project(
                vec![
                    Segment::literal("AA").with_id("s1"),
                    Segment::token("ts").with_id("s2"),
                ],
                [Token::timestamp(
                    "ts",
                    TimestampConfig::new(TimestampFormat::Seconds, ByteOrder::Big),
                )],
            ),
            counters: CounterStore::new(),
            expected: "AA6553F100".into(),
            expected_counters: CounterStore::new(),
        },
    ]
}

/// Serializes all vectors to JSON.
pub fn all_vectors_json() -> String {
    #[derive(Serialize)]
    struct AllVectors {
        checksum: Vec<ChecksumVector>,
        frame: Vec<FrameVector>,
    }

    let all = AllVectors {
        checksum: checksum_vectors(),
        frame: frame_vectors(),
    };

    serde_json::to_string_pretty(&all).expect("Failed to serialize vectors")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::strict_compiler;
    use framesmith_codec::{bytes_to_hex, parse_hex_exact};

    #[test]
    fn test_checksum_vectors() {
        for vector in checksum_vectors() {
            let algorithm: ChecksumAlgorithm = vector.algorithm.parse().unwrap();
            let input = parse_hex_exact(&vector.input_hex).unwrap();
            assert_eq!(
                bytes_to_hex(&algorithm.checksum_bytes(&input, None)),
                vector.expected_hex,
                "Vector {} failed: {}",
                vector.id,
                vector.description
            );
        }
    }

    #[test]
    fn test_frame_vectors() {
        for vector in frame_vectors() {
            let output = vector
                .project
                .compile(&strict_compiler(vector.mode), &vector.counters)
                .unwrap();

            let actual = match vector.mode {
                Mode::Hex => bytes_to_hex(&output.bytes),
                Mode::Text => String::from_utf8(output.bytes).unwrap(),
            };
            assert_eq!(
                actual, vector.expected,
                "Vector {} failed: {}",
                vector.id, vector.description
            );
            assert_eq!(
                output.counters, vector.expected_counters,
                "Vector {} left unexpected counters",
                vector.id
            );
        }
    }

    #[test]
    fn test_frame_vectors_survive_json() {
        for vector in frame_vectors() {
            let json = serde_json::to_string(&vector.project).unwrap();
            let project: Project = serde_json::from_str(&json).unwrap();
            assert_eq!(project, vector.project, "Vector {} changed", vector.id);
        }
    }

    #[test]
    fn test_all_vectors_json() {
        let json = all_vectors_json();
        assert!(!json.is_empty());
        assert!(json.contains("modbus_check"));
        assert!(json.contains("splice_before_tail"));
    }
}
