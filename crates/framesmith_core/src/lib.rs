//! # framesmith core
//!
//! Compiles frame templates into the exact bytes to put on a serial or
//! network link.
//!
//! This crate provides:
//! - The segment model: literal hex runs interleaved with token references
//! - Token definitions: checksum, flag, timestamp, auto-increment and hex containers
//! - CRC-16/MODBUS, CRC-16/CCITT-FALSE and CRC-32 checksums
//! - An explicit counter store for auto-increment state
//! - The frame compiler, with `hex` (binary) and `text` (visible hex) output
//! - [`Project`], the on-disk bundle of a template and its tokens
//!
//! ## Usage
//!
//! ```
//! use framesmith_core::{
//!     compile_frame, ChecksumAlgorithm, ChecksumConfig, CounterStore, Mode, Template, Token,
//!     TokenTable,
//! };
//!
//! let mut template = Template::new();
//! template.push_literal("01 03 00 00 00 0A").push_token("crc");
//!
//! let tokens: TokenTable = [Token::checksum(
//!     "crc",
//!     ChecksumConfig::new(ChecksumAlgorithm::Crc16Modbus),
//! )]
//! .into_iter()
//! .collect();
//!
//! let output = compile_frame(&template, &tokens, &CounterStore::new(), Mode::Hex).unwrap();
//! assert_eq!(output.bytes, vec![0x01, 0x03, 0x00, 0x00, 0x00, 0x0A, 0xC5, 0xCD]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod checksum;
pub mod clock;
pub mod compiler;
pub mod config;
pub mod counter;
mod error;
pub mod project;
pub mod resolver;
pub mod segment;
pub mod token;
mod types;
pub mod warning;

pub use checksum::ChecksumAlgorithm;
pub use clock::{Clock, FixedClock, SystemClock};
pub use compiler::{compile_frame, ChecksumRecord, CompileOutput, FrameCompiler};
pub use config::CompileOptions;
pub use counter::CounterStore;
pub use error::{FrameError, FrameResult, ParseAlgorithmError, ParseModeError};
pub use project::Project;
pub use segment::{Segment, SegmentId, SegmentKind, Template, TokenId};
pub use token::{
    AutoIncrementConfig, ChecksumConfig, FlagConfig, TimestampConfig, TimestampFormat, Token,
    TokenKind, TokenTable,
};
pub use types::{ByteOrder, Mode};
pub use warning::{CompileWarning, LiteralOrigin};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    fn table(tokens: impl IntoIterator<Item = Token>) -> TokenTable {
        tokens.into_iter().collect()
    }

    fn compiler(mode: Mode) -> FrameCompiler {
        FrameCompiler::new(CompileOptions::new().mode(mode))
            .with_clock(FixedClock::from_millis(1_700_000_000_123))
    }

    #[test]
    fn literal_only() {
        let template = Template::from_segments(vec![Segment::literal("AA BB")]);
        let output = compiler(Mode::Hex)
            .compile(&template, &TokenTable::new(), &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0xAA, 0xBB]);
        assert!(!output.is_degraded());
    }

    #[test]
    fn modbus_scenario() {
        let mut template = Template::new();
        template.push_literal("EE 01 00 00").push_token("crc");
        let tokens = table([Token::checksum(
            "crc",
            ChecksumConfig::new(ChecksumAlgorithm::Crc16Modbus),
        )]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();

        let payload = [0xEE, 0x01, 0x00, 0x00];
        let crc = checksum::crc16_modbus(&payload).to_le_bytes();
        let mut expected = payload.to_vec();
        expected.extend_from_slice(&crc);
        assert_eq!(output.bytes, expected);
        assert_eq!(output.checksums.len(), 1);
        assert_eq!(output.checksums[0].range, 0..4);
        assert_eq!(output.checksums[0].offset, 4);
    }

    #[test]
    fn checksum_splices_before_trailing_bytes() {
        let mut template = Template::new();
        template.push_literal("AA BB CC DD").push_token("crc");
        let tokens = table([Token::checksum(
            "crc",
            ChecksumConfig::new(ChecksumAlgorithm::Crc16Ccitt).with_end(-1),
        )]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();

        let crc = checksum::crc16_ccitt(&[0xAA, 0xBB, 0xCC]).to_be_bytes();
        assert_eq!(output.bytes, vec![0xAA, 0xBB, 0xCC, crc[0], crc[1], 0xDD]);
    }

    #[test]
    fn later_segments_append_after_checksum() {
        let mut template = Template::new();
        template
            .push_literal("01 02")
            .push_token("crc")
            .push_literal("7E");
        let tokens = table([Token::checksum(
            "crc",
            ChecksumConfig::new(ChecksumAlgorithm::Crc32),
        )]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();

        let mut expected = vec![0x01, 0x02];
        expected.extend_from_slice(&checksum::crc32(&[0x01, 0x02]).to_be_bytes());
        expected.push(0x7E);
        assert_eq!(output.bytes, expected);
    }

    #[test]
    fn text_mode_renders_binary_frame() {
        let mut template = Template::new();
        template.push_literal("01 03 00 00 00 0A").push_token("crc");
        let tokens = table([Token::checksum(
            "crc",
            ChecksumConfig::new(ChecksumAlgorithm::Crc16Modbus),
        )]);

        let text = compiler(Mode::Text)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        let hex = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();

        assert_eq!(text.bytes, b"01 03 00 00 00 0A C5 CD".to_vec());
        assert_eq!(text.raw, hex.raw);
        assert_eq!(text.checksums, hex.checksums);
    }

    #[test]
    fn auto_increment_wraps_and_reports_state() {
        let mut template = Template::new();
        template.push_token("seq");
        let tokens = table([Token::auto_increment(
            "seq",
            AutoIncrementConfig::new(1).with_current("FF"),
        )]);

        let first = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert_eq!(first.bytes, vec![0xFF]);
        assert_eq!(first.counters.get(&TokenId::from("seq")), Some(&[0x00][..]));

        let second = compiler(Mode::Hex)
            .compile(&template, &tokens, &first.counters)
            .unwrap();
        assert_eq!(second.bytes, vec![0x00]);
        assert_eq!(second.counters.get(&TokenId::from("seq")), Some(&[0x01][..]));
    }

    #[test]
    fn repeated_counter_reference_advances_within_one_compile() {
        let mut template = Template::new();
        template.push_token("seq").push_literal("00").push_token("seq");
        let tokens = table([Token::auto_increment(
            "seq",
            AutoIncrementConfig::new(2).with_current("0010").with_step(2),
        )]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0x00, 0x10, 0x00, 0x00, 0x12]);
        assert_eq!(
            output.counters.get(&TokenId::from("seq")),
            Some(&[0x00, 0x14][..])
        );
    }

    #[test]
    fn input_counters_are_untouched() {
        let mut template = Template::new();
        template.push_token("seq");
        let tokens = table([Token::auto_increment("seq", AutoIncrementConfig::new(1))]);
        let counters = CounterStore::new();

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &counters)
            .unwrap();
        assert!(counters.is_empty());
        assert_eq!(output.counters.len(), 1);
    }

    #[test]
    fn timestamp_and_flag() {
        let mut template = Template::new();
        template.push_token("sof").push_token("ts");
        let tokens = table([
            Token::flag("sof", "7E"),
            Token::timestamp(
                "ts",
                TimestampConfig::new(TimestampFormat::Seconds, ByteOrder::Big),
            ),
        ]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0x7E, 0x65, 0x53, 0xF1, 0x00]);
    }

    #[test]
    fn dangling_reference_is_skipped() {
        let mut template = Template::new();
        template
            .push_literal("01")
            .push_token("missing")
            .push_literal("02");
        let segment_id = template[1].id.clone();

        let output = compiler(Mode::Hex)
            .compile(&template, &TokenTable::new(), &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0x01, 0x02]);
        assert_eq!(
            output.warnings,
            vec![CompileWarning::DanglingReference {
                segment_id,
                token_id: TokenId::from("missing"),
            }]
        );
    }

    #[test]
    fn unknown_kind_contributes_nothing() {
        let mut template = Template::new();
        template.push_literal("01").push_token("odd");
        let tokens = table([Token::new("odd", TokenKind::Unknown)]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0x01]);
        assert!(matches!(
            output.warnings.as_slice(),
            [CompileWarning::UnknownTokenKind { .. }]
        ));
    }

    #[test]
    fn malformed_literal_is_recovered() {
        let template = Template::from_segments(vec![Segment::literal("0x12 3").with_id("s")]);
        let output = compiler(Mode::Hex)
            .compile(&template, &TokenTable::new(), &CounterStore::new())
            .unwrap();
        // 'x' is stripped, leaving digits 0 1 2 3 -> 01 23
        assert_eq!(output.bytes, vec![0x01, 0x23]);
        assert_eq!(
            output.warnings,
            vec![CompileWarning::StrippedCharacters {
                origin: LiteralOrigin::Segment(SegmentId::new("s")),
                count: 1,
            }]
        );
    }

    #[test]
    fn odd_nibble_in_flag_is_reported() {
        let mut template = Template::new();
        template.push_token("f");
        let tokens = table([Token::flag("f", "ABC")]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0xAB]);
        assert_eq!(
            output.warnings,
            vec![CompileWarning::TruncatedNibble {
                origin: LiteralOrigin::Flag(TokenId::from("f")),
                nibble: 'C',
            }]
        );
    }

    #[test]
    fn clamped_checksum_warns() {
        let mut template = Template::new();
        template.push_literal("01 02").push_token("crc");
        let tokens = table([Token::checksum(
            "crc",
            ChecksumConfig::new(ChecksumAlgorithm::Crc16Modbus).with_start(9),
        )]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0x01, 0x02, 0xFF, 0xFF]);
        assert!(matches!(
            output.warnings.as_slice(),
            [CompileWarning::ChecksumRangeClamped { buffer_len: 2, .. }]
        ));
    }

    #[test]
    fn unsupported_algorithm_aborts() {
        let mut template = Template::new();
        template.push_literal("01").push_token("crc");
        let mut config = ChecksumConfig::new(ChecksumAlgorithm::Crc32);
        config.algorithm = "lrc".into();
        let tokens = table([Token::checksum("crc", config)]);

        let err = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedAlgorithm { .. }));
    }

    #[test]
    fn strict_mode_rejects_warnings() {
        let mut template = Template::new();
        template.push_token("missing");

        let err = FrameCompiler::new(CompileOptions::new().strict(true))
            .compile(&template, &TokenTable::new(), &CounterStore::new())
            .unwrap_err();
        assert!(matches!(
            err,
            FrameError::Degraded(CompileWarning::DanglingReference { .. })
        ));
    }

    #[test]
    fn hex_container_compiles_children_in_place() {
        let mut template = Template::new();
        template
            .push_literal("AA")
            .push_token("body")
            .push_token("crc");
        let tokens = table([
            Token::hex_container(
                "body",
                vec![Segment::literal("01 02"), Segment::token("seq")],
            ),
            Token::auto_increment("seq", AutoIncrementConfig::new(1).with_current("05")),
            Token::checksum(
                "crc",
                ChecksumConfig::new(ChecksumAlgorithm::Crc16Ccitt).with_start(1),
            ),
        ]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        let crc = checksum::crc16_ccitt(&[0x01, 0x02, 0x05]).to_be_bytes();
        assert_eq!(output.bytes, vec![0xAA, 0x01, 0x02, 0x05, crc[0], crc[1]]);
    }

    #[test]
    fn recursive_container_is_cut() {
        let mut template = Template::new();
        template.push_token("loop");
        let tokens = table([Token::hex_container(
            "loop",
            vec![Segment::literal("01"), Segment::token("loop")],
        )]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0x01]);
        assert_eq!(
            output.warnings,
            vec![CompileWarning::RecursiveContainer {
                token_id: TokenId::from("loop"),
            }]
        );
    }

    #[test]
    fn container_depth_is_limited() {
        let mut template = Template::new();
        template.push_token("outer");
        let tokens = table([
            Token::hex_container("outer", vec![Segment::token("inner")]),
            Token::hex_container("inner", vec![Segment::literal("01")]),
        ]);

        let output = FrameCompiler::new(CompileOptions::new().max_container_depth(1))
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert!(output.bytes.is_empty());
        assert_eq!(
            output.warnings,
            vec![CompileWarning::ContainerTooDeep {
                token_id: TokenId::from("inner"),
                limit: 1,
            }]
        );
    }

    #[test]
    fn container_children_form_one_literal_run() {
        let mut template = Template::new();
        template.push_token("body");
        let tokens = table([Token::hex_container(
            "body",
            vec![Segment::literal("1"), Segment::literal("2")],
        )]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0x12]);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn oversized_counter_from_project_file_is_skipped() {
        let project: Project = serde_json::from_str(
            r#"{
                "segments": [
                    { "id": "s1", "kind": "literal", "content": "A5" },
                    { "id": "s2", "kind": "token", "tokenId": "seq" }
                ],
                "tokens": {
                    "seq": { "type": "autoIncrement", "bytes": 9223372036854775808 }
                }
            }"#,
        )
        .unwrap();

        let output = project
            .compile(&compiler(Mode::Hex), &CounterStore::new())
            .unwrap();
        assert_eq!(output.bytes, vec![0xA5]);
        assert!(output.counters.is_empty());
        assert_eq!(
            output.warnings,
            vec![CompileWarning::CounterTooWide {
                token_id: TokenId::from("seq"),
                bytes: 1 << 63,
                limit: counter::MAX_COUNTER_WIDTH,
            }]
        );

        let err = FrameCompiler::new(CompileOptions::new().strict(true))
            .compile(&project.segments, &project.tokens, &CounterStore::new())
            .unwrap_err();
        assert!(matches!(
            err,
            FrameError::Degraded(CompileWarning::CounterTooWide { .. })
        ));
    }

    #[test]
    fn counter_width_limit_is_configurable() {
        let mut template = Template::new();
        template.push_token("seq");
        let tokens = table([Token::auto_increment("seq", AutoIncrementConfig::new(4))]);

        let output = FrameCompiler::new(CompileOptions::new().max_counter_width(2))
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert!(output.bytes.is_empty());
        assert!(matches!(
            output.warnings.as_slice(),
            [CompileWarning::CounterTooWide { bytes: 4, limit: 2, .. }]
        ));
    }

    #[test]
    fn zero_width_counter_warns() {
        let mut template = Template::new();
        template.push_token("seq");
        let tokens = table([Token::auto_increment("seq", AutoIncrementConfig::new(0))]);

        let output = compiler(Mode::Hex)
            .compile(&template, &tokens, &CounterStore::new())
            .unwrap();
        assert!(output.bytes.is_empty());
        assert!(output.counters.is_empty());
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn empty_template_in_text_mode() {
        let output = compiler(Mode::Text)
            .compile(&[], &TokenTable::new(), &CounterStore::new())
            .unwrap();
        assert!(output.bytes.is_empty());
        assert_eq!(output.to_ascii_hex(), "");
    }
}
