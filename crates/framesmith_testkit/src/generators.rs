//! Property-based test generators using proptest.
//!
//! Provides strategies for templates, tokens and whole projects. Generated
//! projects always use supported checksum algorithms, so compiling them
//! without strict mode never fails.

use framesmith_core::{
    AutoIncrementConfig, ByteOrder, ChecksumAlgorithm, ChecksumConfig, Project, Segment, Template,
    TimestampConfig, TimestampFormat, Token, TokenTable,
};
use proptest::prelude::*;

/// Token ids used by [`token_table_strategy`].
pub const TOKEN_IDS: [&str; 5] = ["sof", "crc", "ts", "seq", "body"];

/// Strategy for well-formed hex literals such as `"0A FF 1c"`.
pub fn hex_literal_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..16).prop_map(|bytes| {
        bytes
            .iter()
            .enumerate()
            .map(|(i, b)| if i % 2 == 0 { format!("{b:02X}") } else { format!("{b:02x}") })
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Strategy for user-typed literals: hex digits mixed with junk and odd lengths.
pub fn messy_literal_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9A-Fa-f xZ:\\-]{0,24}").expect("Invalid regex")
}

/// Strategy for supported checksum algorithms.
pub fn algorithm_strategy() -> impl Strategy<Value = ChecksumAlgorithm> {
    prop::sample::select(ChecksumAlgorithm::ALL.to_vec())
}

/// Strategy for byte orders.
pub fn byte_order_strategy() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![Just(ByteOrder::Big), Just(ByteOrder::Little)]
}

/// Strategy for checksum configurations, including out-of-range offsets.
pub fn checksum_config_strategy() -> impl Strategy<Value = ChecksumConfig> {
    (
        algorithm_strategy(),
        0usize..8,
        -12i64..=2,
        prop::option::of(byte_order_strategy()),
    )
        .prop_map(|(algorithm, start, end, order)| {
            let config = ChecksumConfig::new(algorithm).with_start(start).with_end(end);
            match order {
                Some(order) => config.with_byte_order(order),
                None => config,
            }
        })
}

/// Strategy for timestamp configurations.
pub fn timestamp_config_strategy() -> impl Strategy<Value = TimestampConfig> {
    (
        prop_oneof![
            Just(TimestampFormat::Seconds),
            Just(TimestampFormat::Milliseconds)
        ],
        byte_order_strategy(),
    )
        .prop_map(|(format, order)| TimestampConfig::new(format, order))
}

/// Strategy for auto-increment configurations, including zero width.
pub fn auto_increment_strategy() -> impl Strategy<Value = AutoIncrementConfig> {
    (0usize..5, prop::option::of(hex_literal_strategy()), 0u64..300).prop_map(
        |(bytes, current, step)| {
            let config = AutoIncrementConfig::new(bytes).with_step(step);
            match current {
                Some(current) => config.with_current(current),
                None => config,
            }
        },
    )
}

/// Strategy for a segment referencing one of [`TOKEN_IDS`], or a dangling id.
pub fn token_segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        8 => prop::sample::select(TOKEN_IDS.to_vec()).prop_map(Segment::token),
        1 => Just(Segment::token("missing")),
    ]
}

/// Strategy for templates mixing literals and token references.
pub fn template_strategy() -> impl Strategy<Value = Template> {
    prop::collection::vec(
        prop_oneof![
            hex_literal_strategy().prop_map(Segment::literal),
            messy_literal_strategy().prop_map(Segment::literal),
            token_segment_strategy(),
        ],
        0..10,
    )
    .prop_map(Template::from_segments)
}

/// Strategy for a token table defining every id in [`TOKEN_IDS`].
///
/// `body` is a hex container that may reference the other tokens, and
/// sometimes itself.
pub fn token_table_strategy() -> impl Strategy<Value = TokenTable> {
    (
        hex_literal_strategy(),
        checksum_config_strategy(),
        timestamp_config_strategy(),
        auto_increment_strategy(),
        template_strategy(),
    )
        .prop_map(|(flag, checksum, timestamp, counter, body)| {
            [
                Token::flag("sof", flag),
                Token::checksum("crc", checksum),
                Token::timestamp("ts", timestamp),
                Token::auto_increment("seq", counter),
                Token::hex_container("body", body.into_segments()),
            ]
            .into_iter()
            .collect()
        })
}

/// Strategy for whole projects.
pub fn project_strategy() -> impl Strategy<Value = Project> {
    (template_strategy(), token_table_strategy())
        .prop_map(|(segments, tokens)| Project::new(segments, tokens))
}
