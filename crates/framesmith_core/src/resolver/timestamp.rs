//! Timestamp tokens.

use crate::clock::Clock;
use crate::token::{TimestampConfig, TimestampFormat};

/// Samples `clock` and encodes the time per `config`.
///
/// Seconds are truncated to 32 bits; milliseconds use the full 64.
pub fn resolve(config: &TimestampConfig, clock: &dyn Clock) -> Vec<u8> {
    let millis = clock.now_millis();
    let value = match config.format {
        TimestampFormat::Seconds => (millis / 1000) & 0xFFFF_FFFF,
        TimestampFormat::Milliseconds => millis,
    };
    config.byte_order.encode(value, config.format.width())
}
