//! Auto-increment tokens.

use crate::counter::{fit_width, parse_counter_text, wrapping_add, CounterStore};
use crate::segment::TokenId;
use crate::token::AutoIncrementConfig;

/// One emission of a counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterStep {
    /// Bytes placed in the frame (the value before the increment).
    pub emitted: Vec<u8>,
    /// Value to store for the next emission.
    pub next: Vec<u8>,
}

/// Reads the counter's current value and computes its successor.
///
/// The stored value wins over the configured seed. Returns `None` for a
/// zero-width counter.
pub fn resolve(
    token_id: &TokenId,
    config: &AutoIncrementConfig,
    counters: &CounterStore,
) -> Option<CounterStep> {
    if config.bytes == 0 {
        return None;
    }

    let current = match counters.get(token_id) {
        Some(stored) => fit_width(stored, config.bytes),
        None => parse_counter_text(config.seed(), config.bytes),
    };
    let next = wrapping_add(&current, config.step);

    Some(CounterStep {
        emitted: current,
        next,
    })
}
