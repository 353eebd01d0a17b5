//! Compiler configuration.

use crate::counter::MAX_COUNTER_WIDTH;
use crate::types::Mode;

/// Options for compiling frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Output encoding of the finished frame.
    pub mode: Mode,

    /// Reject degraded frames instead of sending a best-effort result.
    pub strict: bool,

    /// Maximum nesting depth of hex container tokens.
    pub max_container_depth: usize,

    /// Widest auto-increment counter accepted, in bytes.
    pub max_counter_width: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Hex,
            strict: false,
            max_container_depth: 16,
            max_counter_width: MAX_COUNTER_WIDTH,
        }
    }
}

impl CompileOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output mode.
    #[must_use]
    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether warnings abort the compile.
    #[must_use]
    pub const fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Sets the maximum hex container nesting depth.
    #[must_use]
    pub const fn max_container_depth(mut self, depth: usize) -> Self {
        self.max_container_depth = depth;
        self
    }

    /// Sets the widest accepted auto-increment counter.
    #[must_use]
    pub const fn max_counter_width(mut self, bytes: usize) -> Self {
        self.max_counter_width = bytes;
        self
    }
}
