//! Frame compiler.
//!
//! Walks a template's segments in order, growing a binary buffer:
//!
//! - literal segments are hex-decoded and appended
//! - flag, timestamp and auto-increment tokens append their bytes
//! - checksum tokens are computed over the buffer as it stands and spliced
//!   in at the offset given by their `end_index`
//! - hex containers compile their child segments in place
//!
//! Only once every segment is placed is the frame encoded for the
//! requested [`Mode`]. Checksums therefore always cover the binary frame,
//! and switching between `hex` and `text` output never changes their value.

use crate::checksum::ChecksumAlgorithm;
use crate::clock::{Clock, SystemClock};
use crate::config::CompileOptions;
use crate::counter::CounterStore;
use crate::error::{FrameError, FrameResult};
use crate::resolver;
use crate::segment::{Segment, SegmentKind, TokenId};
use crate::token::{Token, TokenKind, TokenTable};
use crate::types::Mode;
use crate::warning::{CompileWarning, LiteralOrigin};
use framesmith_codec::{bytes_to_ascii_hex, decode_hex_literal, DecodedLiteral};
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Result of compiling one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    /// The frame encoded for the requested mode, ready to send.
    pub bytes: Vec<u8>,
    /// The binary frame, whatever the mode.
    pub raw: Vec<u8>,
    /// Every checksum placed, in resolution order.
    pub checksums: Vec<ChecksumRecord>,
    /// Problems recovered from while compiling.
    pub warnings: Vec<CompileWarning>,
    /// Counter state after this compile, to be persisted by the caller.
    pub counters: CounterStore,
}

impl CompileOutput {
    /// Returns true if any warning was raised.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Renders the binary frame as spaced uppercase hex.
    pub fn to_ascii_hex(&self) -> String {
        bytes_to_ascii_hex(&self.raw)
    }
}

/// Where a checksum was computed and placed.
///
/// Offsets refer to the buffer at the moment the checksum was resolved; a
/// later checksum spliced in front of it shifts its final position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    /// The checksum token.
    pub token_id: TokenId,
    /// The algorithm used.
    pub algorithm: ChecksumAlgorithm,
    /// The checked region.
    pub range: Range<usize>,
    /// Offset the checksum was inserted at.
    pub offset: usize,
    /// The encoded checksum.
    pub value: Vec<u8>,
}

/// Compiles frame templates.
#[derive(Clone)]
pub struct FrameCompiler {
    options: CompileOptions,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for FrameCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCompiler")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for FrameCompiler {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

impl FrameCompiler {
    /// Creates a compiler reading the system clock.
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used by timestamp tokens.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns the compile options.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles `segments` into a frame.
    ///
    /// `counters` is not modified; the advanced counter state is returned
    /// in [`CompileOutput::counters`].
    ///
    /// # Errors
    ///
    /// Fails on an unsupported checksum algorithm, or on any warning when
    /// compiling in strict mode.
    pub fn compile(
        &self,
        segments: &[Segment],
        tokens: &TokenTable,
        counters: &CounterStore,
    ) -> FrameResult<CompileOutput> {
        let mut assembly = Assembly {
            options: &self.options,
            clock: self.clock.as_ref(),
            tokens,
            buffer: Vec::new(),
            checksums: Vec::new(),
            warnings: Vec::new(),
            counters: counters.clone(),
            expanding: Vec::new(),
        };

        assembly.walk(segments)?;

        let raw = assembly.buffer;
        let bytes = match self.options.mode {
            Mode::Hex => raw.clone(),
            Mode::Text => bytes_to_ascii_hex(&raw).into_bytes(),
        };

        debug!(
            mode = %self.options.mode,
            segments = segments.len(),
            frame_len = raw.len(),
            checksums = assembly.checksums.len(),
            warnings = assembly.warnings.len(),
            "compiled frame"
        );

        Ok(CompileOutput {
            bytes,
            raw,
            checksums: assembly.checksums,
            warnings: assembly.warnings,
            counters: assembly.counters,
        })
    }
}

/// Compiles a frame with default options for `mode`, reading the system clock.
///
/// # Errors
///
/// Fails on an unsupported checksum algorithm.
pub fn compile_frame(
    segments: &[Segment],
    tokens: &TokenTable,
    counters: &CounterStore,
    mode: Mode,
) -> FrameResult<CompileOutput> {
    FrameCompiler::new(CompileOptions::new().mode(mode)).compile(segments, tokens, counters)
}

/// Mutable state of one compile.
struct Assembly<'a> {
    options: &'a CompileOptions,
    clock: &'a dyn Clock,
    tokens: &'a TokenTable,
    buffer: Vec<u8>,
    checksums: Vec<ChecksumRecord>,
    warnings: Vec<CompileWarning>,
    counters: CounterStore,
    /// Hex containers currently being expanded, outermost first.
    expanding: Vec<TokenId>,
}

impl Assembly<'_> {
    fn walk(&mut self, segments: &[Segment]) -> FrameResult<()> {
        for segment in segments {
            match &segment.kind {
                SegmentKind::Literal { content } => {
                    trace!(segment = %segment.id, "literal");
                    let decoded = decode_hex_literal(content);
                    self.append_literal(decoded, LiteralOrigin::Segment(segment.id.clone()))?;
                }
                SegmentKind::Token { token_id } => match self.tokens.get(token_id) {
                    Some(token) => self.resolve(token)?,
                    None => self.warn(CompileWarning::DanglingReference {
                        segment_id: segment.id.clone(),
                        token_id: token_id.clone(),
                    })?,
                },
            }
        }
        Ok(())
    }

    fn resolve(&mut self, token: &Token) -> FrameResult<()> {
        let id = &token.id;
        trace!(token = %id, kind = token.kind.kind_name(), "resolve");

        match &token.kind {
            TokenKind::Checksum(config) => {
                let splice = resolver::checksum::resolve(id, config, &self.buffer)?;
                if splice.clamped {
                    self.warn(CompileWarning::ChecksumRangeClamped {
                        token_id: id.clone(),
                        start_index: config.start_index,
                        end_index: config.end_index,
                        buffer_len: self.buffer.len(),
                    })?;
                }
                splice.apply(&mut self.buffer);
                self.checksums.push(ChecksumRecord {
                    token_id: id.clone(),
                    algorithm: splice.algorithm,
                    range: splice.range,
                    offset: splice.at,
                    value: splice.bytes,
                });
            }
            TokenKind::Flag(config) => {
                let decoded = resolver::flag::resolve(config);
                self.append_literal(decoded, LiteralOrigin::Flag(id.clone()))?;
            }
            TokenKind::Timestamp(config) => {
                let bytes = resolver::timestamp::resolve(config, self.clock);
                self.buffer.extend_from_slice(&bytes);
            }
            TokenKind::AutoIncrement(config) if config.bytes > self.options.max_counter_width => {
                self.warn(CompileWarning::CounterTooWide {
                    token_id: id.clone(),
                    bytes: config.bytes,
                    limit: self.options.max_counter_width,
                })?;
            }
            TokenKind::AutoIncrement(config) => {
                match resolver::auto_increment::resolve(id, config, &self.counters) {
                    Some(step) => {
                        self.buffer.extend_from_slice(&step.emitted);
                        self.counters.set(id.clone(), step.next);
                    }
                    None => self.warn(CompileWarning::ZeroWidthCounter {
                        token_id: id.clone(),
                    })?,
                }
            }
            TokenKind::Hex { segments } => self.expand(id, segments)?,
            TokenKind::Unknown => self.warn(CompileWarning::UnknownTokenKind {
                token_id: id.clone(),
            })?,
        }
        Ok(())
    }

    fn expand(&mut self, id: &TokenId, segments: &[Segment]) -> FrameResult<()> {
        if self.expanding.contains(id) {
            return self.warn(CompileWarning::RecursiveContainer {
                token_id: id.clone(),
            });
        }
        if self.expanding.len() >= self.options.max_container_depth {
            return self.warn(CompileWarning::ContainerTooDeep {
                token_id: id.clone(),
                limit: self.options.max_container_depth,
            });
        }

        self.expanding.push(id.clone());
        let result = self.walk(segments);
        self.expanding.pop();
        result
    }

    fn append_literal(&mut self, decoded: DecodedLiteral, origin: LiteralOrigin) -> FrameResult<()> {
        self.buffer.extend_from_slice(&decoded.bytes);
        if decoded.stripped > 0 {
            self.warn(CompileWarning::StrippedCharacters {
                origin: origin.clone(),
                count: decoded.stripped,
            })?;
        }
        if let Some(nibble) = decoded.dropped_nibble {
            self.warn(CompileWarning::TruncatedNibble { origin, nibble })?;
        }
        Ok(())
    }

    fn warn(&mut self, warning: CompileWarning) -> FrameResult<()> {
        warn!("{warning}");
        if self.options.strict {
            return Err(FrameError::Degraded(warning));
        }
        self.warnings.push(warning);
        Ok(())
    }
}
