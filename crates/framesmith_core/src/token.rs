//! Token definitions and the token table.
//!
//! A token is a named, typed unit that produces bytes at compile time.
//! Tokens live in a [`TokenTable`] keyed by id; segments only hold
//! references, so editing a token's configuration affects every place it
//! is used.

use crate::checksum::ChecksumAlgorithm;
use crate::segment::{Segment, Template, TokenId};
use crate::types::ByteOrder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named, configurable byte-producing unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token id. When loaded from a table, the table key takes precedence.
    #[serde(default, skip_serializing_if = "TokenId::is_empty")]
    pub id: TokenId,
    /// Display name shown in the editor.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Kind and configuration.
    #[serde(flatten)]
    pub kind: TokenKind,
}

impl Token {
    /// Creates a token.
    pub fn new(id: impl Into<TokenId>, kind: TokenKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Creates a checksum token.
    pub fn checksum(id: impl Into<TokenId>, config: ChecksumConfig) -> Self {
        Self::new(id, TokenKind::Checksum(config))
    }

    /// Creates a flag token.
    pub fn flag(id: impl Into<TokenId>, hex: impl Into<String>) -> Self {
        Self::new(id, TokenKind::Flag(FlagConfig { hex: hex.into() }))
    }

    /// Creates a timestamp token.
    pub fn timestamp(id: impl Into<TokenId>, config: TimestampConfig) -> Self {
        Self::new(id, TokenKind::Timestamp(config))
    }

    /// Creates an auto-increment token.
    pub fn auto_increment(id: impl Into<TokenId>, config: AutoIncrementConfig) -> Self {
        Self::new(id, TokenKind::AutoIncrement(config))
    }

    /// Creates a hex container token owning nested segments.
    ///
    /// Adjacent literal children are merged, as in a top-level [`Template`].
    pub fn hex_container(id: impl Into<TokenId>, segments: Vec<Segment>) -> Self {
        Self::new(
            id,
            TokenKind::Hex {
                segments: Template::from_segments(segments),
            },
        )
    }
}

/// The kind of a token together with its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TokenKind {
    /// Checksum over a sub-range of the bytes assembled so far.
    Checksum(ChecksumConfig),
    /// Fixed byte sequence.
    Flag(FlagConfig),
    /// Current wall-clock time.
    Timestamp(TimestampConfig),
    /// Counter that advances on every compile.
    AutoIncrement(AutoIncrementConfig),
    /// Container whose child segments are compiled in place.
    Hex {
        /// Nested segments.
        #[serde(default)]
        segments: Template,
    },
    /// A kind this version does not know. Contributes no bytes.
    #[serde(other)]
    Unknown,
}

impl TokenKind {
    /// Short name of the kind, as used in the `type` tag.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Checksum(_) => "checksum",
            Self::Flag(_) => "flag",
            Self::Timestamp(_) => "timestamp",
            Self::AutoIncrement(_) => "autoIncrement",
            Self::Hex { .. } => "hex",
            Self::Unknown => "unknown",
        }
    }
}

/// Configuration of a checksum token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecksumConfig {
    /// Algorithm name, parsed into a [`ChecksumAlgorithm`] at compile time.
    pub algorithm: String,
    /// Absolute offset of the first checked byte.
    #[serde(default)]
    pub start_index: usize,
    /// End of the checked region relative to the current buffer end.
    ///
    /// `0` (or any non-negative value) checks up to the current end;
    /// `-k` stops `k` bytes before it and splices the checksum there.
    #[serde(default)]
    pub end_index: i64,
    /// Overrides the algorithm's natural byte order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_order: Option<ByteOrder>,
}

impl ChecksumConfig {
    /// Creates a checksum over the whole buffer assembled so far.
    pub fn new(algorithm: ChecksumAlgorithm) -> Self {
        Self {
            algorithm: algorithm.name().to_string(),
            start_index: 0,
            end_index: 0,
            byte_order: None,
        }
    }

    /// Sets the absolute start offset.
    #[must_use]
    pub const fn with_start(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    /// Sets the relative end offset.
    #[must_use]
    pub const fn with_end(mut self, end_index: i64) -> Self {
        self.end_index = end_index;
        self
    }

    /// Overrides the byte order of the emitted checksum.
    #[must_use]
    pub const fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = Some(order);
        self
    }
}

/// Configuration of a flag token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagConfig {
    /// The bytes to insert, as hex text.
    pub hex: String,
}

/// Resolution of a timestamp token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// Unix seconds as a 4-byte integer.
    #[default]
    Seconds,
    /// Unix milliseconds as an 8-byte integer.
    Milliseconds,
}

impl TimestampFormat {
    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::Seconds => 4,
            Self::Milliseconds => 8,
        }
    }
}

/// Configuration of a timestamp token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampConfig {
    /// Seconds or milliseconds.
    #[serde(default)]
    pub format: TimestampFormat,
    /// Byte order of the encoded integer.
    #[serde(default)]
    pub byte_order: ByteOrder,
}

impl TimestampConfig {
    /// Creates a timestamp configuration.
    pub const fn new(format: TimestampFormat, byte_order: ByteOrder) -> Self {
        Self { format, byte_order }
    }
}

/// Configuration of an auto-increment token.
///
/// The configured values seed the counter. The live value is kept in a
/// [`CounterStore`](crate::counter::CounterStore) owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoIncrementConfig {
    /// Counter width in bytes.
    pub bytes: usize,
    /// Starting value as hex text; falls back to `default_value` when unset or blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
    /// Value used when no current value is configured, and on reset.
    #[serde(default)]
    pub default_value: String,
    /// Amount added after each emission.
    #[serde(default = "default_step")]
    pub step: u64,
}

fn default_step() -> u64 {
    1
}

impl AutoIncrementConfig {
    /// Creates a counter of `bytes` width starting at zero with step 1.
    pub fn new(bytes: usize) -> Self {
        Self {
            bytes,
            current_value: None,
            default_value: String::new(),
            step: default_step(),
        }
    }

    /// Sets the starting value.
    #[must_use]
    pub fn with_current(mut self, hex: impl Into<String>) -> Self {
        self.current_value = Some(hex.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, hex: impl Into<String>) -> Self {
        self.default_value = hex.into();
        self
    }

    /// Sets the step.
    #[must_use]
    pub const fn with_step(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    /// Returns the configured seed text: the current value if set, else the default.
    pub fn seed(&self) -> &str {
        match self.current_value.as_deref() {
            Some(value) if !value.trim().is_empty() => value,
            _ => &self.default_value,
        }
    }
}

/// Token definitions keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<TokenId, Token>", into = "BTreeMap<TokenId, Token>")]
pub struct TokenTable {
    tokens: BTreeMap<TokenId, Token>,
}

impl TokenTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a token under its own id, returning the previous definition.
    pub fn insert(&mut self, token: Token) -> Option<Token> {
        self.tokens.insert(token.id.clone(), token)
    }

    /// Looks up a token.
    pub fn get(&self, id: &TokenId) -> Option<&Token> {
        self.tokens.get(id)
    }

    /// Looks up a token for editing.
    pub fn get_mut(&mut self, id: &TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(id)
    }

    /// Removes a token.
    pub fn remove(&mut self, id: &TokenId) -> Option<Token> {
        self.tokens.remove(id)
    }

    /// Returns true if the table defines `id`.
    pub fn contains(&self, id: &TokenId) -> bool {
        self.tokens.contains_key(id)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over tokens in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }
}

impl From<BTreeMap<TokenId, Token>> for TokenTable {
    fn from(map: BTreeMap<TokenId, Token>) -> Self {
        let tokens = map
            .into_iter()
            .map(|(key, mut token)| {
                token.id = key.clone();
                (key, token)
            })
            .collect();
        Self { tokens }
    }
}

impl From<TokenTable> for BTreeMap<TokenId, Token> {
    fn from(table: TokenTable) -> Self {
        table.tokens
    }
}

impl FromIterator<Token> for TokenTable {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut table = Self::new();
        for token in iter {
            table.insert(token);
        }
        table
    }
}
