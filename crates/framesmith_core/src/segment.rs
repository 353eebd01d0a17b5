//! Segment model: the ordered contents of a frame template.
//!
//! A template is a flat list of [`Segment`]s. Literal segments carry hex
//! text typed by the user; token segments reference a [`Token`] by id in a
//! separate [`TokenTable`], so one token definition can be placed several
//! times and edited in one place.
//!
//! [`Token`]: crate::token::Token
//! [`TokenTable`]: crate::token::TokenTable

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use uuid::Uuid;

/// Opaque identifier of a segment, stable across edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(String);

impl SegmentId {
    /// Creates a segment id from an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh random segment id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a token definition in a token table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Creates a token id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TokenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One ordered element of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment identifier.
    pub id: SegmentId,
    /// What the segment contributes to the frame.
    #[serde(flatten)]
    pub kind: SegmentKind,
}

/// The content of a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SegmentKind {
    /// Raw characters, decoded as hex at compile time.
    Literal {
        /// The literal text.
        content: String,
    },
    /// Reference to a token definition.
    Token {
        /// Id of the referenced token.
        #[serde(rename = "tokenId")]
        token_id: TokenId,
    },
}

impl Segment {
    /// Creates a literal segment with a generated id.
    pub fn literal(content: impl Into<String>) -> Self {
        Self {
            id: SegmentId::generate(),
            kind: SegmentKind::Literal {
                content: content.into(),
            },
        }
    }

    /// Creates a token reference segment with a generated id.
    pub fn token(token_id: impl Into<TokenId>) -> Self {
        Self {
            id: SegmentId::generate(),
            kind: SegmentKind::Token {
                token_id: token_id.into(),
            },
        }
    }

    /// Replaces the segment id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = SegmentId::new(id);
        self
    }

    /// Returns the literal text, if this is a literal segment.
    pub fn as_literal(&self) -> Option<&str> {
        match &self.kind {
            SegmentKind::Literal { content } => Some(content),
            SegmentKind::Token { .. } => None,
        }
    }

    /// Returns the referenced token id, if this is a token segment.
    pub fn token_id(&self) -> Option<&TokenId> {
        match &self.kind {
            SegmentKind::Token { token_id } => Some(token_id),
            SegmentKind::Literal { .. } => None,
        }
    }
}

/// An ordered list of segments with literal runs kept whole.
///
/// Adjacent literal segments are merged on construction, so a contiguous
/// run of literal text is never split across two segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Creates an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a template from segments, merging adjacent literals.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments: normalize(segments),
        }
    }

    /// Appends literal text, extending the last segment if it is a literal.
    pub fn push_literal(&mut self, content: impl AsRef<str>) -> &mut Self {
        let content = content.as_ref();
        if !self.extend_trailing_literal(content) {
            self.segments.push(Segment::literal(content));
        }
        self
    }

    /// Appends a reference to a token.
    pub fn push_token(&mut self, token_id: impl Into<TokenId>) -> &mut Self {
        self.segments.push(Segment::token(token_id));
        self
    }

    /// Appends an arbitrary segment, merging it into a trailing literal if both are literals.
    pub fn push(&mut self, segment: Segment) -> &mut Self {
        if let SegmentKind::Literal { content } = &segment.kind {
            if self.extend_trailing_literal(content) {
                return self;
            }
        }
        self.segments.push(segment);
        self
    }

    fn extend_trailing_literal(&mut self, content: &str) -> bool {
        match self.segments.last_mut().map(|s| &mut s.kind) {
            Some(SegmentKind::Literal { content: last }) => {
                last.push_str(content);
                true
            }
            _ => false,
        }
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consumes the template and returns its segments.
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Returns the ids of every token referenced at the top level.
    pub fn token_ids(&self) -> impl Iterator<Item = &TokenId> {
        self.segments.iter().filter_map(Segment::token_id)
    }
}

impl Deref for Template {
    type Target = [Segment];

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

impl From<Vec<Segment>> for Template {
    fn from(segments: Vec<Segment>) -> Self {
        Self::from_segments(segments)
    }
}

impl From<Template> for Vec<Segment> {
    fn from(template: Template) -> Self {
        template.segments
    }
}

impl FromIterator<Segment> for Template {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        let mut template = Self::new();
        for segment in iter {
            template.push(segment);
        }
        template
    }
}

/// Merges adjacent literal segments, keeping the id of the first one in each run.
pub fn normalize(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if let (SegmentKind::Literal { content }, Some(last)) = (&segment.kind, out.last_mut()) {
            if let SegmentKind::Literal { content: prev } = &mut last.kind {
                prev.push_str(content);
                continue;
            }
        }
        out.push(segment);
    }
    out
}
