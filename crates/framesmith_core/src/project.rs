//! A template bundled with its token table.

use crate::compiler::{CompileOutput, FrameCompiler};
use crate::counter::CounterStore;
use crate::error::FrameResult;
use crate::segment::Template;
use crate::token::TokenTable;
use serde::{Deserialize, Serialize};

/// A saved command: the segments to compile and the tokens they reference.
///
/// ```json
/// {
///   "segments": [
///     { "id": "s1", "kind": "literal", "content": "01 03 00 00 00 0A" },
///     { "id": "s2", "kind": "token", "tokenId": "crc" }
///   ],
///   "tokens": {
///     "crc": { "type": "checksum", "algorithm": "crc16-modbus" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// The template.
    #[serde(default)]
    pub segments: Template,
    /// Token definitions referenced by the template.
    #[serde(default)]
    pub tokens: TokenTable,
}

impl Project {
    /// Creates a project.
    pub fn new(segments: Template, tokens: TokenTable) -> Self {
        Self { segments, tokens }
    }

    /// Compiles the project's template.
    ///
    /// # Errors
    ///
    /// See [`FrameCompiler::compile`].
    pub fn compile(
        &self,
        compiler: &FrameCompiler,
        counters: &CounterStore,
    ) -> FrameResult<CompileOutput> {
        compiler.compile(&self.segments, &self.tokens, counters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompileOptions;
    use crate::types::Mode;

    #[test]
    fn parse_and_compile() {
        let project: Project = serde_json::from_str(
            r#"{
                "segments": [
                    { "id": "s1", "kind": "literal", "content": "01 03 00 00 00 01" },
                    { "id": "s2", "kind": "token", "tokenId": "crc" }
                ],
                "tokens": { "crc": { "type": "checksum", "algorithm": "crc16-modbus" } }
            }"#,
        )
        .unwrap();

        let compiler = FrameCompiler::new(CompileOptions::new().mode(Mode::Hex));
        let output = project.compile(&compiler, &CounterStore::new()).unwrap();
        assert_eq!(output.bytes, vec![0x01, 0x03, 0x00, 0x00, 0x00, 0x01, 0x84, 0x0A]);
    }

    #[test]
    fn empty_project() {
        let project: Project = serde_json::from_str("{}").unwrap();
        assert!(project.segments.is_empty());
        assert!(project.tokens.is_empty());
    }
}
