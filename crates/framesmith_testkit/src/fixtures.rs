//! Test fixtures and project helpers.
//!
//! Provides sample projects, compilers pinned to a fixed clock and
//! project files written to temporary directories.

use framesmith_core::{
    AutoIncrementConfig, ChecksumAlgorithm, ChecksumConfig, CompileOptions, CounterStore,
    FixedClock, FrameCompiler, Mode, Project, Segment, Template, Token, TokenTable,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Wall-clock time seen by fixture compilers: 2023-11-14T22:13:20Z.
pub const FIXED_CLOCK_MILLIS: u64 = 1_700_000_000_000;

/// Creates a compiler for `mode` whose timestamps read [`FIXED_CLOCK_MILLIS`].
pub fn fixed_compiler(mode: Mode) -> FrameCompiler {
    FrameCompiler::new(CompileOptions::new().mode(mode))
        .with_clock(FixedClock::from_millis(FIXED_CLOCK_MILLIS))
}

/// Like [`fixed_compiler`], but any warning fails the compile.
pub fn strict_compiler(mode: Mode) -> FrameCompiler {
    FrameCompiler::new(CompileOptions::new().mode(mode).strict(true))
        .with_clock(FixedClock::from_millis(FIXED_CLOCK_MILLIS))
}

/// Modbus RTU "read 10 holding registers from slave 1".
///
/// Compiles to `01 03 00 00 00 0A C5 CD`.
pub fn modbus_read_project() -> Project {
    let template = Template::from_segments(vec![
        Segment::literal("01 03 00 00 00 0A").with_id("payload"),
        Segment::token("crc").with_id("crc-ref"),
    ]);
    let tokens: TokenTable = [Token::checksum(
        "crc",
        ChecksumConfig::new(ChecksumAlgorithm::Crc16Modbus),
    )
    .with_name("Modbus CRC")]
    .into_iter()
    .collect();
    Project::new(template, tokens)
}

/// A framed telemetry packet: `7E <seq> 10 20 <crc> 0D`.
///
/// The one-byte sequence counter starts at `FE`, so a handful of sends
/// walks it through the wrap. The CCITT checksum skips the leading flag
/// and is spliced in ahead of the trailing `0D`.
pub fn sequenced_project() -> Project {
    let template = Template::from_segments(vec![
        Segment::token("sof").with_id("s1"),
        Segment::token("seq").with_id("s2"),
        Segment::literal("10 20 0D").with_id("s3"),
        Segment::token("crc").with_id("s4"),
    ]);
    let tokens: TokenTable = [
        Token::flag("sof", "7E"),
        Token::auto_increment("seq", AutoIncrementConfig::new(1).with_current("FE")),
        Token::checksum(
            "crc",
            ChecksumConfig::new(ChecksumAlgorithm::Crc16Ccitt)
                .with_start(1)
                .with_end(-1),
        ),
    ]
    .into_iter()
    .collect();
    Project::new(template, tokens)
}

/// A project file and its counter state file in a temporary directory.
pub struct TempProject {
    dir: TempDir,
    project_path: PathBuf,
    state_path: PathBuf,
}

impl TempProject {
    /// Writes `project` as `project.json` in a fresh temporary directory.
    ///
    /// No state file is created.
    pub fn new(project: &Project) -> Self {
        let json = serde_json::to_string_pretty(project).expect("Failed to serialize project");
        Self::from_json(&json)
    }

    /// Writes raw JSON as the project file.
    pub fn from_json(json: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let project_path = dir.path().join("project.json");
        let state_path = dir.path().join("counters.json");
        fs::write(&project_path, json).expect("Failed to write project file");
        Self {
            dir,
            project_path,
            state_path,
        }
    }

    /// Returns the temporary directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the project file path.
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Returns the counter state file path. The file may not exist yet.
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Reads the counter state file, if present.
    pub fn read_state(&self) -> Option<CounterStore> {
        let json = fs::read_to_string(&self.state_path).ok()?;
        Some(serde_json::from_str(&json).expect("Corrupt counter state file"))
    }

    /// Overwrites the counter state file.
    pub fn write_state(&self, counters: &CounterStore) {
        let json = serde_json::to_string_pretty(counters).expect("Failed to serialize counters");
        fs::write(&self.state_path, json).expect("Failed to write counter state");
    }
}

/// Runs `f` with a temporary copy of `project` on disk.
pub fn with_temp_project<F, R>(project: &Project, f: F) -> R
where
    F: FnOnce(&TempProject) -> R,
{
    let temp = TempProject::new(project);
    f(&temp)
}
