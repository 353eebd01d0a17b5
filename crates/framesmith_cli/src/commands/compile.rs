//! Compile command implementation.

use crate::error::CliError;
use framesmith_codec::bytes_to_hex;
use framesmith_core::{CompileOptions, CounterStore, FrameCompiler, Mode, Project};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments of the compile command.
#[derive(Debug, Clone)]
pub struct CompileArgs {
    /// Project file.
    pub project: PathBuf,
    /// Output mode.
    pub mode: Mode,
    /// Counter state file.
    pub state: Option<PathBuf>,
    /// Reset counters to their default values before compiling.
    pub reset: bool,
    /// Fail on any warning.
    pub strict: bool,
    /// File receiving the compiled bytes.
    pub output: Option<PathBuf>,
}

/// Result of compiling a project.
#[derive(Debug, Serialize)]
pub struct CompileReport {
    /// Project path.
    pub project: String,
    /// Output mode.
    pub mode: Mode,
    /// Length of the binary frame in bytes.
    pub length: usize,
    /// The binary frame as spaced hex.
    pub frame: String,
    /// Checksums placed in the frame.
    pub checksums: Vec<ChecksumSummary>,
    /// Warnings raised while compiling.
    pub warnings: Vec<String>,
    /// Counter state after compiling.
    pub counters: CounterStore,
}

/// One placed checksum.
#[derive(Debug, Serialize)]
pub struct ChecksumSummary {
    /// Checksum token id.
    pub token: String,
    /// Algorithm name.
    pub algorithm: String,
    /// First checked byte.
    pub start: usize,
    /// End of the checked region (exclusive).
    pub end: usize,
    /// Insertion offset.
    pub offset: usize,
    /// Checksum bytes as hex.
    pub value: String,
}

/// Runs the compile command.
pub fn run(args: &CompileArgs, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let report = execute(args)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print_text_output(&report);
        }
    }

    Ok(())
}

/// Compiles the project, persisting counters and output as requested.
pub fn execute(args: &CompileArgs) -> Result<CompileReport, Box<dyn std::error::Error>> {
    let project = load_project(&args.project)?;

    let mut counters = match &args.state {
        Some(path) => load_state(path)?,
        None => CounterStore::new(),
    };
    if args.reset {
        info!("Resetting counters");
        counters.reset_all(&project.tokens);
    }

    let options = CompileOptions::new().mode(args.mode).strict(args.strict);
    let output = project.compile(&FrameCompiler::new(options), &counters)?;

    // Counters are only committed once the frame has been delivered.
    if let Some(path) = &args.output {
        fs::write(path, &output.bytes).map_err(|e| CliError::io(path, e))?;
        info!("Wrote {} byte(s) to {:?}", output.bytes.len(), path);
    }
    if let Some(path) = &args.state {
        save_state(path, &output.counters)?;
    }

    let checksums = output
        .checksums
        .iter()
        .map(|record| ChecksumSummary {
            token: record.token_id.to_string(),
            algorithm: record.algorithm.to_string(),
            start: record.range.start,
            end: record.range.end,
            offset: record.offset,
            value: bytes_to_hex(&record.value),
        })
        .collect();

    Ok(CompileReport {
        project: args.project.display().to_string(),
        mode: args.mode,
        length: output.raw.len(),
        frame: output.to_ascii_hex(),
        checksums,
        warnings: output.warnings.iter().map(ToString::to_string).collect(),
        counters: output.counters,
    })
}

/// Reads a project file.
pub fn load_project(path: &Path) -> Result<Project, CliError> {
    info!("Compiling {:?}", path);
    let json = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    serde_json::from_str(&json).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        what: "project",
        source,
    })
}

/// Reads a counter state file. A missing file is an empty store.
pub fn load_state(path: &Path) -> Result<CounterStore, CliError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No counter state at {:?}, starting fresh", path);
            return Ok(CounterStore::new());
        }
        Err(e) => return Err(CliError::io(path, e)),
    };
    serde_json::from_str(&json).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        what: "counter state",
        source,
    })
}

/// Writes a counter state file.
pub fn save_state(path: &Path, counters: &CounterStore) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(counters).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        what: "counter state",
        source,
    })?;
    fs::write(path, json).map_err(|e| CliError::io(path, e))?;
    debug!("Saved {} counter(s) to {:?}", counters.len(), path);
    Ok(())
}

fn print_text_output(report: &CompileReport) {
    println!("Frame ({} bytes, {} mode):", report.length, report.mode);
    println!("  {}", report.frame);

    if !report.checksums.is_empty() {
        println!();
        println!("Checksums:");
        for c in &report.checksums {
            println!(
                "  {:<12} {:<14} bytes {}..{} at {}  {}",
                c.token, c.algorithm, c.start, c.end, c.offset, c.value
            );
        }
    }

    if !report.counters.is_empty() {
        println!();
        println!("Counters:");
        for (id, value) in report.counters.iter() {
            println!("  {:<12} {}", id.to_string(), bytes_to_hex(value));
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  ! {}", warning);
        }
    }
}
