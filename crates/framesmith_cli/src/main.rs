//! framesmith CLI
//!
//! Command-line frame compiler.
//!
//! # Commands
//!
//! - `compile` - Compile a project file into a frame
//! - `checksum` - Compute a checksum over hex bytes
//! - `version` - Show version information

mod commands;
mod error;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Compile serial and network command frames from templates.
#[derive(Parser)]
#[command(name = "framesmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a project file into a frame
    Compile {
        /// Project file (JSON with "segments" and "tokens")
        project: PathBuf,

        /// Output mode (hex, text)
        #[arg(short, long, default_value = "hex")]
        mode: String,

        /// Counter state file, read before and written after compiling
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Reset every counter to its configured value before compiling
        #[arg(long)]
        reset: bool,

        /// Fail on any warning instead of producing a best-effort frame
        #[arg(long)]
        strict: bool,

        /// Write the compiled frame bytes to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Compute a checksum over hex bytes
    Checksum {
        /// Algorithm (crc16-modbus, crc16-ccitt, crc32)
        algorithm: String,

        /// Input bytes as hex; multiple arguments are concatenated
        #[arg(required = true, num_args = 1..)]
        hex: Vec<String>,

        /// Byte order of the printed checksum (big, little)
        #[arg(short, long)]
        byte_order: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile {
            project,
            mode,
            state,
            reset,
            strict,
            output,
            format,
        } => {
            let args = commands::compile::CompileArgs {
                project,
                mode: mode.parse()?,
                state,
                reset,
                strict,
                output,
            };
            commands::compile::run(&args, &format)?;
        }
        Commands::Checksum {
            algorithm,
            hex,
            byte_order,
        } => {
            commands::checksum::run(&algorithm, &hex, byte_order.as_deref())?;
        }
        Commands::Version => {
            println!("framesmith CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("framesmith core v{}", framesmith_core::VERSION);
        }
    }

    Ok(())
}
