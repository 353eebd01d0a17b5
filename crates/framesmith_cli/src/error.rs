//! CLI error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or writing the files the CLI works on.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// A project or state file is not valid JSON of the expected shape.
    #[error("{}: invalid {what}: {source}", .path.display())]
    Parse {
        /// The file.
        path: PathBuf,
        /// What the file was expected to hold.
        what: &'static str,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// An argument could not be interpreted.
    #[error("invalid {what}: {value:?}")]
    InvalidArgument {
        /// The argument.
        what: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
