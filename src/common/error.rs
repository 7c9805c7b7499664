//! Error types for the debugger test runner
//!
//! Only infrastructure problems are errors. A debug client that exits with
//! a failure status is not one: its output is captured and compared like
//! any other.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the test runner
#[derive(Error, Debug)]
pub enum Error {
    // === Process Errors ===
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Required tool '{name}' not found in PATH")]
    ToolNotFound { name: String },

    #[error("Empty command line")]
    EmptyCommand,

    // === Argument Errors ===
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create a spawn error for the given program
    pub fn spawn<S: AsRef<std::ffi::OsStr>>(program: S, source: io::Error) -> Self {
        Self::Spawn {
            program: program.as_ref().to_string_lossy().into_owned(),
            source,
        }
    }

    /// Create a file read error
    pub fn file_read(path: &std::path::Path, error: io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_error_names_program() {
        let err = Error::spawn("jerry", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("Failed to spawn 'jerry'"));
    }

    #[test]
    fn test_file_read_error_message() {
        let err = Error::file_read(
            std::path::Path::new("case.cmd"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(err.to_string().contains("case.cmd"));
    }
}
