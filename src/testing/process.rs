//! Subprocess helpers
//!
//! Child output is spooled to an anonymous temp file that serves as both
//! stdout and stderr, so the two streams keep their interleaving the way
//! a terminal would show them.

use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};

use crate::common::{Error, Result};

/// Join a command line for display
pub fn format_command<S: AsRef<OsStr>>(argv: &[S]) -> String {
    argv.iter()
        .map(|a| a.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode child output as UTF-8, dropping invalid byte sequences
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// A spool file for merged stdout/stderr
struct Spool {
    file: File,
}

impl Spool {
    fn new() -> Result<Self> {
        Ok(Self {
            file: tempfile::tempfile()?,
        })
    }

    /// Stdout and stderr handles that share the spool
    fn stdio_pair(&self) -> Result<(Stdio, Stdio)> {
        Ok((
            Stdio::from(self.file.try_clone()?),
            Stdio::from(self.file.try_clone()?),
        ))
    }

    fn read_all(mut self) -> Result<String> {
        self.file.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        self.file.read_to_end(&mut bytes)?;
        Ok(decode_lossy(&bytes))
    }
}

fn command_for(argv: &[OsString]) -> Result<Command> {
    let (program, args) = argv.split_first().ok_or(Error::EmptyCommand)?;
    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}

/// Merged output and exit status of a finished process
#[derive(Debug)]
pub struct ProcessOutput {
    pub text: String,
    pub status: ExitStatus,
}

/// Run a command to completion and return its merged output
///
/// A non-zero exit status is not an error; the output is returned either
/// way. Only failing to start the process is.
pub async fn check_output(argv: &[OsString], stdin: Option<File>) -> Result<ProcessOutput> {
    let spool = Spool::new()?;
    let (stdout, stderr) = spool.stdio_pair()?;

    let mut cmd = command_for(argv)?;
    cmd.stdin(stdin.map(Stdio::from).unwrap_or_else(Stdio::null))
        .stdout(stdout)
        .stderr(stderr);

    let status = cmd
        .status()
        .await
        .map_err(|e| Error::spawn(&argv[0], e))?;
    log_exit(argv, status);

    Ok(ProcessOutput {
        text: spool.read_all()?,
        status,
    })
}

fn log_exit(argv: &[OsString], status: ExitStatus) {
    if status.success() {
        tracing::debug!(command = %format_command(argv), "Process exited successfully");
    } else {
        tracing::debug!(command = %format_command(argv), %status, "Process exited with failure");
    }
}

/// A running debug server
///
/// Its stdin is a pipe that stays open for the lifetime of the process.
pub struct DebugServer {
    child: Child,
    argv: Vec<OsString>,
    spool: Spool,
}

impl DebugServer {
    /// Start the server in the background
    pub fn spawn(argv: Vec<OsString>) -> Result<Self> {
        let spool = Spool::new()?;
        let (stdout, stderr) = spool.stdio_pair()?;

        let child = command_for(&argv)?
            .stdin(Stdio::piped())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|e| Error::spawn(&argv[0], e))?;

        tracing::debug!(pid = ?child.id(), command = %format_command(&argv), "Debug server started");

        Ok(Self { child, argv, spool })
    }

    /// Wait for the server to exit and return everything it printed
    pub async fn finish(mut self) -> Result<String> {
        match self.child.wait().await {
            Ok(status) => log_exit(&self.argv, status),
            Err(e) => {
                tracing::warn!("Failed to wait for debug server: {}", e);
                if let Err(e) = self.child.kill().await {
                    tracing::warn!("Failed to kill debug server: {}", e);
                }
            }
        }
        self.spool.read_all()
    }

    /// Kill the server and return everything it printed
    pub async fn abort(mut self) -> Result<String> {
        if let Err(e) = self.child.kill().await {
            tracing::warn!("Failed to kill debug server: {}", e);
        }
        self.spool.read_all()
    }
}
