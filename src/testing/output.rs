//! Captured client output
//!
//! The captured output lives in a named temp file so the diff tool can
//! read it. A passing run removes it; a failing run keeps it around for
//! inspection.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::common::{Error, Result};

pub struct CapturedOutput {
    file: NamedTempFile,
}

impl CapturedOutput {
    /// Create an empty capture file in the system temp directory
    pub fn create(prefix: &str) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix("out")
            .tempfile()?;
        tracing::debug!(path = %file.path().display(), "Created output capture file");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Append captured text and flush it to disk
    pub fn append(&mut self, text: &str) -> Result<()> {
        self.file.write_all(text.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }

    /// Remove the capture file
    pub fn dispose(self) -> Result<()> {
        let path = self.path().to_path_buf();
        self.file.close()?;
        tracing::debug!(path = %path.display(), "Removed output capture file");
        Ok(())
    }

    /// Keep the capture file on disk and return its path
    pub fn keep(self) -> Result<PathBuf> {
        let (_, path) = self
            .file
            .keep()
            .map_err(|e| Error::Io(e.error))?;
        Ok(path)
    }
}
