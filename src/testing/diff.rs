//! Output comparison through `git diff --no-index`
//!
//! A run passes when git reports no change hunks. git errors, such as a
//! missing expected file (status 1, no hunks), count as a failure.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::common::Result;

use super::process::{check_output, format_command};

/// Marker git prints at the start of every change hunk
const HUNK_MARKER: &str = "@@";

/// Whether diff output contains at least one change hunk
pub fn has_change_hunks(diff: &str) -> bool {
    diff.contains(HUNK_MARKER)
}

/// Result of comparing expected and actual output
#[derive(Debug)]
pub struct DiffReport {
    /// Command line that produced the diff
    pub command: String,
    /// Diff text, including any error git printed
    pub output: String,
    /// Exit code of the diff tool, if it exited normally
    pub exit_code: Option<i32>,
}

impl DiffReport {
    /// Whether the compared files differ
    ///
    /// A diff tool error such as a missing expected file counts as a
    /// difference too.
    pub fn differs(&self) -> bool {
        has_change_hunks(&self.output) || self.is_tool_error()
    }

    /// git exits with 0 (same) or 1 (different), and reports problems
    /// such as unreadable files on `error:`/`fatal:` lines
    fn is_tool_error(&self) -> bool {
        !matches!(self.exit_code, Some(0) | Some(1))
            || self
                .output
                .lines()
                .any(|line| line.starts_with("error: ") || line.starts_with("fatal: "))
    }
}

/// The external diff tool
#[derive(Debug, Clone)]
pub struct DiffTool {
    git: PathBuf,
}

impl DiffTool {
    pub fn git(program: impl Into<PathBuf>) -> Self {
        Self {
            git: program.into(),
        }
    }

    /// Command line comparing `expected` against `actual`
    ///
    /// Trailing whitespace differences are ignored so CRLF line endings in
    /// client output do not fail a test.
    pub fn command(&self, expected: &Path, actual: &Path) -> Vec<OsString> {
        vec![
            self.git.clone().into_os_string(),
            "--no-pager".into(),
            "diff".into(),
            "--ignore-space-at-eol".into(),
            "--no-index".into(),
            expected.as_os_str().to_os_string(),
            actual.as_os_str().to_os_string(),
        ]
    }

    pub async fn compare(&self, expected: &Path, actual: &Path) -> Result<DiffReport> {
        let argv = self.command(expected, actual);
        let result = check_output(&argv, None).await?;
        let report = DiffReport {
            command: format_command(&argv),
            output: result.text,
            exit_code: result.status.code(),
        };
        tracing::debug!(exit_code = ?report.exit_code, differs = report.differs(), "Diff finished");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(output: &str, exit_code: Option<i32>) -> DiffReport {
        DiffReport {
            command: String::new(),
            output: output.to_string(),
            exit_code,
        }
    }

    fn git_available() -> bool {
        which::which("git").is_ok()
    }

    #[test]
    fn test_hunk_detection() {
        assert!(has_change_hunks("--- a\n+++ b\n@@ -1 +1 @@\n-x\n+y\n"));
        assert!(!has_change_hunks(""));
        assert!(!has_change_hunks("diff --git a/x b/x\nold mode 100644\n"));
    }

    #[test]
    fn test_report_same_and_different() {
        assert!(!report("", Some(0)).differs());
        assert!(report("@@ -1 +1 @@\n", Some(1)).differs());
    }

    #[test]
    fn test_header_without_hunks_is_not_a_difference() {
        // --ignore-space-at-eol can leave a header with no hunks behind
        assert!(!report("diff --git a/x b/x\n", Some(1)).differs());
    }

    #[test]
    fn test_tool_error_is_a_difference() {
        assert!(report("error: Could not access 'case.expected'\n", Some(1)).differs());
        assert!(report("fatal: bad revision\n", Some(128)).differs());
        assert!(report("", None).differs());
    }

    #[test]
    fn test_command_line() {
        let tool = DiffTool::git("git");
        let argv = tool.command(Path::new("case.expected"), Path::new("/tmp/caseXYZout"));
        assert_eq!(
            format_command(&argv),
            "git --no-pager diff --ignore-space-at-eol --no-index case.expected /tmp/caseXYZout"
        );
    }

    #[tokio::test]
    async fn test_compare_with_git() {
        if !git_available() {
            eprintln!("Skipping test: git not found");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let expected = dir.path().join("case.expected");
        let same = dir.path().join("same.out");
        let different = dir.path().join("different.out");
        let crlf = dir.path().join("crlf.out");
        std::fs::write(&expected, "Stopped at case.js:1\nquit\n").unwrap();
        std::fs::write(&same, "Stopped at case.js:1\nquit\n").unwrap();
        std::fs::write(&different, "Stopped at case.js:2\nquit\n").unwrap();
        std::fs::write(&crlf, "Stopped at case.js:1\r\nquit\r\n").unwrap();

        let tool = DiffTool::git("git");
        assert!(!tool.compare(&expected, &same).await.unwrap().differs());
        assert!(!tool.compare(&expected, &crlf).await.unwrap().differs());

        let report = tool.compare(&expected, &different).await.unwrap();
        assert!(report.differs());
        assert!(report.output.contains("+Stopped at case.js:2"));

        let missing = dir.path().join("missing.expected");
        assert!(tool.compare(&missing, &same).await.unwrap().differs());
    }
}
