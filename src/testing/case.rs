//! Test case naming conventions
//!
//! A test case is identified by a base path such as `tests/debugger/do_step`.
//! Everything else is derived from it by name:
//!
//! - `<name>.js` is the script the server runs
//! - `<name>.cmd` is the command file piped into the client
//! - `<name>.expected` is the golden client output
//!
//! Substrings of the name select special modes:
//!
//! - `client_source`: the server waits for the client to send the source
//! - `client_source_multiple`: the client sends `<name>_2.js` then `<name>_1.js`
//! - `restart`: the client runs a second time with the command file of the
//!   matching `continue` case

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const CLIENT_SOURCE: &str = "client_source";
const CLIENT_SOURCE_MULTIPLE: &str = "client_source_multiple";
const RESTART: &str = "restart";
const CONTINUE: &str = "continue";

/// A debugger test case and the files derived from its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    name: String,
}

impl TestCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The base name as given on the command line
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the client supplies the source to the server
    pub fn is_client_source(&self) -> bool {
        self.name.contains(CLIENT_SOURCE)
    }

    /// Whether the client supplies more than one source file
    pub fn is_client_source_multiple(&self) -> bool {
        self.name.contains(CLIENT_SOURCE_MULTIPLE)
    }

    /// Whether the test restarts the engine and needs a follow-up client run
    pub fn is_restart(&self) -> bool {
        self.name.contains(RESTART)
    }

    /// Command line for the debug server
    pub fn server_command(&self, jerry: &Path, channel: &str) -> Vec<OsString> {
        let mut argv = vec![jerry.as_os_str().to_os_string()];
        if self.is_client_source() {
            argv.extend(
                [
                    "--start-debug-server",
                    "--debug-channel",
                    channel,
                    "--debugger-wait-source",
                ]
                .map(OsString::from),
            );
        } else {
            argv.push(self.with_suffix(".js").into());
            argv.extend(["--start-debug-server", "--debug-channel", channel].map(OsString::from));
        }
        argv
    }

    /// Extra arguments appended to the debug client command line
    pub fn client_extra_args(&self) -> Vec<String> {
        if !self.is_client_source() {
            return Vec::new();
        }

        let mut args = vec!["--client-source".to_string()];
        if self.is_client_source_multiple() {
            args.push(self.with_suffix("_2.js"));
            args.push(self.with_suffix("_1.js"));
        } else {
            args.push(self.with_suffix(".js"));
        }
        args
    }

    /// Command files fed to the client, one client run per file
    pub fn command_files(&self) -> Vec<PathBuf> {
        let mut files = vec![PathBuf::from(self.with_suffix(".cmd"))];
        if let Some(continue_case) = self.continue_case() {
            files.push(PathBuf::from(continue_case.with_suffix(".cmd")));
        }
        files
    }

    /// The `continue` counterpart of a `restart` case
    pub fn continue_case(&self) -> Option<TestCase> {
        self.is_restart()
            .then(|| TestCase::new(self.name.replace(RESTART, CONTINUE)))
    }

    /// Golden output file
    pub fn expected_file(&self) -> PathBuf {
        PathBuf::from(self.with_suffix(".expected"))
    }

    /// Prefix for the captured output temp file
    pub fn output_prefix(&self) -> String {
        Path::new(&self.name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }

    fn with_suffix(&self, suffix: &str) -> String {
        format!("{}{}", self.name, suffix)
    }
}
