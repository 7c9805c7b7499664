//! Debugger test runner
//!
//! Starts the debug server, drives the debug client with scripted command
//! files and compares what the client printed against a golden file.

mod case;
mod diff;
mod output;
mod process;
mod runner;

pub use case::TestCase;
pub use diff::{has_change_hunks, DiffReport, DiffTool};
pub use output::CapturedOutput;
pub use process::{check_output, decode_lossy, format_command, DebugServer, ProcessOutput};
pub use runner::{run_test, Outcome, TestRun};
