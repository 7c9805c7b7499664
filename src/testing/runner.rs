//! Test runner implementation
//!
//! Runs one debugger test case: start the debug server, feed the command
//! file(s) through the debug client, then diff the client's output against
//! the expected file.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;

use crate::common::{Error, Result};

use super::case::TestCase;
use super::diff::{DiffReport, DiffTool};
use super::output::CapturedOutput;
use super::process::{check_output, format_command, DebugServer};

/// Everything needed to run one test case
#[derive(Debug, Clone)]
pub struct TestRun {
    /// Debug server executable
    pub jerry: PathBuf,
    /// Debug channel, passed to both server and client
    pub channel: String,
    /// Debug client script
    pub client_script: PathBuf,
    /// Command prefix for running the client script
    pub interpreter: Vec<String>,
    /// Delay between starting the server and starting the client
    pub startup_delay: Duration,
    pub case: TestCase,
    pub diff: DiffTool,
}

impl TestRun {
    /// Debug client command line
    pub fn client_command(&self) -> Vec<OsString> {
        let mut argv: Vec<OsString> = self.interpreter.iter().map(OsString::from).collect();
        argv.push(self.client_script.clone().into_os_string());
        argv.extend(
            ["--channel", self.channel.as_str(), "--non-interactive"].map(OsString::from),
        );
        argv.extend(self.case.client_extra_args().into_iter().map(OsString::from));
        argv
    }
}

/// Result of a test run
#[derive(Debug)]
pub enum Outcome {
    Pass,
    /// The captured output was kept at the given path
    Fail { output: PathBuf },
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Pass => 0,
            Outcome::Fail { .. } => 1,
        }
    }
}

/// Run a debugger test case
pub async fn run_test(run: &TestRun) -> Result<Outcome> {
    let server_argv = run.case.server_command(&run.jerry, &run.channel);
    println!("run debug server: {}", format_command(&server_argv));
    let server = DebugServer::spawn(server_argv)?;

    // No readiness signal from the server, so give it time to listen
    tokio::time::sleep(run.startup_delay).await;

    let client_phase = match CapturedOutput::create(&run.case.output_prefix()) {
        Ok(mut captured) => match run_clients(run, &mut captured).await {
            Ok(report) => Ok((captured, report)),
            Err(e) => Err((Some(captured), e)),
        },
        Err(e) => Err((None, e)),
    };

    // A server that never saw a client would wait forever
    let server_output = match &client_phase {
        Ok(_) => server.finish().await?,
        Err(_) => server.abort().await?,
    };
    println!("jerry out:\n{}\nEOF", server_output);

    let (captured, report) = match client_phase {
        Ok(done) => done,
        Err((captured, e)) => {
            // Keep what the client printed before the error
            if let Some(captured) = captured {
                let output = captured.keep()?;
                println!("captured output kept at: {}", output.display());
            }
            return Err(e);
        }
    };
    println!("git diff cmd: {}", report.command);

    if report.differs() {
        println!("git diff result:\n{}\nEOF", report.output);
        let output = captured.keep()?;
        println!("captured output kept at: {}", output.display());
        println!("{}", format!("FAIL: {}", run.case.name()).red().bold());
        Ok(Outcome::Fail { output })
    } else {
        captured.dispose()?;
        println!("{}", format!("PASS: {}", run.case.name()).green().bold());
        Ok(Outcome::Pass)
    }
}

/// Run the client once per command file, then diff the collected output
async fn run_clients(run: &TestRun, captured: &mut CapturedOutput) -> Result<DiffReport> {
    let client_argv = run.client_command();
    println!("run debug client: {}", format_command(&client_argv));

    for cmd_file in run.case.command_files() {
        execute_debug_client(captured, &cmd_file, &client_argv).await?;
    }

    run.diff
        .compare(&run.case.expected_file(), captured.path())
        .await
}

/// Feed one command file to the debug client and capture what it prints
async fn execute_debug_client(
    captured: &mut CapturedOutput,
    cmd_file: &std::path::Path,
    client_argv: &[OsString],
) -> Result<()> {
    println!("input debug cmd: {}", cmd_file.display());
    let stdin = std::fs::File::open(cmd_file).map_err(|e| Error::file_read(cmd_file, e))?;
    let output = check_output(client_argv, Some(stdin)).await?;
    captured.append(&output.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_run(case: &str) -> TestRun {
        TestRun {
            jerry: PathBuf::from("build/bin/jerry"),
            channel: "websocket".to_string(),
            client_script: PathBuf::from("jerry-debugger/jerry_client.py"),
            interpreter: Vec::new(),
            startup_delay: Duration::ZERO,
            case: TestCase::new(case),
            diff: DiffTool::git("git"),
        }
    }

    #[test]
    fn test_client_command_plain() {
        let run = test_run("tests/debugger/do_step");
        assert_eq!(
            format_command(&run.client_command()),
            "jerry-debugger/jerry_client.py --channel websocket --non-interactive"
        );
    }

    #[test]
    fn test_client_command_with_interpreter_and_source() {
        let mut run = test_run("tests/debugger/client_source");
        run.interpreter = vec!["python".to_string()];
        assert_eq!(
            format_command(&run.client_command()),
            "python jerry-debugger/jerry_client.py --channel websocket --non-interactive \
             --client-source tests/debugger/client_source.js"
        );
    }

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(Outcome::Pass.exit_code(), 0);
        let fail = Outcome::Fail {
            output: PathBuf::from("/tmp/x"),
        };
        assert_eq!(fail.exit_code(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_command_file_is_error_and_server_is_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let case = dir.path().join("do_step");
        let mut run = test_run(&case.to_string_lossy());
        run.client_script = PathBuf::from("true");

        // Stands in for a server still waiting on a client
        let server_argv = vec![OsString::from("sleep"), OsString::from("600")];
        let server = DebugServer::spawn(server_argv).unwrap();
        let mut captured = CapturedOutput::create("do_step").unwrap();
        let client_phase = run_clients(&run, &mut captured).await;
        assert!(matches!(client_phase, Err(Error::FileRead { .. })));
        server.abort().await.unwrap();
        captured.dispose().unwrap();
    }
}
