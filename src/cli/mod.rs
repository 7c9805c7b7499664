//! CLI command handling
//!
//! Resolves configuration and arguments into a test run and executes it.

use std::time::Duration;

use crate::commands::DebuggerArgs;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::testing::{self, DiffTool, Outcome, TestCase, TestRun};

/// Run the test case described by the command line
pub async fn dispatch(args: DebuggerArgs) -> Result<Outcome> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(args.config.as_deref())?;
    let run = build_run(args, &config)?;
    tracing::debug!(?run, "Resolved test run");

    testing::run_test(&run).await
}

/// Combine arguments and configuration into a test run
pub fn build_run(args: DebuggerArgs, config: &Config) -> Result<TestRun> {
    if args.test_case.is_empty() {
        return Err(Error::InvalidArgs("test case name is empty".to_string()));
    }
    if args.channel.is_empty() {
        return Err(Error::InvalidArgs("debug channel is empty".to_string()));
    }

    let startup_delay = args
        .startup_delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.server.startup_delay());

    Ok(TestRun {
        jerry: args.jerry,
        channel: args.channel,
        client_script: args.debugger_client,
        interpreter: config.client.interpreter.clone(),
        startup_delay,
        case: TestCase::new(args.test_case),
        diff: DiffTool::git(config.git_program()?),
    })
}
