//! run-debugger-test - run one debugger test case
//!
//! Starts the debug server, feeds command files to the debug client and
//! diffs the captured output against the expected file. Exits 0 on a match
//! and 1 otherwise.

use clap::Parser;
use run_debugger_test::commands::DebuggerArgs;
use run_debugger_test::{cli, common::logging};

#[tokio::main]
async fn main() {
    logging::init_cli();

    let args = DebuggerArgs::parse();

    match cli::dispatch(args).await {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
