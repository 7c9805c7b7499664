//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// Run one debugger test case and compare the client output against the
/// expected file
#[derive(Parser, Debug)]
#[command(name = "run-debugger-test", version, long_about = None)]
pub struct DebuggerArgs {
    /// Path to the jerry executable built with debugger support
    pub jerry: PathBuf,

    /// Debug channel used by server and client (e.g. websocket, rawpacket)
    pub channel: String,

    /// Path to the debugger client script
    pub debugger_client: PathBuf,

    /// Test case base name; `.js`, `.cmd` and `.expected` are appended to it
    pub test_case: String,

    /// Configuration file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the delay between starting the server and the client
    #[arg(long)]
    pub startup_delay_ms: Option<u64>,

    /// Disable colored PASS/FAIL output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let args = DebuggerArgs::try_parse_from([
            "run-debugger-test",
            "build/bin/jerry",
            "websocket",
            "jerry-debugger/jerry_client.py",
            "tests/debugger/do_step",
        ])
        .unwrap();
        assert_eq!(args.jerry, PathBuf::from("build/bin/jerry"));
        assert_eq!(args.channel, "websocket");
        assert_eq!(args.test_case, "tests/debugger/do_step");
        assert_eq!(args.startup_delay_ms, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        let result = DebuggerArgs::try_parse_from(["run-debugger-test", "jerry", "websocket"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_flags() {
        let args = DebuggerArgs::try_parse_from([
            "run-debugger-test",
            "jerry",
            "rawpacket",
            "client.py",
            "do_restart",
            "--startup-delay-ms",
            "50",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(args.startup_delay_ms, Some(50));
        assert!(args.no_color);
    }
}
