//! Debugger test runner
//!
//! Runs a debug server and a scripted debug client side by side, then
//! compares the client's output against a golden file.

pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

pub use common::{Error, Result};
pub use testing::{Outcome, TestCase};
