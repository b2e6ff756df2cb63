//! yokay-evals command-line driver
//!
//! Runs meta-evaluation suites against an agent and reports capability
//! (pass@k) and consistency (pass^k) per test case and per suite.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/yokay-cli
//! ```
//!
//! # Commands
//!
//! - `yokay-evals meta --suite agents` runs every suite under `meta/agents`
//! - `yokay-evals meta --agent <name>` runs `meta/agents/<name>/eval.yaml`
//! - `yokay-evals grade-skills --skills-dir <dir>` writes a skill clarity report
//! - `yokay-evals report` summarizes the newest skill clarity report
//!
//! # Exit codes
//!
//! - `0`: every suite ran, even if some test cases failed
//! - `1`: a suite could not be loaded or evaluated
//! - `2`: invalid invocation, nothing was run

mod args;
mod commands;
mod console;
mod router;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;
use crate::commands::UsageError;
use crate::console::CliConsole;

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match router::route(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            CliConsole::new(false).error(&format!("{:#}", err));
            if err.downcast_ref::<UsageError>().is_some() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
    }
}
