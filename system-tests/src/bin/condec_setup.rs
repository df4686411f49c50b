// system-tests/src/bin/condec_setup.rs
// ============================================================================
// Module: ConDec Setup
// Description: Command-line reset of the Jira test project.
// Purpose: Prepare a Jira instance by hand before running live suites.
// Dependencies: clap, system-tests, tokio
// ============================================================================

//! Resets the configured Jira project to an empty, activated baseline.

#![allow(clippy::print_stderr, reason = "CLI reports failures on stderr.")]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use system_tests::config::HarnessConfig;
use system_tests::config::SystemTestConfig;
use system_tests::connection::Connection;
use system_tests::connection::DEFAULT_REQUEST_TIMEOUT;
use system_tests::fixture::FixtureOptions;
use system_tests::fixture::set_up_jira;
use system_tests::logging;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "condec-setup", about = "Reset the ConDec Jira test project")]
struct Args {
    /// Config file; defaults to `CONDEC_SYSTEM_TEST_CONFIG` or `config.json`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Store knowledge as Jira issues (`true`) or in the ConDec database
    /// (`false`); left unchanged when omitted.
    #[arg(long, value_name = "true|false", action = clap::ArgAction::Set)]
    issue_strategy: Option<bool>,
    /// Summary of a Jira issue to create after the reset; repeatable.
    #[arg(long = "seed", value_name = "SUMMARY")]
    seed: Vec<String>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("condec-setup: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Loads config, connects, and runs the fixture.
async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let env = SystemTestConfig::load()?;
    let mut config = match &args.config {
        Some(path) => HarnessConfig::from_file(path)?,
        None => HarnessConfig::load()?,
    };
    config.apply_env(&env)?;
    config.validate()?;

    let timeout = env.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
    let connection = Connection::open(&config, timeout)?;
    let options = FixtureOptions {
        issue_strategy: args.issue_strategy,
        seed_issues: args.seed,
    };
    let report = set_up_jira(&connection, &options).await?;
    tracing::info!(
        project = %config.project_key,
        deleted_existing = report.deleted_existing,
        seeded = report.seeded.len(),
        "jira test project reset"
    );
    Ok(())
}
