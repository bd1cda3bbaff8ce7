//! # fdoc CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fdoc_cli::check::{run_check, CheckArgs};
use fdoc_cli::lint::{run_lint, LintArgs};
use fdoc_cli::versions::{run_versions, VersionsArgs};
use fdoc_core::FdocConfig;

/// fdoc: endpoint documentation that is checked against real traffic.
///
/// Loads trees of `.fdoc` declarations, validates recorded HTTP exchanges
/// against them and reports undocumented response codes and schema
/// violations.
#[derive(Parser, Debug)]
#[command(name = "fdoc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a declaration tree and report what it contains.
    Lint(LintArgs),

    /// Validate one recorded exchange against a declaration tree.
    Check(CheckArgs),

    /// List the versions discovered under a versioned tree.
    Versions(VersionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match FdocConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!(
        service_path = %config.service_path.display(),
        versions = config.versions_support,
        "resolved configuration"
    );

    let result = match cli.command {
        Commands::Lint(args) => run_lint(&args, &config),
        Commands::Check(args) => run_check(&args, &config),
        Commands::Versions(args) => run_versions(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
