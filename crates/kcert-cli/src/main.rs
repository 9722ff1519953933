//! # kcert CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kcert_cli::commit::{run_commit, run_prove, CommitArgs, ProveArgs};
use kcert_cli::config::CliConfig;
use kcert_cli::issue::{run_issue, IssueArgs};
use kcert_cli::records::{run_list, run_payload, ListArgs, PayloadArgs};
use kcert_cli::verify::{run_verify, VerifyArgs};
use kcert_cli::Settings;

/// Certificate commitments with selective disclosure.
///
/// Commits certificate fields to a single root hash, issues metadata
/// records carrying per-field inclusion proofs, and verifies disclosed
/// fields against them.
#[derive(Parser, Debug)]
#[command(name = "kcert", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Metadata JSON file; overrides the configured path.
    #[arg(long, global = true)]
    metadata: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the root and per-field proofs of a certificate.
    Commit(CommitArgs),

    /// Check one field against a root and a proof file.
    Prove(ProveArgs),

    /// Commit a certificate and append its record to the metadata file.
    Issue(IssueArgs),

    /// Verify a disclosed field against stored records.
    Verify(VerifyArgs),

    /// List stored certificate records.
    List(ListArgs),

    /// Print the ledger metadata document of a record.
    Payload(PayloadArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("kcert CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match CliConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };
    let settings = Settings::resolve(config, cli.metadata);
    tracing::debug!(metadata = %settings.metadata.display(), "resolved settings");

    let result = match cli.command {
        Commands::Commit(args) => run_commit(&args),
        Commands::Prove(args) => run_prove(&args),
        Commands::Issue(args) => run_issue(&args, &settings),
        Commands::Verify(args) => run_verify(&args, &settings),
        Commands::List(args) => run_list(&args, &settings),
        Commands::Payload(args) => run_payload(&args, &settings),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
