//! # roster CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, and
//! dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use roster_cli::config::{CliConfig, LogFormat};
use roster_cli::export::{run_export, ExportArgs};
use roster_cli::load::{run_load, LoadArgs};
use roster_cli::orgs::{run_orgs, OrgsArgs};
use roster_cli::EXIT_OPERATIONAL;

/// Validate, inspect, and re-export identity registry documents.
#[derive(Parser, Debug)]
#[command(name = "roster", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a full registry document and summarize it.
    Load(LoadArgs),

    /// Stream the organizations of a document in source order.
    Orgs(OrgsArgs),

    /// Re-export identities or organizations.
    Export(ExportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::from_env(cli.verbose) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("roster: {e}");
            return ExitCode::from(EXIT_OPERATIONAL);
        }
    };
    if let Err(e) = init_tracing(&config) {
        eprintln!("roster: {e}");
        return ExitCode::from(EXIT_OPERATIONAL);
    }

    tracing::debug!(?config, "roster CLI starting");

    let result = match cli.command {
        Commands::Load(args) => run_load(&args),
        Commands::Orgs(args) => run_orgs(&args),
        Commands::Export(args) => run_export(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL)
        }
    }
}

/// Logs go to stderr so stdout carries only command output.
fn init_tracing(config: &CliConfig) -> Result<(), roster_cli::config::ConfigError> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}
