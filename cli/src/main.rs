#![deny(missing_docs)]

//! # apisec CLI
//!
//! Command Line Interface for the offensive API security test-plan compiler.
//!
//! Supported Commands:
//! - `generate`: Normalize a spec and emit a test plan (JSON/YAML).
//! - `validate`: Normalize a spec and report a summary, without generating tests.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod generate;
mod load;
mod validate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Offensive API security test-plan compiler")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalizes a spec and generates a test plan.
    Generate(generate::GenerateArgs),
    /// Normalizes a spec and reports a summary.
    Validate(validate::ValidateArgs),
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> CliResult<()> {
    init_logging();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
        Commands::Validate(args) => validate::execute(args)?,
    }

    Ok(())
}
