//! Pharmacogenomics worker main executable

pub mod common;
pub mod pgx;

use clap::{Args, Parser, Subcommand};
use console::{Emoji, Term};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Pharmacogenomic risk reports",
    long_about = "This tool derives metabolizer phenotypes from VCF files and reports drug risks"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Pharmacogenomics-related commands.
    Pgx(Pgx),
    /// Model-related commands.
    Model(Model),
}

/// Parsing of "pgx *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Pgx {
    /// The sub command to run
    #[command(subcommand)]
    command: PgxCommands,
}

/// Enum supporting the parsing of "pgx *" sub commands.
#[derive(Debug, Subcommand)]
enum PgxCommands {
    Analyze(pgx::analyze::Args),
}

/// Parsing of "model *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Model {
    /// The sub command to run
    #[command(subcommand)]
    command: ModelCommands,
}

/// Enum supporting the parsing of "model *" sub commands.
#[derive(Debug, Subcommand)]
enum ModelCommands {
    Inspect(pgx::inspect::Args),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::Pgx(pgx) => match &pgx.command {
                PgxCommands::Analyze(args) => pgx::analyze::run(&cli.common, args)?,
            },
            Commands::Model(model) => match &model.command {
                ModelCommands::Inspect(args) => pgx::inspect::run(&cli.common, args)?,
            },
        }

        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line(&format!("All done. Have a nice day!{}", Emoji(" 😃", "")))?;

    Ok(())
}
