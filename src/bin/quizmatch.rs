//! Quizmatch CLI - quiz scoring and compatibility matching
//!
//! Thin front end over `quizmatch_rs`: reads JSON inputs, runs one engine
//! operation and prints JSON or tables. Logs go to stderr so stdout stays
//! machine-readable.

use clap::Parser;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Score(args) => cli::score_command(args, config).await?,
        Commands::Match(args) => cli::match_command(args, config).await?,
        Commands::Aspects(args) => cli::aspects_command(args, config).await?,
        Commands::Group(args) => cli::group_command(args, config).await?,
        Commands::PrintDefaultConfig => cli::print_default_config().await?,
        Commands::ValidateConfig => cli::validate_config(config).await?,
    }

    Ok(())
}
