//! retweak CLI - inspect and validate retweak bar files.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retweak")]
#[command(author, version, about = "retweak bar file tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every type name a bar file may use
    Types(commands::types::TypesArgs),

    /// Report lines of a bar file that would be skipped on load
    Check(commands::check::CheckArgs),

    /// List saved bar files
    List(commands::list::ListArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Types(args) => commands::types::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::List(args) => commands::list::run(args),
    }
}
