//! gridquery CLI - Main entry point

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use gridquery_cli::config::Config;
use gridquery_cli::error::CliError;
use gridquery_core::Dialect;

/// gridquery - compile and run data-grid requests
#[derive(Parser, Debug)]
#[command(name = "gridquery")]
#[command(author, version, about = "Compile and run data-grid requests", long_about = None)]
struct Cli {
    /// Path to config file (default: gridquery.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a starter gridquery.toml in the current directory
    Init,

    /// Validate the config and list registered entities
    Check,

    /// Print the SQL a request compiles to, without running it
    Explain {
        /// Root entity the grid lists
        #[arg(short, long)]
        entity: String,

        /// Request JSON file (default: stdin)
        #[arg(short, long, value_name = "PATH")]
        request: Option<PathBuf>,

        /// Override dialect from config
        #[arg(long, value_parser = parse_dialect)]
        dialect: Option<Dialect>,
    },

    /// Run a request and print the response envelope
    Query {
        /// Root entity the grid lists
        #[arg(short, long)]
        entity: String,

        /// Request JSON file (default: stdin)
        #[arg(short, long, value_name = "PATH")]
        request: Option<PathBuf>,

        /// Override database path from config
        #[arg(long, value_name = "PATH")]
        database: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn parse_dialect(s: &str) -> Result<Dialect, String> {
    s.parse().map_err(|e: gridquery_core::GridError| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    gridquery_cli::logging::init(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, CliError> {
    match cli.command {
        Command::Init => {
            let dir = std::env::current_dir().map_err(|e| CliError::IoError(e.to_string()))?;
            gridquery_cli::commands::init::run(&dir)?;
            Ok(true)
        }
        Command::Check => {
            let config = load_config(cli.config.as_deref())?;
            gridquery_cli::commands::check::run(&config)?;
            Ok(true)
        }
        Command::Explain {
            entity,
            request,
            dialect,
        } => {
            let config = load_config(cli.config.as_deref())?;
            gridquery_cli::commands::explain::run(&config, &entity, request.as_deref(), dialect)?;
            Ok(true)
        }
        Command::Query {
            entity,
            request,
            database,
            pretty,
        } => {
            let config = load_config(cli.config.as_deref())?;
            gridquery_cli::commands::query::run(
                &config,
                &entity,
                request.as_deref(),
                database.as_deref(),
                pretty,
            )
        }
    }
}

fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config, CliError> {
    match custom_path {
        Some(path) => Config::load_from(path).map_err(Into::into),
        None => Config::load().map_err(Into::into),
    }
}
