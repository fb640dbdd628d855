//! Seedbed CLI
//!
//! Seeds a content database from a local dataset and serves it over HTTP

use clap::{Parser, Subcommand};
use seedbed_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;
mod config;

use config::{LogFormat, Settings};

#[derive(Debug, Parser)]
#[command(name = "seedbed")]
#[command(about = "Seedbed - one-shot content seeding and a small read API", long_about = None)]
struct Cli {
    /// Config file (defaults to ./seedbed.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed data operations
    Seed(commands::seed::SeedArgs),
    /// Run the HTTP API
    Serve(commands::serve::ServeArgs),
}

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let log_format = cli.log_format.unwrap_or(settings.log_format);
    logging_facility::init(Profile::from_format(log_format.as_str()));

    let result = match cli.command {
        Commands::Seed(args) => commands::seed::execute(args, &settings),
        Commands::Serve(args) => commands::serve::execute(args, &settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
