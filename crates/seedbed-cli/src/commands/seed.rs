//! Seed commands
//!
//! Usage:
//!   seedbed seed import [--data <FILE>] [--assets <DIR>] [--db <FILE>] [--strict] [--dry-run]
//!   seedbed seed status [--db <FILE>] [--environment <NAME>]

use clap::{Args, Subcommand};
use seedbed_core::seed::{SeedBackends, INIT_HAS_RUN};
use seedbed_core::{seed_once, FailurePolicy, InMemoryCms, SeedOptions, SeedOutcome, SeedReport};
use seedbed_store::seed::{import_seed_file, parse_seed_file};
use seedbed_store::SqliteCms;
use std::path::PathBuf;

use crate::config::Settings;

pub const SETTING_UP: &str = "Setting up the template...";

pub const ALREADY_IMPORTED: &str =
    "Seed data has already been imported. We cannot reimport unless you clear your database first.";

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import the seed dataset on the first run
    Import(ImportArgs),
    /// Show whether seed data was imported and what the database holds
    Status(StatusArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Seed dataset file (.json, .yaml or .yml)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Directory holding the files the dataset references
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Directory uploaded media is stored in
    #[arg(long)]
    pub media_root: Option<PathBuf>,

    /// Environment the first-run flag is scoped to
    #[arg(long)]
    pub environment: Option<String>,

    /// Stop at the first entry that fails to write
    #[arg(long)]
    pub strict: bool,

    /// Run against an in-memory store; the database is not touched
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Environment the first-run flag is scoped to
    #[arg(long)]
    pub environment: Option<String>,
}

/// Execute seed command
pub fn execute(args: SeedArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, settings),
        SeedCommand::Status(status_args) => execute_status(status_args, settings),
    }
}

/// Execute seed import
fn execute_import(args: ImportArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let data_file = args.data.unwrap_or_else(|| settings.data_file.clone());
    let options = SeedOptions {
        environment: args
            .environment
            .unwrap_or_else(|| settings.environment.clone()),
        assets_dir: args.assets.unwrap_or_else(|| settings.assets_dir.clone()),
        on_write_failure: if args.strict {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        },
    };

    let outcome = if args.dry_run {
        parse_seed_file(&data_file).and_then(|dataset| {
            let cms = InMemoryCms::new();
            println!("{}", SETTING_UP);
            seed_once(&dataset, SeedBackends::single(&cms), &options)
        })
    } else {
        let db_path = args.db.unwrap_or_else(|| settings.database.clone());
        let media_root = args
            .media_root
            .unwrap_or_else(|| settings.media_root.clone());
        seedbed_store::db::open_migrated(&db_path).and_then(|conn| {
            if !SqliteCms::new(&conn).read_flag(&options.environment, INIT_HAS_RUN)? {
                println!("{}", SETTING_UP);
            }
            import_seed_file(&data_file, &conn, &media_root, &options).map(|s| s.outcome)
        })
    };

    match outcome {
        Ok(SeedOutcome::AlreadySeeded) => {
            println!("{}", ALREADY_IMPORTED);
            Ok(())
        }
        Ok(SeedOutcome::Imported(report)) => {
            print_report(&report, args.dry_run);
            println!("Ready to go");
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                err_code = e.code(),
                error = %e,
                data_file = %data_file.display(),
                "Could not import seed data"
            );
            println!("Could not import seed data");
            Err(e.into())
        }
    }
}

fn print_report(report: &SeedReport, dry_run: bool) {
    if dry_run {
        println!("Dry run: nothing was written to the database");
    }
    for (content_type, count) in &report.entries_created {
        println!("  {}: {}", content_type, count);
    }
    println!(
        "Created {} entries ({} failed), uploaded {} files ({} reused), connected {} relations, granted {} permissions",
        report.total_entries(),
        report.write_failures,
        report.assets_uploaded,
        report.assets_reused,
        report.relations_connected,
        report.permissions_granted
    );
}

/// Execute seed status
fn execute_status(args: StatusArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = args.db.unwrap_or_else(|| settings.database.clone());
    let environment = args
        .environment
        .unwrap_or_else(|| settings.environment.clone());

    let conn = seedbed_store::db::open_migrated(&db_path)?;
    let cms = SqliteCms::new(&conn);
    let seeded = cms.read_flag(&environment, INIT_HAS_RUN)?;

    println!("{} ({}): {}", INIT_HAS_RUN, environment, seeded);
    let counts = cms.count_entries()?;
    if counts.is_empty() {
        println!("No entries");
    }
    for (content_type, count) in counts {
        println!("  {}: {}", content_type, count);
    }

    Ok(())
}
