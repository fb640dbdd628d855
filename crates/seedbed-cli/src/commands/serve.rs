//! Serve command
//!
//! Usage: seedbed serve [--db <FILE>] [--bind <ADDR>]

use clap::Args;
use seedbed_server::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::Settings;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Socket address to listen on
    #[arg(long)]
    pub bind: Option<String>,
}

/// Execute serve
pub fn execute(args: ServeArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = args.db.unwrap_or_else(|| settings.database.clone());
    let bind = args.bind.unwrap_or_else(|| settings.server.bind.clone());
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| format!("Invalid bind address {}: {}", bind, e))?;

    let state = AppState::open(&db_path)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(seedbed_server::serve(state, addr))?;

    Ok(())
}
