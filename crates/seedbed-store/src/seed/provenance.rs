//! Provenance event tracking for seed imports
//!
//! Records events in the provenance_events table, correlated by seed digest

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use seedbed_core::errors::ExError;
use seedbed_core::seed::SeedReport;

/// Provenance event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvenanceKind {
    /// Seed import started
    ImportStarted,
    /// Seed import completed
    ImportCompleted,
    /// Seed import aborted
    ImportFailed,
    /// First-run flag already set; nothing imported
    ImportSkipped,
}

impl ProvenanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvenanceKind::ImportStarted => "seed_import_started",
            ProvenanceKind::ImportCompleted => "seed_import_completed",
            ProvenanceKind::ImportFailed => "seed_import_failed",
            ProvenanceKind::ImportSkipped => "seed_import_skipped",
        }
    }
}

/// Emit a provenance event
pub fn emit_event(
    conn: &Connection,
    kind: ProvenanceKind,
    correlation_id: &str,
    metadata: Option<serde_json::Value>,
) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    let metadata_str = metadata
        .map(|m| m.to_string())
        .unwrap_or_else(|| "{}".to_string());

    conn.execute(
        "INSERT INTO provenance_events (kind, correlation_id, timestamp, metadata) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![kind.as_str(), correlation_id, now, metadata_str],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Emit "seed import started" event
pub fn emit_started(conn: &Connection, seed_digest: &str, environment: &str) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::ImportStarted,
        seed_digest,
        Some(serde_json::json!({
            "seed_digest": seed_digest,
            "environment": environment,
        })),
    )
}

/// Emit "seed import completed" event carrying the run report
pub fn emit_completed(conn: &Connection, seed_digest: &str, report: &SeedReport) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::ImportCompleted,
        seed_digest,
        Some(serde_json::to_value(report)?),
    )
}

/// Emit "seed import failed" event
pub fn emit_failed(conn: &Connection, seed_digest: &str, err: &ExError) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::ImportFailed,
        seed_digest,
        Some(serde_json::json!({
            "err_code": err.code(),
            "message": err.to_string(),
        })),
    )
}

/// Emit "seed import skipped" event
pub fn emit_skipped(conn: &Connection, seed_digest: &str, environment: &str) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::ImportSkipped,
        seed_digest,
        Some(serde_json::json!({ "environment": environment })),
    )
}

/// Event kinds recorded for a correlation id, oldest first
pub fn event_kinds(conn: &Connection, correlation_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT kind FROM provenance_events WHERE correlation_id = ?1 ORDER BY id")
        .map_err(from_rusqlite)?;
    let kinds = stmt
        .query_map([correlation_id], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(kinds)
}
