//! Seed importer orchestration
//!
//! Imports a seed file into SQLite through the core seed pipeline and
//! records provenance events keyed by the seed digest.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::hashing::sha256_hex;
use crate::repo::{SqliteCms, SqliteMediaLibrary};
use crate::seed::provenance;
use crate::seed::{compute_seed_digest, parse_seed_file};
use rusqlite::Connection;
use seedbed_core::seed::{
    import_dataset, RunGate, SeedBackends, SeedDataset, SeedOptions, SeedOutcome, INIT_HAS_RUN,
};
use std::path::Path;

/// Result of one import call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Digest of the parsed dataset, used as the provenance correlation id
    pub digest: String,
    pub outcome: SeedOutcome,
}

/// Import a seed file into the database
///
/// Checks the first-run flag for `options.environment` before touching the
/// file, so an already seeded database is reported as such even when the
/// file has since become unreadable. Otherwise parses, validates and imports
/// it. Media files are written under `media_root`.
///
/// # Errors
///
/// `InvalidSeed` for unreadable or malformed files, and whatever aborts the
/// pipeline. Writes made before an abort are kept and a
/// `seed_import_failed` event is recorded.
pub fn import_seed_file(
    path: &Path,
    conn: &Connection,
    media_root: &Path,
    options: &SeedOptions,
) -> Result<ImportSummary> {
    if SqliteCms::new(conn).read_flag(&options.environment, INIT_HAS_RUN)? {
        return skip(conn, file_digest(path), options);
    }

    let dataset = parse_seed_file(path)?;
    import_seed(&dataset, conn, media_root, options)
}

/// Digest identifying a seed file that may not parse
///
/// The dataset digest when the file parses, else the digest of its raw
/// bytes, else the digest of its path.
fn file_digest(path: &Path) -> String {
    if let Ok(digest) = parse_seed_file(path).and_then(|d| compute_seed_digest(&d)) {
        return digest;
    }
    match std::fs::read(path) {
        Ok(bytes) => sha256_hex(&bytes),
        Err(_) => sha256_hex(path.to_string_lossy().as_bytes()),
    }
}

fn skip(conn: &Connection, digest: String, options: &SeedOptions) -> Result<ImportSummary> {
    tracing::info!(
        environment = %options.environment,
        seed_digest = %digest,
        "seed data already imported, skipping"
    );
    provenance::emit_skipped(conn, &digest, &options.environment)?;
    Ok(ImportSummary {
        digest,
        outcome: SeedOutcome::AlreadySeeded,
    })
}

/// Import an already parsed dataset
pub fn import_seed(
    dataset: &SeedDataset,
    conn: &Connection,
    media_root: &Path,
    options: &SeedOptions,
) -> Result<ImportSummary> {
    let digest = compute_seed_digest(dataset)?;

    let cms = SqliteCms::new(conn);
    let media = SqliteMediaLibrary::new(conn, media_root);

    let gate = RunGate::new(&cms, &options.environment);
    if !gate.is_first_run()? {
        return skip(conn, digest, options);
    }

    provenance::emit_started(conn, &digest, &options.environment)?;

    let backends = SeedBackends {
        content: &cms,
        media: &media,
        permissions: &cms,
        setup: &cms,
    };

    match import_dataset(dataset, backends, options) {
        Ok(report) => {
            provenance::emit_completed(conn, &digest, &report)?;
            Ok(ImportSummary {
                digest,
                outcome: SeedOutcome::Imported(report),
            })
        }
        Err(err) => {
            if let Err(provenance_err) = provenance::emit_failed(conn, &digest, &err) {
                tracing::error!(
                    seed_digest = %digest,
                    err_code = provenance_err.code(),
                    error = %provenance_err,
                    "could not record seed import failure"
                );
            }
            Err(err)
        }
    }
}
