//! Error handling for seedbed-store
//!
//! Wraps seedbed-core ExError with store-specific helpers

use seedbed_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a blob collision error
pub fn blob_collision(digest: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("blob_write")
        .with_entity_id(digest)
        .with_message(format!("Blob collision for digest {}", digest))
}

/// Create a missing blob error
pub fn blob_missing(digest: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("blob_read")
        .with_entity_id(digest)
        .with_message(format!("Blob not found for digest {}", digest))
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidSeed)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create a database error from rusqlite::Error
///
/// Unique-constraint failures map to `AlreadyExists`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            ExErrorKind::AlreadyExists
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error for a path
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    seedbed_core::errors::io_error(operation, path, err)
}
