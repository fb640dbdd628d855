//! Seedbed Store - SQLite persistence for content, media and seed imports
//!
//! Provides:
//! - SQLite schema with a checksummed migrations framework
//! - Content-addressed blob storage for uploaded media
//! - SQLite implementations of the seed pipeline's store traits
//! - Seed file parsing and the provenance-tracked importer

pub mod blobs;
pub mod db;
pub mod errors;
pub mod hashing;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use errors::Result;
pub use repo::{SqliteCms, SqliteMediaLibrary};
