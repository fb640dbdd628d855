//! Seed import system
//!
//! Provides:
//! - JSON/YAML parser with validation
//! - Digest canonicalization
//! - Importer orchestration over the SQLite stores
//! - Provenance tracking

pub mod digest;
pub mod importer;
pub mod parser;
pub mod provenance;

pub use digest::compute_seed_digest;
pub use importer::{import_seed, import_seed_file, ImportSummary};
pub use parser::{parse_seed_file, parse_seed_str, SeedFormat};
