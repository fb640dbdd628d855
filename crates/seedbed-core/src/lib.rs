//! Seedbed Core - content schema and one-shot seed pipeline
//!
//! This crate provides:
//! - The content-type registry (`content_types`) shared by every store
//! - Collaborator traits for content, media, permissions and setup flags (`cms`)
//! - The gated seed pipeline: file resolution, two-phase entry and relation
//!   creation, block rewriting, per-family importers (`seed`)
//! - An in-memory backend for dry runs and tests (`memory`)
//! - The error and logging facilities used across the workspace

pub mod cms;
pub mod content_types;
pub mod errors;
pub mod logging_facility;
pub mod memory;
pub mod model;
pub mod seed;

#[doc(hidden)]
pub use seedbed_core_types as core_types;

// Re-export commonly used types
pub use cms::{ContentStore, MediaLibrary, PermissionStore, SetupStore};
pub use errors::{ExError, ExErrorKind, Result, SeedError};
pub use memory::InMemoryCms;
pub use model::{ContentEntry, EntryId, SeedRecord, UploadedAsset};
pub use seed::{seed_once, FailurePolicy, SeedDataset, SeedOptions, SeedOutcome, SeedReport};
