//! Seed and content data model
//!
//! - `SeedRecord`: untyped record read from the seed dataset
//! - `ContentEntry` / `EntryId`: persisted entries and their canonical identity
//! - `UploadedAsset` / `ResolvedFiles`: media library assets

pub mod asset;
pub mod entry;
pub mod record;

pub use asset::{FileData, FileInfo, ResolvedFiles, UploadedAsset};
pub use entry::{ContentEntry, EntryId};
pub use record::{slug_of, take_slugs, SeedRecord};
