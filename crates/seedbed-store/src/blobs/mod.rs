//! Content-addressed blob storage for uploaded media
//!
//! Provides:
//! - Filesystem store keyed by SHA-256 with atomic writes
//! - Collision detection
//! - Sharding by first 2 hex chars of digest

mod atomic;
mod fs_store;
mod sharding;

pub use fs_store::{BlobStore, StoredBlob};
pub use sharding::shard_relative_path;
