//! Filesystem blob store

#![allow(clippy::result_large_err)]

use crate::blobs::atomic::atomic_write;
use crate::blobs::sharding::shard_relative_path;
use crate::errors::{blob_collision, blob_missing, io_error, Result};
use crate::hashing::sha256_hex;
use std::fs;
use std::path::PathBuf;

/// Where a blob landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub digest: String,
    /// Path relative to the store root, with `/` separators
    pub relative_path: String,
}

/// Blob store rooted at a media directory
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store `content` under its SHA-256 digest
    ///
    /// Writing identical content twice is a no-op; differing content at an
    /// existing address is a collision.
    pub fn write(&self, content: &[u8], ext: &str) -> Result<StoredBlob> {
        let digest = sha256_hex(content);
        let relative = shard_relative_path(&digest, ext);
        let target_path = self.root.join(&relative);

        if target_path.exists() {
            let existing =
                fs::read(&target_path).map_err(|e| io_error("read_blob", &target_path, e))?;
            if existing != content {
                return Err(blob_collision(&digest));
            }
        } else {
            atomic_write(&target_path, content)?;
        }

        Ok(StoredBlob {
            relative_path: relative.to_string_lossy().replace('\\', "/"),
            digest,
        })
    }

    /// Read a blob back by digest and extension
    pub fn read(&self, digest: &str, ext: &str) -> Result<Vec<u8>> {
        let path = self.root.join(shard_relative_path(digest, ext));
        if !path.exists() {
            return Err(blob_missing(digest));
        }
        fs::read(&path).map_err(|e| io_error("read_blob", &path, e))
    }
}
