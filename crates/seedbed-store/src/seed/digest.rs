//! Seed digest canonicalization
//!
//! The digest identifies one dataset across runs. Records are serialized
//! through `serde_json::Value`, whose maps keep keys sorted, so key order
//! in the source file does not change the digest.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::hashing::sha256_hex;
use seedbed_core::seed::SeedDataset;

/// SHA-256 hex digest of the canonical JSON form of `dataset`
pub fn compute_seed_digest(dataset: &SeedDataset) -> Result<String> {
    let canonical = serde_json::to_value(dataset)?;
    let json = serde_json::to_string(&canonical)?;
    Ok(sha256_hex(json.as_bytes()))
}
