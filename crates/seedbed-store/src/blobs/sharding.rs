//! Shard layout for blobs
//!
//! Blobs live under a directory named after the first two hex characters of
//! their digest, keeping directories small.

use std::path::PathBuf;

/// Relative location of a blob: `ab/abc123.png` for digest `abc123` and ext `.png`
///
/// `ext` carries its leading dot and may be empty.
pub fn shard_relative_path(digest: &str, ext: &str) -> PathBuf {
    let shard = &digest[..2.min(digest.len())];
    PathBuf::from(shard).join(format!("{}{}", digest, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_relative_path() {
        assert_eq!(
            shard_relative_path("abc123def456", ".png"),
            PathBuf::from("ab/abc123def456.png")
        );
    }

    #[test]
    fn test_shard_without_extension() {
        assert_eq!(shard_relative_path("ff00", ""), PathBuf::from("ff/ff00"));
    }
}
