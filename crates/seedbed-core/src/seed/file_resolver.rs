//! Resolve seed file names to media library assets
//!
//! A name whose base (text before the first `.`) already exists in the media
//! library is reused; otherwise the local file is uploaded. Existing assets
//! come first in the result, then uploaded ones, regardless of input order.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cms::MediaLibrary;
use crate::errors::{io_error, Result, SeedError};
use crate::model::{FileData, FileInfo, ResolvedFiles};
use crate::{log_op_end, log_op_error, log_op_start};

/// Text before the first `.`; the whole name when there is none
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// MIME type for a file name, judged by its last extension; unknown yields ""
pub fn mime_type_for(file_name: &str) -> &'static str {
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return "";
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "avif" => "image/avif",
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "",
    }
}

/// Stage a local file from `assets_dir` for upload
///
/// # Errors
///
/// `Io` when the file cannot be stat'ed.
pub fn file_data(assets_dir: &Path, file_name: &str) -> Result<FileData> {
    let path: PathBuf = assets_dir.join(file_name);
    let metadata = std::fs::metadata(&path).map_err(|e| io_error("file_data", &path, e))?;
    Ok(FileData {
        path,
        original_file_name: file_name.to_string(),
        size: metadata.len(),
        mime_type: mime_type_for(file_name).to_string(),
    })
}

/// Counters kept across one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub reused: usize,
    pub uploaded: usize,
}

/// Looks up or uploads assets for seed records
pub struct FileResolver<'a> {
    media: &'a dyn MediaLibrary,
    assets_dir: &'a Path,
    stats: ResolveStats,
}

impl<'a> FileResolver<'a> {
    pub fn new(media: &'a dyn MediaLibrary, assets_dir: &'a Path) -> Self {
        Self {
            media,
            assets_dir,
            stats: ResolveStats::default(),
        }
    }

    pub fn stats(&self) -> ResolveStats {
        self.stats
    }

    /// Resolve each name to an existing or freshly uploaded asset
    ///
    /// One asset is returned unwrapped; zero or several come back as a list.
    ///
    /// # Errors
    ///
    /// `Io` for a missing local file, `Upload` when the library returns no
    /// asset, and any media library failure.
    pub fn resolve<S: AsRef<str>>(&mut self, names: &[S]) -> Result<ResolvedFiles> {
        log_op_start!("resolve_files", count = names.len());
        let start = Instant::now();

        let resolved = self.resolve_impl(names).map_err(|e| {
            log_op_error!(
                "resolve_files",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "resolve_files",
            duration_ms = start.elapsed().as_millis() as u64
        );
        Ok(resolved)
    }

    fn resolve_impl<S: AsRef<str>>(&mut self, names: &[S]) -> Result<ResolvedFiles> {
        let mut existing = Vec::new();
        let mut uploaded = Vec::new();

        for name in names {
            let file_name = name.as_ref();
            let base = base_name(file_name);

            if let Some(asset) = self.media.find_by_name(base)? {
                tracing::debug!(file_name, asset_id = asset.id, "reusing existing asset");
                self.stats.reused += 1;
                existing.push(asset);
                continue;
            }

            let data = file_data(self.assets_dir, file_name)?;
            let info = FileInfo::for_seed_image(base);
            let asset = self
                .media
                .upload(&data, &info)?
                .into_iter()
                .next()
                .ok_or_else(|| SeedError::EmptyUpload {
                    file_name: file_name.to_string(),
                })?;
            tracing::debug!(file_name, asset_id = asset.id, "uploaded asset");
            self.stats.uploaded += 1;
            uploaded.push(asset);
        }

        existing.extend(uploaded);
        Ok(ResolvedFiles::from_assets(existing))
    }
}
