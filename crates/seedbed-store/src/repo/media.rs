//! SQLite media library
//!
//! File rows live in `files`; bytes go to the blob store under the media
//! root. The public URL mirrors the blob's location under `/uploads`.

#![allow(clippy::result_large_err)]

use std::path::PathBuf;

use rusqlite::{Connection, OptionalExtension, Row};

use crate::blobs::BlobStore;
use crate::errors::{from_rusqlite, io_error, Result};
use seedbed_core::cms::MediaLibrary;
use seedbed_core::model::{FileData, FileInfo, UploadedAsset};

const FILE_COLUMNS: &str =
    "id, document_id, name, alternative_text, caption, ext, mime, size, hash, url";

/// Media library over a connection and a blob directory
pub struct SqliteMediaLibrary<'a> {
    conn: &'a Connection,
    blobs: BlobStore,
}

impl<'a> SqliteMediaLibrary<'a> {
    pub fn new(conn: &'a Connection, media_root: impl Into<PathBuf>) -> Self {
        Self {
            conn,
            blobs: BlobStore::new(media_root),
        }
    }

    /// Read an asset's bytes back from the blob store
    pub fn read_bytes(&self, asset: &UploadedAsset) -> Result<Vec<u8>> {
        self.blobs.read(&asset.hash, &asset.ext)
    }

    /// Number of file rows
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count as usize)
    }
}

fn asset_row(row: &Row<'_>) -> rusqlite::Result<UploadedAsset> {
    Ok(UploadedAsset {
        id: row.get(0)?,
        document_id: row.get(1)?,
        name: row.get(2)?,
        alternative_text: row.get(3)?,
        caption: row.get(4)?,
        ext: row.get(5)?,
        mime: row.get(6)?,
        size: row.get::<_, i64>(7)? as u64,
        hash: row.get(8)?,
        url: row.get(9)?,
    })
}

/// Extension of a file name from its last `.`, dot included
fn extension_of(file_name: &str) -> String {
    file_name
        .rfind('.')
        .map(|i| file_name[i..].to_ascii_lowercase())
        .unwrap_or_default()
}

impl MediaLibrary for SqliteMediaLibrary<'_> {
    fn find_by_name(&self, name: &str) -> Result<Option<UploadedAsset>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM files WHERE name = ?1 ORDER BY id LIMIT 1",
                    FILE_COLUMNS
                ),
                [name],
                asset_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }

    fn upload(&self, file: &FileData, info: &FileInfo) -> Result<Vec<UploadedAsset>> {
        let bytes = std::fs::read(&file.path).map_err(|e| io_error("upload", &file.path, e))?;
        let ext = extension_of(&file.original_file_name);
        let stored = self.blobs.write(&bytes, &ext)?;
        let url = format!("/uploads/{}", stored.relative_path);
        let document_id = uuid::Uuid::now_v7().to_string();

        self.conn
            .execute(
                "INSERT INTO files (document_id, name, alternative_text, caption, ext, mime, size, hash, url, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    document_id,
                    info.name,
                    info.alternative_text,
                    info.caption,
                    ext,
                    file.mime_type,
                    bytes.len() as i64,
                    stored.digest,
                    url,
                    chrono::Utc::now().timestamp(),
                ],
            )
            .map_err(|e| from_rusqlite(e).with_op("upload").with_entity_id(&file.original_file_name))?;

        Ok(vec![UploadedAsset {
            id: self.conn.last_insert_rowid(),
            document_id,
            name: info.name.clone(),
            alternative_text: Some(info.alternative_text.clone()),
            caption: Some(info.caption.clone()),
            ext,
            mime: file.mime_type.clone(),
            size: bytes.len() as u64,
            hash: stored.digest,
            url,
        }])
    }
}
