//! Media library assets

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// A file record held by the media library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub id: i64,
    pub document_id: String,
    /// Base name (extension stripped); the media library's lookup key
    pub name: String,
    pub alternative_text: Option<String>,
    pub caption: Option<String>,
    pub ext: String,
    pub mime: String,
    pub size: u64,
    pub hash: String,
    pub url: String,
}

/// Local file staged for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    pub path: PathBuf,
    pub original_file_name: String,
    pub size: u64,
    pub mime_type: String,
}

/// Descriptive metadata attached to an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub alternative_text: String,
    pub caption: String,
}

impl FileInfo {
    /// Metadata used for seeded images: name and caption are the base name
    pub fn for_seed_image(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alternative_text: format!("An image uploaded to the media library called {}", name),
            caption: name.to_string(),
        }
    }
}

/// Outcome of resolving one or more file names
///
/// A single asset is unwrapped; anything else (including nothing) stays a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedFiles {
    One(UploadedAsset),
    Many(Vec<UploadedAsset>),
}

impl ResolvedFiles {
    /// Collapse a list of assets, unwrapping a single element
    pub fn from_assets(mut assets: Vec<UploadedAsset>) -> Self {
        if assets.len() == 1 {
            if let Some(asset) = assets.pop() {
                return ResolvedFiles::One(asset);
            }
        }
        ResolvedFiles::Many(assets)
    }

    /// All assets in result order
    pub fn assets(&self) -> Vec<&UploadedAsset> {
        match self {
            ResolvedFiles::One(asset) => vec![asset],
            ResolvedFiles::Many(assets) => assets.iter().collect(),
        }
    }

    /// JSON value to embed in an entry record
    pub fn to_value(&self) -> crate::errors::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
