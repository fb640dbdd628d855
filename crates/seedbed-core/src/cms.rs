//! Content-management collaborators consumed by the seed pipeline
//!
//! The pipeline never talks to a database directly. `seedbed-store` backs
//! these traits with SQLite and `crate::memory` with plain collections.
//! Methods take `&self` so one backend value can serve several roles at once.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::model::{ContentEntry, EntryId, FileData, FileInfo, SeedRecord, UploadedAsset};

/// Entry persistence, per named content type
pub trait ContentStore {
    /// Create one entry of `content_type` from `data`.
    ///
    /// # Errors
    ///
    /// `UnknownContentType`, `InvalidInput` for missing required attributes,
    /// `AlreadyExists` for a duplicate slug or an occupied single type, or
    /// `Persistence` when the backend fails.
    fn create(&self, content_type: &str, data: SeedRecord) -> Result<ContentEntry>;

    /// Additively connect `children` to `parent` through the relation `attribute`.
    ///
    /// Connecting an already connected pair leaves a single edge.
    ///
    /// # Errors
    ///
    /// `UnknownRelation` for an undeclared attribute, `NotFound` if the parent
    /// or any child does not exist in the expected content type.
    fn connect(
        &self,
        content_type: &str,
        parent: &EntryId,
        attribute: &str,
        children: &[EntryId],
    ) -> Result<()>;
}

/// Uploaded files, looked up by base name
pub trait MediaLibrary {
    /// Find an existing asset whose name equals `name`.
    ///
    /// # Errors
    ///
    /// `Persistence` when the lookup itself fails.
    fn find_by_name(&self, name: &str) -> Result<Option<UploadedAsset>>;

    /// Upload a local file and return the created asset records.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Upload`/`Persistence` if it cannot be stored.
    fn upload(&self, file: &FileData, info: &FileInfo) -> Result<Vec<UploadedAsset>>;
}

/// Role permissions
pub trait PermissionStore {
    /// Grant each action id (`api::{type}.{type}.{action}`) to the public role.
    ///
    /// Returns how many grants were newly created.
    ///
    /// # Errors
    ///
    /// `NotFound` if the public role is missing, `Persistence` on backend failure.
    fn grant_public(&self, actions: &[String]) -> Result<usize>;
}

/// Process-wide setup flags, scoped by environment
pub trait SetupStore {
    /// Set `key` to true and return the value it held before, as one atomic step.
    ///
    /// An absent flag reads as false.
    ///
    /// # Errors
    ///
    /// `Persistence` on backend failure.
    fn test_and_set(&self, environment: &str, key: &str) -> Result<bool>;
}
