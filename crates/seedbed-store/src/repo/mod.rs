//! Repository layer: SQLite-backed content, media, permission and setup stores

pub mod media;
pub mod sqlite_cms;

pub use media::SqliteMediaLibrary;
pub use sqlite_cms::SqliteCms;
