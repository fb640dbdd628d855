use rusqlite::Connection;
use seedbed_core::SeedOptions;
use std::path::PathBuf;
use tempfile::TempDir;

/// Repository-level demo data directory
#[allow(dead_code)]
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("data")
}

/// Demo dataset file
#[allow(dead_code)]
pub fn demo_data_file() -> PathBuf {
    data_dir().join("data.json")
}

/// Options reading assets from the demo uploads directory
#[allow(dead_code)]
pub fn demo_options() -> SeedOptions {
    SeedOptions {
        assets_dir: data_dir().join("uploads"),
        ..SeedOptions::default()
    }
}

/// Migrated in-memory database plus a scratch media root
#[allow(dead_code)]
pub fn setup_test_db() -> (Connection, TempDir) {
    let conn = seedbed_store::db::open_migrated_in_memory().expect("migrated database");
    (conn, TempDir::new().expect("media root"))
}

/// Write `content` to a seed file named `name` in a fresh directory
#[allow(dead_code)]
pub fn write_seed(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
