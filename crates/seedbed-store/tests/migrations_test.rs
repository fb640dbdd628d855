// Integration tests for the migration framework

use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

#[test]
fn test_apply_migrations_on_empty_db() {
    // Given: An empty SQLite database
    let mut conn = setup_test_db();

    // When: Migrations are applied
    let result = seedbed_store::migrations::apply_migrations(&mut conn);

    // Then: All migrations succeed
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    let tables = get_table_names(&conn);
    let expected_tables = vec![
        "core_store",
        "entries",
        "entry_relations",
        "files",
        "permissions",
        "provenance_events",
        "roles",
        "schema_version",
        "sqlite_sequence", // Auto-created by SQLite for AUTOINCREMENT columns
    ];
    assert_eq!(tables, expected_tables);
}

#[test]
fn test_migration_idempotency() {
    // Given: A database with migrations already applied
    let mut conn = setup_test_db();
    seedbed_store::migrations::apply_migrations(&mut conn).unwrap();

    // When: Migrations are re-run
    let result = seedbed_store::migrations::apply_migrations(&mut conn);

    // Then: Re-running succeeds without duplicate version rows
    assert!(result.is_ok(), "Re-running migrations should succeed");
    let version_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version_count, 2);
}

#[test]
fn test_checksum_recorded() {
    let mut conn = setup_test_db();
    seedbed_store::migrations::apply_migrations(&mut conn).unwrap();

    let checksum: String = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            ["001_content_schema"],
            |row| row.get(0),
        )
        .unwrap();

    assert_eq!(checksum.len(), 64, "SHA256 checksum should be 64 hex chars");
}

#[test]
fn test_roles_seeded_once() {
    let mut conn = setup_test_db();
    seedbed_store::migrations::apply_migrations(&mut conn).unwrap();
    seedbed_store::migrations::apply_migrations(&mut conn).unwrap();

    let roles: Vec<String> = conn
        .prepare("SELECT type FROM roles ORDER BY type")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(roles, vec!["authenticated", "public"]);
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap();

    let tables = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();

    tables
}
