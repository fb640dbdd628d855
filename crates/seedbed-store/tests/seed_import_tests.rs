//! Seed Import Tests
//!
//! Imports seed files into a migrated SQLite database.
//!
//! ## Scenarios Covered
//!
//! 1. Full demo import: entries, relations, media rows, blobs, permissions
//! 2. Second import is skipped and writes nothing
//! 3. Provenance events share the dataset digest
//! 4. Missing asset aborts; earlier writes remain and a failure is recorded
//! 5. Environments are gated independently
//! 6. Rejected writes are counted and the rest of the family is imported
//! 7. An already seeded database skips without reading the file
//! 8. A failing provenance write does not mask the import error

mod common;

use common::{demo_data_file, demo_options, setup_test_db, write_seed};
use seedbed_core::content_types::{
    ARTICLE, AUTHOR, CATEGORY, GLOBAL, KB_ARTICLE, KB_COLLECTION, KB_RELEASE_NOTE,
};
use seedbed_core::seed::INIT_HAS_RUN;
use seedbed_core::{ExErrorKind, SeedOptions, SeedOutcome};
use seedbed_store::seed::{import_seed_file, provenance::event_kinds};
use seedbed_store::{SqliteCms, SqliteMediaLibrary};

#[test]
fn test_import_demo_dataset() {
    let (conn, media_root) = setup_test_db();

    let summary =
        import_seed_file(&demo_data_file(), &conn, media_root.path(), &demo_options()).unwrap();

    let SeedOutcome::Imported(report) = summary.outcome else {
        panic!("first import should run");
    };
    assert_eq!(report.total_entries(), 14);
    assert_eq!(report.write_failures, 0);
    assert_eq!(report.assets_uploaded, 8);
    assert_eq!(report.assets_reused, 1);
    assert_eq!(report.permissions_granted, 20);

    let cms = SqliteCms::new(&conn);
    let counts = cms.count_entries().unwrap();
    assert_eq!(counts.get(CATEGORY), Some(&2));
    assert_eq!(counts.get(AUTHOR), Some(&2));
    assert_eq!(counts.get(ARTICLE), Some(&2));
    assert_eq!(counts.get(GLOBAL), Some(&1));
    assert!(cms.read_flag("development", INIT_HAS_RUN).unwrap());
    assert_eq!(cms.public_permissions().unwrap().len(), 20);

    let media = SqliteMediaLibrary::new(&conn, media_root.path());
    assert_eq!(media.count().unwrap(), 8);
}

#[test]
fn test_imported_relations_are_queryable() {
    let (conn, media_root) = setup_test_db();
    import_seed_file(&demo_data_file(), &conn, media_root.path(), &demo_options()).unwrap();
    let cms = SqliteCms::new(&conn);

    let guides = cms.find_one_by_slug(KB_COLLECTION, "guides").unwrap().unwrap();
    let audiences: Vec<_> = cms
        .related(&guides, "audiences")
        .unwrap()
        .into_iter()
        .filter_map(|e| e.slug)
        .collect();
    assert_eq!(audiences, vec!["devs", "ops"]);

    let intro = cms.find_one_by_slug(KB_ARTICLE, "intro").unwrap().unwrap();
    assert_eq!(cms.related(&intro, "collections").unwrap().len(), 1);

    let note = cms.find_one_by_slug(KB_RELEASE_NOTE, "v1-0").unwrap().unwrap();
    let articles = cms.related(&note, "articles").unwrap();
    assert_eq!(articles[0].slug.as_deref(), Some("intro"));
    assert!(note.data.get("articleSlugs").is_none());
    assert!(note.data.get("publishedAt").is_some());
}

#[test]
fn test_uploaded_bytes_round_trip_through_blob_store() {
    let (conn, media_root) = setup_test_db();
    import_seed_file(&demo_data_file(), &conn, media_root.path(), &demo_options()).unwrap();
    let cms = SqliteCms::new(&conn);
    let media = SqliteMediaLibrary::new(&conn, media_root.path());

    let welcome = cms.find_one_by_slug(ARTICLE, "welcome").unwrap().unwrap();
    let cover_id = welcome.data["cover"]["id"].as_i64().unwrap();
    let cover = seedbed_core::MediaLibrary::find_by_name(&media, "welcome")
        .unwrap()
        .unwrap();

    assert_eq!(cover.id, cover_id);
    assert_eq!(cover.mime, "image/jpeg");
    assert!(cover.url.starts_with("/uploads/"));
    let original = std::fs::read(demo_options().assets_dir.join("welcome.jpg")).unwrap();
    assert_eq!(media.read_bytes(&cover).unwrap(), original);
}

#[test]
fn test_second_import_is_skipped() {
    let (conn, media_root) = setup_test_db();
    let options = demo_options();
    let first = import_seed_file(&demo_data_file(), &conn, media_root.path(), &options).unwrap();
    let counts_after_first = SqliteCms::new(&conn).count_entries().unwrap();

    let second = import_seed_file(&demo_data_file(), &conn, media_root.path(), &options).unwrap();

    assert_eq!(second.outcome, SeedOutcome::AlreadySeeded);
    assert_eq!(second.digest, first.digest);
    assert_eq!(SqliteCms::new(&conn).count_entries().unwrap(), counts_after_first);
    assert_eq!(SqliteMediaLibrary::new(&conn, media_root.path()).count().unwrap(), 8);
    assert_eq!(
        event_kinds(&conn, &first.digest).unwrap(),
        vec![
            "seed_import_started",
            "seed_import_completed",
            "seed_import_skipped"
        ]
    );
}

#[test]
fn test_missing_asset_aborts_and_keeps_earlier_writes() {
    let (conn, media_root) = setup_test_db();
    let assets = tempfile::TempDir::new().unwrap();
    let (_dir, path) = write_seed(
        "data.json",
        r#"{
            "categories": [{"name": "News", "slug": "news"}],
            "authors": [{"name": "Jane", "avatar": "jane.png"}]
        }"#,
    );
    let options = SeedOptions {
        assets_dir: assets.path().to_path_buf(),
        ..SeedOptions::default()
    };

    let err = import_seed_file(&path, &conn, media_root.path(), &options).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Io);
    let cms = SqliteCms::new(&conn);
    assert_eq!(cms.count_entries().unwrap().get(CATEGORY), Some(&1));
    assert!(cms.list(AUTHOR).unwrap().is_empty());
    assert!(cms.read_flag("development", INIT_HAS_RUN).unwrap());

    let failed: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM provenance_events WHERE kind = 'seed_import_failed'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(failed, 1);
}

#[test]
fn test_environments_are_gated_independently() {
    let (conn, media_root) = setup_test_db();
    let (_dir, path) = write_seed("data.json", r#"{"categories": [{"name": "News"}]}"#);
    let development = SeedOptions::default();
    let production = SeedOptions {
        environment: "production".to_string(),
        ..SeedOptions::default()
    };

    import_seed_file(&path, &conn, media_root.path(), &development).unwrap();
    let again = import_seed_file(&path, &conn, media_root.path(), &development).unwrap();
    let other = import_seed_file(&path, &conn, media_root.path(), &production).unwrap();

    assert_eq!(again.outcome, SeedOutcome::AlreadySeeded);
    assert!(matches!(other.outcome, SeedOutcome::Imported(_)));
    assert_eq!(
        SqliteCms::new(&conn).count_entries().unwrap().get(CATEGORY),
        Some(&2)
    );
}

#[test]
fn test_duplicate_article_slug_fails_one_write_only() {
    let (conn, media_root) = setup_test_db();
    let (_dir, path) = write_seed(
        "data.json",
        r#"{"articles": [
            {"title": "Welcome", "slug": "welcome", "blocks": []},
            {"title": "Welcome again", "slug": "welcome", "blocks": []},
            {"title": "Release day", "slug": "release-day", "blocks": []}
        ]}"#,
    );

    let summary = import_seed_file(&path, &conn, media_root.path(), &demo_options()).unwrap();

    let SeedOutcome::Imported(report) = summary.outcome else {
        panic!("first import should run");
    };
    assert_eq!(report.write_failures, 1);
    let cms = SqliteCms::new(&conn);
    let slugs: Vec<_> = cms
        .list(ARTICLE)
        .unwrap()
        .into_iter()
        .filter_map(|e| e.slug)
        .collect();
    assert_eq!(slugs, vec!["welcome", "release-day"]);
    let kept = cms.find_one_by_slug(ARTICLE, "welcome").unwrap().unwrap();
    assert_eq!(kept.data["title"], "Welcome");
}

#[test]
fn test_release_note_without_slug_is_written() {
    let (conn, media_root) = setup_test_db();
    let (_dir, path) = write_seed(
        "data.json",
        r#"{"knowledgeBase": {"releaseNotes": [{"title": "v1"}]}}"#,
    );

    let summary = import_seed_file(&path, &conn, media_root.path(), &demo_options()).unwrap();

    let SeedOutcome::Imported(report) = summary.outcome else {
        panic!("first import should run");
    };
    assert_eq!(report.write_failures, 0);
    let notes = SqliteCms::new(&conn).list(KB_RELEASE_NOTE).unwrap();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].slug.is_none());
}

#[test]
fn test_already_seeded_skips_unreadable_file() {
    let (conn, media_root) = setup_test_db();
    let options = demo_options();
    import_seed_file(&demo_data_file(), &conn, media_root.path(), &options).unwrap();
    let (_dir, broken) = write_seed("data.json", "{ not json");

    let summary = import_seed_file(&broken, &conn, media_root.path(), &options).unwrap();
    assert_eq!(summary.outcome, SeedOutcome::AlreadySeeded);
    assert_eq!(
        event_kinds(&conn, &summary.digest).unwrap(),
        vec!["seed_import_skipped"]
    );

    let missing = broken.with_file_name("absent.json");
    let summary = import_seed_file(&missing, &conn, media_root.path(), &options).unwrap();
    assert_eq!(summary.outcome, SeedOutcome::AlreadySeeded);
}

#[test]
fn test_failed_provenance_write_keeps_import_error() {
    let (conn, media_root) = setup_test_db();
    conn.execute_batch(
        "CREATE TRIGGER reject_failed_events BEFORE INSERT ON provenance_events
         WHEN NEW.kind = 'seed_import_failed'
         BEGIN SELECT RAISE(ABORT, 'provenance unavailable'); END;",
    )
    .unwrap();
    let assets = tempfile::TempDir::new().unwrap();
    let (_dir, path) = write_seed(
        "data.json",
        r#"{"authors": [{"name": "Jane", "avatar": "jane.png"}]}"#,
    );
    let options = SeedOptions {
        assets_dir: assets.path().to_path_buf(),
        ..SeedOptions::default()
    };

    let err = import_seed_file(&path, &conn, media_root.path(), &options).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Io);
}
