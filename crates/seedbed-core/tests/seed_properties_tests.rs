//! Seed Pipeline Property Tests
//!
//! - Re-running the gated pipeline never writes again
//! - Each distinct base name is uploaded at most once per run

mod common;

use common::{assets_dir, dataset};
use proptest::prelude::*;
use seedbed_core::seed::SeedBackends;
use seedbed_core::{seed_once, InMemoryCms, SeedOptions, SeedOutcome};
use serde_json::json;
use std::collections::BTreeSet;

const NAMES: &[&str] = &["alpha.png", "beta.jpg", "gamma.png", "alpha.jpg", "delta.webp"];

fn author_dataset(avatars: &[&str]) -> seedbed_core::SeedDataset {
    let authors: Vec<_> = avatars
        .iter()
        .enumerate()
        .map(|(i, avatar)| json!({"name": format!("Author {}", i), "avatar": avatar}))
        .collect();
    dataset(json!({ "authors": authors }))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_each_base_name_uploaded_once(picks in prop::collection::vec(0..NAMES.len(), 0..12)) {
        let avatars: Vec<&str> = picks.iter().map(|i| NAMES[*i]).collect();
        let dir = assets_dir(NAMES);
        let cms = InMemoryCms::new();
        let options = SeedOptions {
            assets_dir: dir.path().to_path_buf(),
            ..SeedOptions::default()
        };

        seed_once(&author_dataset(&avatars), SeedBackends::single(&cms), &options).unwrap();

        let uploads = cms.upload_calls();
        let bases: BTreeSet<_> = uploads
            .iter()
            .map(|name| name.split('.').next().unwrap_or_default().to_string())
            .collect();
        prop_assert_eq!(bases.len(), uploads.len());

        let expected: BTreeSet<_> = avatars
            .iter()
            .map(|name| name.split('.').next().unwrap_or_default().to_string())
            .collect();
        prop_assert_eq!(bases, expected);
    }

    #[test]
    fn prop_rerun_never_writes(runs in 2usize..5, picks in prop::collection::vec(0..NAMES.len(), 1..6)) {
        let avatars: Vec<&str> = picks.iter().map(|i| NAMES[*i]).collect();
        let dir = assets_dir(NAMES);
        let cms = InMemoryCms::new();
        let options = SeedOptions {
            assets_dir: dir.path().to_path_buf(),
            ..SeedOptions::default()
        };
        let data = author_dataset(&avatars);

        let first = seed_once(&data, SeedBackends::single(&cms), &options).unwrap();
        prop_assert!(matches!(first, SeedOutcome::Imported(_)));
        let writes = cms.write_count();

        for _ in 1..runs {
            let again = seed_once(&data, SeedBackends::single(&cms), &options).unwrap();
            prop_assert_eq!(again, SeedOutcome::AlreadySeeded);
        }
        prop_assert_eq!(cms.write_count(), writes);
        prop_assert_eq!(cms.entry_count(), avatars.len());
    }
}
