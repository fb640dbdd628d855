//! Dry-run demonstration
//!
//! Seeds a small dataset into the in-memory backend twice and prints what
//! each run did. Run from the repository root so `data/uploads` resolves:
//!
//! ```text
//! cargo run -p seedbed-core --example dry_run
//! ```

use seedbed_core::content_types::{KB_AUDIENCE, KB_COLLECTION};
use seedbed_core::seed::SeedBackends;
use seedbed_core::{seed_once, InMemoryCms, SeedDataset, SeedOptions, SeedOutcome};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Seedbed Dry Run ===\n");

    let dataset: SeedDataset = serde_json::from_value(json!({
        "categories": [{"name": "News", "slug": "news"}],
        "knowledgeBase": {
            "audiences": [
                {"name": "Developers", "slug": "devs"},
                {"name": "Operators", "slug": "ops"}
            ],
            "collections": [
                {"title": "Guides", "slug": "guides", "audienceSlugs": ["devs", "missing"]}
            ]
        }
    }))?;

    let cms = InMemoryCms::new();
    let options = SeedOptions::default();

    for run in 1..=2 {
        match seed_once(&dataset, SeedBackends::single(&cms), &options)? {
            SeedOutcome::Imported(report) => {
                println!("Run {}: imported {} entries", run, report.total_entries());
                for (content_type, count) in &report.entries_created {
                    println!("  {}: {}", content_type, count);
                }
                println!("  relations connected: {}", report.relations_connected);
            }
            SeedOutcome::AlreadySeeded => println!("Run {}: already seeded, nothing written", run),
        }
    }

    if let Some(guides) = cms.entry_by_slug(KB_COLLECTION, "guides") {
        // "missing" is dropped; only known audiences are linked
        println!(
            "\nguides -> {:?} (of {} audiences)",
            cms.related_slugs(&guides, "audiences"),
            cms.entries(KB_AUDIENCE).len()
        );
    }

    Ok(())
}
