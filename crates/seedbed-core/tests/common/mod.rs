use seedbed_core::{SeedDataset, SeedOptions};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Write a fake file for every name into a fresh directory
#[allow(dead_code)]
pub fn assets_dir(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in files {
        std::fs::write(dir.path().join(file), format!("bytes of {}", file)).unwrap();
    }
    dir
}

/// Options pointing at `dir`, default failure policy
#[allow(dead_code)]
pub fn options_for(dir: &TempDir) -> SeedOptions {
    SeedOptions {
        assets_dir: dir.path().to_path_buf(),
        ..SeedOptions::default()
    }
}

#[allow(dead_code)]
pub fn dataset(value: Value) -> SeedDataset {
    serde_json::from_value(value).unwrap()
}

/// Every file the full demo dataset references
#[allow(dead_code)]
pub const DEMO_FILES: &[&str] = &[
    "jane.png",
    "sam.png",
    "welcome.jpg",
    "release-day.jpg",
    "coffee-art.jpg",
    "coffee-beans.jpg",
    "favicon.png",
    "default-image.png",
];

/// A dataset touching every family
#[allow(dead_code)]
pub fn demo_dataset() -> SeedDataset {
    dataset(json!({
        "categories": [
            {"name": "News", "slug": "news"},
            {"name": "Tech", "slug": "tech"}
        ],
        "authors": [
            {"name": "Jane", "email": "jane@example.com", "avatar": "jane.png"},
            {"name": "Sam", "email": "sam@example.com", "avatar": "sam.png"}
        ],
        "articles": [
            {
                "title": "Welcome",
                "slug": "welcome",
                "blocks": [
                    {"__component": "shared.rich-text", "body": "Hello"},
                    {"__component": "shared.media", "file": "coffee-art.jpg"}
                ]
            },
            {
                "title": "Release day",
                "slug": "release-day",
                "blocks": [
                    {"__component": "shared.slider", "files": ["coffee-art.jpg", "coffee-beans.jpg"]}
                ]
            }
        ],
        "global": {
            "siteName": "Seedbed",
            "siteDescription": "Demo",
            "defaultSeo": {"metaTitle": "Page", "metaDescription": "Demo page"}
        },
        "about": {
            "title": "About us",
            "blocks": [{"__component": "shared.quote", "title": "Hi", "body": "There"}]
        },
        "knowledgeBase": {
            "global": {"title": "Help center"},
            "audiences": [
                {"name": "Developers", "slug": "devs"},
                {"name": "Operators", "slug": "ops"}
            ],
            "collections": [
                {"title": "Guides", "slug": "guides", "audienceSlugs": ["devs", "ops"]}
            ],
            "articles": [
                {
                    "title": "Intro",
                    "slug": "intro",
                    "audienceSlugs": ["devs"],
                    "collectionSlugs": ["guides"]
                }
            ],
            "releaseNotes": [
                {"title": "v1.0", "slug": "v1-0", "audienceSlugs": ["ops"], "articleSlugs": ["intro"]}
            ]
        }
    }))
}
