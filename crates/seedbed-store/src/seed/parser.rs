//! Seed parser with validation
//!
//! Parses JSON or YAML by file extension and validates the shapes the
//! importers rely on before anything is written.

#![allow(clippy::result_large_err)]

use crate::errors::{seed_validation, Result};
use seedbed_core::model::{slug_of, SeedRecord};
use seedbed_core::seed::block_rewriter::{COMPONENT_KEY, MEDIA_COMPONENT, SLIDER_COMPONENT};
use seedbed_core::seed::SeedDataset;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Serialization of a seed document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Yaml,
}

impl SeedFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(SeedFormat::Json),
            Some("yaml") | Some("yml") => Ok(SeedFormat::Yaml),
            other => Err(seed_validation(&format!(
                "Unsupported seed file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedDataset> {
    let format = SeedFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| {
        seed_validation(&format!("Failed to read seed file {}: {}", path.display(), e))
    })?;

    parse_seed_str(&content, format)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str, format: SeedFormat) -> Result<SeedDataset> {
    let dataset: SeedDataset = match format {
        SeedFormat::Json => serde_json::from_str(content)
            .map_err(|e| seed_validation(&format!("JSON parse error: {}", e)))?,
        SeedFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?,
    };

    validate_dataset(&dataset)?;

    Ok(dataset)
}

/// Validate a parsed dataset
pub fn validate_dataset(dataset: &SeedDataset) -> Result<()> {
    for (i, author) in dataset.authors.iter().enumerate() {
        if !author.get("avatar").map(Value::is_string).unwrap_or(false) {
            return Err(seed_validation(&format!(
                "authors[{}].avatar must be a file name",
                i
            )));
        }
    }

    for (i, article) in dataset.articles.iter().enumerate() {
        if slug_of(article).is_none() {
            return Err(seed_validation(&format!(
                "articles[{}].slug must be a non-empty string",
                i
            )));
        }
        validate_blocks(&format!("articles[{}]", i), article)?;
    }
    if let Some(about) = &dataset.about {
        validate_blocks("about", about)?;
    }

    if let Some(kb) = &dataset.knowledge_base {
        let families = [
            ("knowledgeBase.audiences", &kb.audiences),
            ("knowledgeBase.collections", &kb.collections),
            ("knowledgeBase.articles", &kb.articles),
            ("knowledgeBase.releaseNotes", &kb.release_notes),
        ];
        for (family, records) in families {
            let records = records.as_deref().unwrap_or_default();
            for (i, record) in records.iter().enumerate() {
                for field in ["audienceSlugs", "collectionSlugs", "articleSlugs"] {
                    validate_slug_list(&format!("{}[{}].{}", family, i, field), record.get(field))?;
                }
            }
        }
    }

    Ok(())
}

fn validate_slug_list(path: &str, value: Option<&Value>) -> Result<()> {
    match value {
        None => Ok(()),
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => Ok(()),
        Some(_) => Err(seed_validation(&format!(
            "{} must be a list of slugs",
            path
        ))),
    }
}

fn validate_blocks(path: &str, record: &SeedRecord) -> Result<()> {
    let blocks = match record.get("blocks") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(blocks)) => blocks,
        Some(_) => {
            return Err(seed_validation(&format!(
                "{}.blocks must be a list",
                path
            )))
        }
    };

    for (i, block) in blocks.iter().enumerate() {
        let ok = match block.get(COMPONENT_KEY).and_then(Value::as_str) {
            Some(MEDIA_COMPONENT) => block.get("file").map(Value::is_string).unwrap_or(false),
            Some(SLIDER_COMPONENT) => block
                .get("files")
                .and_then(Value::as_array)
                .map(|files| files.iter().all(Value::is_string))
                .unwrap_or(false),
            _ => true,
        };
        if !ok {
            return Err(seed_validation(&format!(
                "{}.blocks[{}] references its files incorrectly",
                path, i
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedbed_core::ExErrorKind;

    #[test]
    fn test_parse_json_seed() {
        let json = r#"{
            "categories": [{"name": "News", "slug": "news"}],
            "authors": [{"name": "Jane", "avatar": "jane.png"}],
            "articles": [{"title": "Hi", "slug": "hi", "blocks": []}]
        }"#;

        let dataset = parse_seed_str(json, SeedFormat::Json).unwrap();
        assert_eq!(dataset.record_count(), 3);
    }

    #[test]
    fn test_parse_yaml_seed() {
        let yaml = r#"
categories:
  - name: News
    slug: news
knowledgeBase:
  audiences:
    - name: Developers
      slug: devs
  collections:
    - title: Guides
      slug: guides
      audienceSlugs: [devs]
"#;

        let dataset = parse_seed_str(yaml, SeedFormat::Yaml).unwrap();
        let kb = dataset.knowledge_base.unwrap();
        assert_eq!(kb.collections.unwrap()[0]["audienceSlugs"][0], "devs");
    }

    #[test]
    fn test_reject_author_without_avatar() {
        let err = parse_seed_str(r#"{"authors": [{"name": "Jane"}]}"#, SeedFormat::Json)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidSeed);
        assert!(err.to_string().contains("avatar"));
    }

    #[test]
    fn test_duplicate_and_missing_kb_slugs_are_left_to_the_store() {
        let json = r#"{"knowledgeBase": {
            "audiences": [
                {"name": "A", "slug": "same"},
                {"name": "B", "slug": "same"}
            ],
            "releaseNotes": [{"title": "v1"}]
        }}"#;

        let dataset = parse_seed_str(json, SeedFormat::Json).unwrap();
        assert_eq!(dataset.record_count(), 3);
    }

    #[test]
    fn test_reject_article_without_slug() {
        let err = parse_seed_str(r#"{"articles": [{"title": "Hi"}]}"#, SeedFormat::Json)
            .unwrap_err();
        assert!(err.to_string().contains("articles[0].slug"));
    }

    #[test]
    fn test_reject_non_string_slug_list() {
        let json = r#"{"knowledgeBase": {"articles": [
            {"title": "A", "slug": "a", "audienceSlugs": [1, 2]}
        ]}}"#;

        let err = parse_seed_str(json, SeedFormat::Json).unwrap_err();
        assert!(err.to_string().contains("audienceSlugs"));
    }

    #[test]
    fn test_reject_media_block_without_file() {
        let json = r#"{"about": {"title": "About", "blocks": [
            {"__component": "shared.media"}
        ]}}"#;

        let err = parse_seed_str(json, SeedFormat::Json).unwrap_err();
        assert!(err.to_string().contains("about.blocks[0]"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = SeedFormat::from_path(Path::new("seed.toml")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidSeed);
    }
}
