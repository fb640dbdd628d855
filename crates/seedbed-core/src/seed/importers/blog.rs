//! Categories, authors and articles

use serde_json::Value;

use crate::content_types::{ARTICLE, AUTHOR, CATEGORY};
use crate::errors::{Result, SeedError};
use crate::model::{slug_of, SeedRecord};
use crate::seed::runner::Seeder;

pub fn import_categories(seeder: &mut Seeder<'_>, categories: &[SeedRecord]) -> Result<()> {
    for category in categories {
        seeder.writer.write(CATEGORY, category.clone())?;
    }
    tracing::info!(count = categories.len(), "imported categories");
    Ok(())
}

/// Authors reference their avatar by file name
pub fn import_authors(seeder: &mut Seeder<'_>, authors: &[SeedRecord]) -> Result<()> {
    for author in authors {
        let avatar_name = author
            .get("avatar")
            .and_then(Value::as_str)
            .ok_or_else(|| SeedError::InvalidField {
                field: "avatar".to_string(),
                reason: "author needs an avatar file name".to_string(),
            })?;
        let avatar = seeder.files.resolve(&[avatar_name])?.to_value()?;

        let mut record = author.clone();
        record.insert("avatar".to_string(), avatar);
        seeder.writer.write(AUTHOR, record)?;
    }
    tracing::info!(count = authors.len(), "imported authors");
    Ok(())
}

/// Articles take their cover from `{slug}.jpg` and are published on import
pub fn import_articles(seeder: &mut Seeder<'_>, articles: &[SeedRecord]) -> Result<()> {
    for article in articles {
        let slug = slug_of(article).ok_or_else(|| SeedError::InvalidField {
            field: "slug".to_string(),
            reason: "article needs a slug to locate its cover".to_string(),
        })?;
        let cover = seeder.files.resolve(&[format!("{}.jpg", slug)])?.to_value()?;

        let mut record = article.clone();
        seeder.rewrite_record_blocks(&mut record)?;
        record.insert("cover".to_string(), cover);
        Seeder::publish(&mut record);
        seeder.writer.write(ARTICLE, record)?;
    }
    tracing::info!(count = articles.len(), "imported articles");
    Ok(())
}
