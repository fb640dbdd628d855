//! Knowledge-base graph
//!
//! Phases run in a fixed order: global, audiences, collections, articles,
//! release notes. Each phase that later phases link against returns a slug
//! snapshot; a missing family yields an empty snapshot. Relations are
//! connected only after the entry that owns them was created, and only to
//! entries present in the snapshot.

#![allow(clippy::result_large_err)]

use crate::content_types::{KB_ARTICLE, KB_AUDIENCE, KB_COLLECTION, KB_GLOBAL, KB_RELEASE_NOTE};
use crate::errors::Result;
use crate::model::{slug_of, take_slugs, SeedRecord};
use crate::seed::dataset::KnowledgeBaseSeed;
use crate::seed::runner::Seeder;
use crate::seed::slug_map::{Audiences, Collections, KbArticles, SlugMap};

pub fn import_knowledge_base(seeder: &mut Seeder<'_>, kb: &KnowledgeBaseSeed) -> Result<()> {
    if let Some(global) = &kb.global {
        import_global(seeder, global)?;
    }
    let audiences = import_audiences(seeder, kb.audiences.as_deref().unwrap_or_default())?;
    let collections = import_collections(
        seeder,
        kb.collections.as_deref().unwrap_or_default(),
        &audiences,
    )?;
    let articles = import_articles(
        seeder,
        kb.articles.as_deref().unwrap_or_default(),
        &audiences,
        &collections,
    )?;
    import_release_notes(
        seeder,
        kb.release_notes.as_deref().unwrap_or_default(),
        &audiences,
        &articles,
    )?;

    tracing::info!(
        audiences = audiences.len(),
        collections = collections.len(),
        articles = articles.len(),
        "imported knowledge base"
    );
    Ok(())
}

fn import_global(seeder: &mut Seeder<'_>, global: &SeedRecord) -> Result<()> {
    let mut record = global.clone();
    Seeder::publish(&mut record);
    seeder.writer.write(KB_GLOBAL, record)?;
    Ok(())
}

pub fn import_audiences(seeder: &mut Seeder<'_>, records: &[SeedRecord]) -> Result<Audiences> {
    let mut map = SlugMap::default();
    for audience in records {
        let record_slug = slug_of(audience).map(str::to_string);
        let mut record = audience.clone();
        Seeder::publish(&mut record);

        if let Some(created) = seeder.writer.write(KB_AUDIENCE, record)? {
            map.insert(created, record_slug.as_deref());
        }
    }
    Ok(map.into())
}

pub fn import_collections(
    seeder: &mut Seeder<'_>,
    records: &[SeedRecord],
    audiences: &Audiences,
) -> Result<Collections> {
    let mut map = SlugMap::default();
    for collection in records {
        let record_slug = slug_of(collection).map(str::to_string);
        let mut record = collection.clone();
        let audience_slugs = take_slugs(&mut record, "audienceSlugs");
        Seeder::publish(&mut record);

        let Some(created) = seeder.writer.write(KB_COLLECTION, record)? else {
            continue;
        };
        seeder.linker.connect(
            KB_COLLECTION,
            created.id(),
            "audiences",
            &audiences.resolve(&audience_slugs),
        )?;
        map.insert(created, record_slug.as_deref());
    }
    Ok(map.into())
}

pub fn import_articles(
    seeder: &mut Seeder<'_>,
    records: &[SeedRecord],
    audiences: &Audiences,
    collections: &Collections,
) -> Result<KbArticles> {
    let mut map = SlugMap::default();
    for article in records {
        let record_slug = slug_of(article).map(str::to_string);
        let mut record = article.clone();
        let audience_slugs = take_slugs(&mut record, "audienceSlugs");
        let collection_slugs = take_slugs(&mut record, "collectionSlugs");
        Seeder::publish(&mut record);

        let Some(created) = seeder.writer.write(KB_ARTICLE, record)? else {
            continue;
        };
        seeder.linker.connect(
            KB_ARTICLE,
            created.id(),
            "audiences",
            &audiences.resolve(&audience_slugs),
        )?;
        seeder.linker.connect(
            KB_ARTICLE,
            created.id(),
            "collections",
            &collections.resolve(&collection_slugs),
        )?;
        map.insert(created, record_slug.as_deref());
    }
    Ok(map.into())
}

pub fn import_release_notes(
    seeder: &mut Seeder<'_>,
    records: &[SeedRecord],
    audiences: &Audiences,
    articles: &KbArticles,
) -> Result<()> {
    for note in records {
        let mut record = note.clone();
        let audience_slugs = take_slugs(&mut record, "audienceSlugs");
        let article_slugs = take_slugs(&mut record, "articleSlugs");
        Seeder::publish(&mut record);

        let Some(created) = seeder.writer.write(KB_RELEASE_NOTE, record)? else {
            continue;
        };
        seeder.linker.connect(
            KB_RELEASE_NOTE,
            created.id(),
            "audiences",
            &audiences.resolve(&audience_slugs),
        )?;
        seeder.linker.connect(
            KB_RELEASE_NOTE,
            created.id(),
            "articles",
            &articles.resolve(&article_slugs),
        )?;
    }
    Ok(())
}
