//! Seed dataset shape
//!
//! The dataset is keyed by content family. Every family is optional so that
//! partial datasets (for example a knowledge base only) still load.

use crate::model::SeedRecord;
use serde::{Deserialize, Serialize};

/// The full seed document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedDataset {
    pub categories: Vec<SeedRecord>,
    pub authors: Vec<SeedRecord>,
    pub articles: Vec<SeedRecord>,
    pub global: Option<SeedRecord>,
    pub about: Option<SeedRecord>,
    pub knowledge_base: Option<KnowledgeBaseSeed>,
}

/// The knowledge-base graph: global settings, audiences, collections, articles, release notes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeBaseSeed {
    pub global: Option<SeedRecord>,
    pub audiences: Option<Vec<SeedRecord>>,
    pub collections: Option<Vec<SeedRecord>>,
    pub articles: Option<Vec<SeedRecord>>,
    pub release_notes: Option<Vec<SeedRecord>>,
}

impl SeedDataset {
    /// Number of records across all families
    pub fn record_count(&self) -> usize {
        let kb = self.knowledge_base.as_ref().map_or(0, |kb| {
            usize::from(kb.global.is_some())
                + kb.audiences.as_ref().map_or(0, Vec::len)
                + kb.collections.as_ref().map_or(0, Vec::len)
                + kb.articles.as_ref().map_or(0, Vec::len)
                + kb.release_notes.as_ref().map_or(0, Vec::len)
        });
        self.categories.len()
            + self.authors.len()
            + self.articles.len()
            + usize::from(self.global.is_some())
            + usize::from(self.about.is_some())
            + kb
    }
}
