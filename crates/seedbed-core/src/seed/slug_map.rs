//! Slug lookup snapshots threaded between knowledge-base phases
//!
//! Each phase builds its map, then hands it on as an immutable snapshot.
//! Later phases borrow earlier snapshots, so the phase order shows up in
//! the function signatures.

use std::collections::BTreeMap;
use std::ops::Deref;

use crate::model::ContentEntry;

/// slug -> created entry, for one content family
#[derive(Debug, Clone, Default)]
pub struct SlugMap {
    entries: BTreeMap<String, ContentEntry>,
}

impl SlugMap {
    /// Record a created entry under its own slug, else the slug of its source record
    pub(crate) fn insert(&mut self, entry: ContentEntry, record_slug: Option<&str>) {
        let key = entry.slug.clone().or_else(|| record_slug.map(str::to_string));
        if let Some(key) = key {
            self.entries.insert(key, entry);
        }
    }

    pub fn get(&self, slug: &str) -> Option<&ContentEntry> {
        self.entries.get(slug)
    }

    /// Entries for the given slugs, in slug order, skipping unknown slugs
    pub fn resolve(&self, slugs: &[String]) -> Vec<&ContentEntry> {
        slugs.iter().filter_map(|slug| self.get(slug)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

macro_rules! snapshot {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $name(SlugMap);

        impl From<SlugMap> for $name {
            fn from(map: SlugMap) -> Self {
                Self(map)
            }
        }

        impl Deref for $name {
            type Target = SlugMap;

            fn deref(&self) -> &SlugMap {
                &self.0
            }
        }
    };
}

snapshot!(
    /// Knowledge-base audiences by slug
    Audiences
);
snapshot!(
    /// Knowledge-base collections by slug
    Collections
);
snapshot!(
    /// Knowledge-base articles by slug
    KbArticles
);
