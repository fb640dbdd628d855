//! Persisted content entries

use crate::model::record::{slug_of, SeedRecord};
use serde::{Deserialize, Serialize};

/// Canonical identity of a persisted entry
///
/// The document id is stable across drafts and locales and wins whenever the
/// store provides one; the row id is the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryId {
    Document(String),
    Row(i64),
}

impl EntryId {
    /// Pick the canonical identity from the identifiers a store returned
    ///
    /// Empty document ids and non-positive row ids count as absent.
    pub fn from_parts(document_id: Option<&str>, row_id: Option<i64>) -> Option<Self> {
        match (document_id.filter(|d| !d.is_empty()), row_id) {
            (Some(doc), _) => Some(EntryId::Document(doc.to_string())),
            (None, Some(row)) if row > 0 => Some(EntryId::Row(row)),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryId::Document(doc) => write!(f, "{}", doc),
            EntryId::Row(row) => write!(f, "#{}", row),
        }
    }
}

/// An entry returned by a content store
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    pub content_type: String,
    pub row_id: Option<i64>,
    pub document_id: Option<String>,
    pub slug: Option<String>,
    pub data: SeedRecord,
    id: Option<EntryId>,
}

impl ContentEntry {
    /// Build an entry, deriving its slug from `data` and its identity from the ids
    pub fn new(
        content_type: impl Into<String>,
        row_id: Option<i64>,
        document_id: Option<String>,
        data: SeedRecord,
    ) -> Self {
        let id = EntryId::from_parts(document_id.as_deref(), row_id);
        let slug = slug_of(&data).map(str::to_string);
        Self {
            content_type: content_type.into(),
            row_id,
            document_id,
            slug,
            data,
            id,
        }
    }

    /// Canonical identity, if the store supplied any identifier
    pub fn id(&self) -> Option<&EntryId> {
        self.id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_id_preferred_over_row_id() {
        let id = EntryId::from_parts(Some("doc-1"), Some(5));
        assert_eq!(id, Some(EntryId::Document("doc-1".to_string())));
    }

    #[test]
    fn test_row_id_fallback() {
        assert_eq!(EntryId::from_parts(None, Some(5)), Some(EntryId::Row(5)));
        assert_eq!(EntryId::from_parts(Some(""), Some(5)), Some(EntryId::Row(5)));
    }

    #[test]
    fn test_no_identifier() {
        assert_eq!(EntryId::from_parts(None, None), None);
        assert_eq!(EntryId::from_parts(Some(""), Some(0)), None);
    }

    #[test]
    fn test_entry_carries_slug_and_identity() {
        let data = json!({"slug": "getting-started", "title": "Getting started"});
        let entry = ContentEntry::new(
            "knowledge-base-article",
            Some(3),
            Some("abc".to_string()),
            data.as_object().cloned().unwrap(),
        );

        assert_eq!(entry.slug.as_deref(), Some("getting-started"));
        assert_eq!(entry.id(), Some(&EntryId::Document("abc".to_string())));
    }
}
