//! In-memory content backend
//!
//! Implements every `cms` trait over plain collections behind a `RefCell`.
//! Used for dry runs and for exercising the pipeline in tests. Not
//! thread-safe; the seed pipeline is single-threaded.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::cms::{ContentStore, MediaLibrary, PermissionStore, SetupStore};
use crate::content_types;
use crate::errors::{Result, SeedError};
use crate::model::{ContentEntry, EntryId, FileData, FileInfo, SeedRecord, UploadedAsset};

/// A recorded `connect` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectCall {
    pub content_type: String,
    pub parent: EntryId,
    pub attribute: String,
    pub children: Vec<EntryId>,
}

#[derive(Debug, Default)]
struct State {
    entries: Vec<ContentEntry>,
    /// (parent document id, attribute) -> connected child document ids
    relations: BTreeMap<(String, String), BTreeSet<String>>,
    files: Vec<UploadedAsset>,
    flags: HashMap<(String, String), bool>,
    public_permissions: BTreeSet<String>,
    connect_calls: Vec<ConnectCall>,
    upload_calls: Vec<String>,
    writes: usize,
}

/// In-memory implementation of the content, media, permission and setup stores
#[derive(Debug, Default)]
pub struct InMemoryCms {
    state: RefCell<State>,
}

impl InMemoryCms {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset as already present in the media library
    pub fn with_existing_asset(self, name: &str, ext: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let id = state.files.len() as i64 + 1;
            state.files.push(UploadedAsset {
                id,
                document_id: uuid::Uuid::now_v7().to_string(),
                name: name.to_string(),
                alternative_text: None,
                caption: None,
                ext: ext.to_string(),
                mime: String::new(),
                size: 0,
                hash: format!("preexisting-{}", name),
                url: format!("/uploads/{}{}", name, ext),
            });
        }
        self
    }

    /// Entries of one content type, in creation order
    pub fn entries(&self, content_type: &str) -> Vec<ContentEntry> {
        self.state
            .borrow()
            .entries
            .iter()
            .filter(|e| e.content_type == content_type)
            .cloned()
            .collect()
    }

    /// Entry of `content_type` with the given slug
    pub fn entry_by_slug(&self, content_type: &str, slug: &str) -> Option<ContentEntry> {
        self.state
            .borrow()
            .entries
            .iter()
            .find(|e| e.content_type == content_type && e.slug.as_deref() == Some(slug))
            .cloned()
    }

    /// Slugs connected to `parent` through `attribute`, sorted
    pub fn related_slugs(&self, parent: &ContentEntry, attribute: &str) -> Vec<String> {
        let state = self.state.borrow();
        let Some(parent_doc) = parent.document_id.clone() else {
            return Vec::new();
        };
        let Some(children) = state.relations.get(&(parent_doc, attribute.to_string())) else {
            return Vec::new();
        };
        let mut slugs: Vec<String> = state
            .entries
            .iter()
            .filter(|e| {
                e.document_id
                    .as_ref()
                    .map(|d| children.contains(d))
                    .unwrap_or(false)
            })
            .filter_map(|e| e.slug.clone())
            .collect();
        slugs.sort();
        slugs
    }

    /// Every `connect` call received, in order
    pub fn connect_calls(&self) -> Vec<ConnectCall> {
        self.state.borrow().connect_calls.clone()
    }

    /// File names passed to `upload`, in order
    pub fn upload_calls(&self) -> Vec<String> {
        self.state.borrow().upload_calls.clone()
    }

    /// Public permission action ids
    pub fn public_permissions(&self) -> Vec<String> {
        self.state
            .borrow()
            .public_permissions
            .iter()
            .cloned()
            .collect()
    }

    /// Number of content, media and permission writes performed (setup flags excluded)
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    /// Total entries across all content types
    pub fn entry_count(&self) -> usize {
        self.state.borrow().entries.len()
    }
}

fn document_id_of(state: &State, content_type: &str, id: &EntryId) -> Result<String> {
    state
        .entries
        .iter()
        .filter(|e| e.content_type == content_type)
        .find(|e| match id {
            EntryId::Document(doc) => e.document_id.as_deref() == Some(doc.as_str()),
            EntryId::Row(row) => e.row_id == Some(*row),
        })
        .and_then(|e| e.document_id.clone())
        .ok_or_else(|| {
            SeedError::EntryNotFound {
                content_type: content_type.to_string(),
                entry_id: id.to_string(),
            }
            .into()
        })
}

impl ContentStore for InMemoryCms {
    fn create(&self, content_type: &str, data: SeedRecord) -> Result<ContentEntry> {
        let schema = content_types::lookup(content_type)?;
        schema.validate(&data)?;

        let mut state = self.state.borrow_mut();
        let existing = state
            .entries
            .iter()
            .filter(|e| e.content_type == content_type);
        if schema.is_single() && existing.clone().next().is_some() {
            return Err(SeedError::SingleTypeOccupied {
                content_type: content_type.to_string(),
            }
            .into());
        }
        if let Some(slug) = crate::model::slug_of(&data) {
            if existing.clone().any(|e| e.slug.as_deref() == Some(slug)) {
                return Err(SeedError::DuplicateSlug {
                    content_type: content_type.to_string(),
                    slug: slug.to_string(),
                }
                .into());
            }
        }

        let row_id = state.entries.len() as i64 + 1;
        let entry = ContentEntry::new(
            content_type,
            Some(row_id),
            Some(uuid::Uuid::now_v7().to_string()),
            data,
        );
        state.entries.push(entry.clone());
        state.writes += 1;
        Ok(entry)
    }

    fn connect(
        &self,
        content_type: &str,
        parent: &EntryId,
        attribute: &str,
        children: &[EntryId],
    ) -> Result<()> {
        let relation = content_types::lookup(content_type)?.relation(attribute)?;

        let mut state = self.state.borrow_mut();
        state.connect_calls.push(ConnectCall {
            content_type: content_type.to_string(),
            parent: parent.clone(),
            attribute: attribute.to_string(),
            children: children.to_vec(),
        });

        let parent_doc = document_id_of(&state, content_type, parent)?;
        let child_docs = children
            .iter()
            .map(|child| document_id_of(&state, relation.target, child))
            .collect::<Result<Vec<_>>>()?;

        state
            .relations
            .entry((parent_doc, attribute.to_string()))
            .or_default()
            .extend(child_docs);
        state.writes += 1;
        Ok(())
    }
}

impl MediaLibrary for InMemoryCms {
    fn find_by_name(&self, name: &str) -> Result<Option<UploadedAsset>> {
        Ok(self
            .state
            .borrow()
            .files
            .iter()
            .find(|f| f.name == name)
            .cloned())
    }

    fn upload(&self, file: &FileData, info: &FileInfo) -> Result<Vec<UploadedAsset>> {
        let mut state = self.state.borrow_mut();
        state.upload_calls.push(file.original_file_name.clone());

        let ext = file
            .original_file_name
            .rfind('.')
            .map(|i| file.original_file_name[i..].to_string())
            .unwrap_or_default();
        let id = state.files.len() as i64 + 1;
        let asset = UploadedAsset {
            id,
            document_id: uuid::Uuid::now_v7().to_string(),
            name: info.name.clone(),
            alternative_text: Some(info.alternative_text.clone()),
            caption: Some(info.caption.clone()),
            url: format!("/uploads/{}{}", info.name, ext),
            ext,
            mime: file.mime_type.clone(),
            size: file.size,
            hash: format!("memory-{}", id),
        };
        state.files.push(asset.clone());
        state.writes += 1;
        Ok(vec![asset])
    }
}

impl PermissionStore for InMemoryCms {
    fn grant_public(&self, actions: &[String]) -> Result<usize> {
        let mut state = self.state.borrow_mut();
        let mut created = 0;
        for action in actions {
            if state.public_permissions.insert(action.clone()) {
                created += 1;
            }
        }
        state.writes += created;
        Ok(created)
    }
}

impl SetupStore for InMemoryCms {
    fn test_and_set(&self, environment: &str, key: &str) -> Result<bool> {
        let mut state = self.state.borrow_mut();
        let previous = state
            .flags
            .insert((environment.to_string(), key.to_string()), true);
        Ok(previous.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use serde_json::json;

    fn record(value: serde_json::Value) -> SeedRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_create_rejects_duplicate_slug() {
        let cms = InMemoryCms::new();
        cms.create("category", record(json!({"name": "News", "slug": "news"})))
            .unwrap();

        let err = cms
            .create("category", record(json!({"name": "News 2", "slug": "news"})))
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
        assert_eq!(cms.entries("category").len(), 1);
    }

    #[test]
    fn test_single_type_holds_one_entry() {
        let cms = InMemoryCms::new();
        cms.create("about", record(json!({"title": "About"}))).unwrap();
        let err = cms.create("about", record(json!({"title": "Again"}))).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    }

    #[test]
    fn test_connect_is_additive_and_deduplicated() {
        let cms = InMemoryCms::new();
        let devs = cms
            .create(
                "knowledge-base-audience",
                record(json!({"name": "Developers", "slug": "devs"})),
            )
            .unwrap();
        let coll = cms
            .create(
                "knowledge-base-collection",
                record(json!({"title": "Guides", "slug": "guides"})),
            )
            .unwrap();

        let parent = coll.id().unwrap().clone();
        let child = devs.id().unwrap().clone();
        cms.connect("knowledge-base-collection", &parent, "audiences", &[child.clone()])
            .unwrap();
        cms.connect("knowledge-base-collection", &parent, "audiences", &[child])
            .unwrap();

        assert_eq!(cms.related_slugs(&coll, "audiences"), vec!["devs".to_string()]);
        assert_eq!(cms.connect_calls().len(), 2);
    }

    #[test]
    fn test_connect_unknown_child_fails() {
        let cms = InMemoryCms::new();
        let coll = cms
            .create(
                "knowledge-base-collection",
                record(json!({"title": "Guides", "slug": "guides"})),
            )
            .unwrap();

        let err = cms
            .connect(
                "knowledge-base-collection",
                coll.id().unwrap(),
                "audiences",
                &[EntryId::Document("missing".to_string())],
            )
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }

    #[test]
    fn test_test_and_set_reports_previous_value() {
        let cms = InMemoryCms::new();
        assert!(!cms.test_and_set("development", "initHasRun").unwrap());
        assert!(cms.test_and_set("development", "initHasRun").unwrap());
        assert!(!cms.test_and_set("production", "initHasRun").unwrap());
        assert_eq!(cms.write_count(), 0);
    }
}
