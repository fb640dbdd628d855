//! Connect already-created entries through relation attributes

use std::time::Instant;

use crate::cms::ContentStore;
use crate::errors::Result;
use crate::model::{ContentEntry, EntryId};
use crate::{log_op_end, log_op_error, log_op_start};

/// Issues additive connect updates
pub struct RelationLinker<'a> {
    store: &'a dyn ContentStore,
    connected: usize,
}

impl<'a> RelationLinker<'a> {
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self {
            store,
            connected: 0,
        }
    }

    /// Connect `children` to `parent` through `attribute`
    ///
    /// Does nothing when the parent has no identity or no child does.
    /// Returns whether a connect update was issued.
    ///
    /// # Errors
    ///
    /// Store failures (unknown attribute, missing entry) propagate.
    pub fn connect(
        &mut self,
        content_type: &str,
        parent: Option<&EntryId>,
        attribute: &str,
        children: &[&ContentEntry],
    ) -> Result<bool> {
        let Some(parent) = parent else {
            return Ok(false);
        };
        let ids: Vec<EntryId> = children.iter().filter_map(|c| c.id().cloned()).collect();
        if ids.is_empty() {
            return Ok(false);
        }

        log_op_start!(
            "connect_relation",
            content_type = content_type,
            attribute = attribute
        );
        let start = Instant::now();

        self.store
            .connect(content_type, parent, attribute, &ids)
            .map_err(|e| {
                let e = e.with_op("connect_relation");
                log_op_error!(
                    "connect_relation",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    content_type = content_type,
                    attribute = attribute
                );
                e
            })?;

        self.connected += ids.len();
        log_op_end!(
            "connect_relation",
            duration_ms = start.elapsed().as_millis() as u64,
            content_type = content_type,
            attribute = attribute,
            children = ids.len()
        );
        Ok(true)
    }

    /// Child identifiers connected so far
    pub fn connected(&self) -> usize {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::ContentStore;
    use crate::content_types::{KB_AUDIENCE, KB_COLLECTION};
    use crate::memory::InMemoryCms;
    use serde_json::json;

    fn create(cms: &InMemoryCms, content_type: &str, value: serde_json::Value) -> ContentEntry {
        cms.create(content_type, value.as_object().cloned().unwrap())
            .unwrap()
    }

    #[test]
    fn test_absent_parent_is_noop() {
        let cms = InMemoryCms::new();
        let devs = create(&cms, KB_AUDIENCE, json!({"name": "Devs", "slug": "devs"}));
        let mut linker = RelationLinker::new(&cms);

        let issued = linker
            .connect(KB_COLLECTION, None, "audiences", &[&devs])
            .unwrap();

        assert!(!issued);
        assert!(cms.connect_calls().is_empty());
    }

    #[test]
    fn test_children_without_identity_are_dropped() {
        let cms = InMemoryCms::new();
        let coll = create(&cms, KB_COLLECTION, json!({"title": "C", "slug": "c"}));
        let anonymous = ContentEntry::new(KB_AUDIENCE, None, None, Default::default());
        let mut linker = RelationLinker::new(&cms);

        let issued = linker
            .connect(KB_COLLECTION, coll.id(), "audiences", &[&anonymous])
            .unwrap();

        assert!(!issued);
        assert!(cms.connect_calls().is_empty());
    }

    #[test]
    fn test_single_update_with_all_children() {
        let cms = InMemoryCms::new();
        let devs = create(&cms, KB_AUDIENCE, json!({"name": "Devs", "slug": "devs"}));
        let ops = create(&cms, KB_AUDIENCE, json!({"name": "Ops", "slug": "ops"}));
        let coll = create(&cms, KB_COLLECTION, json!({"title": "C", "slug": "c"}));
        let mut linker = RelationLinker::new(&cms);

        let issued = linker
            .connect(KB_COLLECTION, coll.id(), "audiences", &[&devs, &ops])
            .unwrap();

        assert!(issued);
        let calls = cms.connect_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].children.len(), 2);
        assert_eq!(linker.connected(), 2);
        assert_eq!(
            cms.related_slugs(&coll, "audiences"),
            vec!["devs".to_string(), "ops".to_string()]
        );
    }

    #[test]
    fn test_unknown_attribute_propagates() {
        let cms = InMemoryCms::new();
        let devs = create(&cms, KB_AUDIENCE, json!({"name": "Devs", "slug": "devs"}));
        let coll = create(&cms, KB_COLLECTION, json!({"title": "C", "slug": "c"}));
        let mut linker = RelationLinker::new(&cms);

        let err = linker
            .connect(KB_COLLECTION, coll.id(), "owners", &[&devs])
            .unwrap_err();

        assert_eq!(err.kind(), crate::errors::ExErrorKind::UnknownRelation);
    }
}
