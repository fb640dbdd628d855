//! Content-type schema registry
//!
//! Declares every content type the seed pipeline and the HTTP API know
//! about. Stores consult it before accepting a create or connect so that the
//! in-memory and SQLite backends reject the same inputs.

use crate::errors::{Result, SeedError};
use crate::model::SeedRecord;
use serde_json::Value;

pub const CATEGORY: &str = "category";
pub const AUTHOR: &str = "author";
pub const ARTICLE: &str = "article";
pub const GLOBAL: &str = "global";
pub const ABOUT: &str = "about";
pub const KB_GLOBAL: &str = "knowledge-base-global";
pub const KB_AUDIENCE: &str = "knowledge-base-audience";
pub const KB_COLLECTION: &str = "knowledge-base-collection";
pub const KB_ARTICLE: &str = "knowledge-base-article";
pub const KB_RELEASE_NOTE: &str = "knowledge-base-release-note";
pub const WELCOME_GUIDE: &str = "welcome-guide";
pub const WELCOME_GUIDE_SECTION: &str = "welcome-guide-section";
pub const WELCOME_GUIDE_RESOURCE: &str = "welcome-guide-resource";

/// Collection types hold many entries; single types hold at most one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Collection,
    Single,
}

/// A relation attribute and the content type it points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationSpec {
    pub attribute: &'static str,
    pub target: &'static str,
}

/// Declared shape of one content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentTypeSchema {
    pub uid: &'static str,
    pub kind: ContentKind,
    pub required: &'static [&'static str],
    pub relations: &'static [RelationSpec],
}

const fn rel(attribute: &'static str, target: &'static str) -> RelationSpec {
    RelationSpec { attribute, target }
}

static SCHEMAS: &[ContentTypeSchema] = &[
    ContentTypeSchema {
        uid: CATEGORY,
        kind: ContentKind::Collection,
        required: &["name"],
        relations: &[],
    },
    ContentTypeSchema {
        uid: AUTHOR,
        kind: ContentKind::Collection,
        required: &["name"],
        relations: &[],
    },
    ContentTypeSchema {
        uid: ARTICLE,
        kind: ContentKind::Collection,
        required: &["title"],
        relations: &[],
    },
    ContentTypeSchema {
        uid: GLOBAL,
        kind: ContentKind::Single,
        required: &["siteName"],
        relations: &[],
    },
    ContentTypeSchema {
        uid: ABOUT,
        kind: ContentKind::Single,
        required: &["title"],
        relations: &[],
    },
    ContentTypeSchema {
        uid: KB_GLOBAL,
        kind: ContentKind::Single,
        required: &[],
        relations: &[],
    },
    ContentTypeSchema {
        uid: KB_AUDIENCE,
        kind: ContentKind::Collection,
        required: &["name"],
        relations: &[],
    },
    ContentTypeSchema {
        uid: KB_COLLECTION,
        kind: ContentKind::Collection,
        required: &["title"],
        relations: &[rel("audiences", KB_AUDIENCE)],
    },
    ContentTypeSchema {
        uid: KB_ARTICLE,
        kind: ContentKind::Collection,
        required: &["title"],
        relations: &[rel("audiences", KB_AUDIENCE), rel("collections", KB_COLLECTION)],
    },
    ContentTypeSchema {
        uid: KB_RELEASE_NOTE,
        kind: ContentKind::Collection,
        required: &["title"],
        relations: &[rel("audiences", KB_AUDIENCE), rel("articles", KB_ARTICLE)],
    },
    ContentTypeSchema {
        uid: WELCOME_GUIDE,
        kind: ContentKind::Collection,
        required: &["title"],
        relations: &[
            rel("sections", WELCOME_GUIDE_SECTION),
            rel("resources", WELCOME_GUIDE_RESOURCE),
        ],
    },
    ContentTypeSchema {
        uid: WELCOME_GUIDE_SECTION,
        kind: ContentKind::Collection,
        required: &["title"],
        relations: &[],
    },
    ContentTypeSchema {
        uid: WELCOME_GUIDE_RESOURCE,
        kind: ContentKind::Collection,
        required: &["title"],
        relations: &[],
    },
];

/// All declared content types
pub fn all() -> &'static [ContentTypeSchema] {
    SCHEMAS
}

/// Look up a content type by uid
pub fn lookup(uid: &str) -> Result<&'static ContentTypeSchema> {
    SCHEMAS.iter().find(|s| s.uid == uid).ok_or_else(|| {
        SeedError::UnknownContentType {
            content_type: uid.to_string(),
        }
        .into()
    })
}

impl ContentTypeSchema {
    /// Check that every required attribute is present and non-blank
    pub fn validate(&self, data: &SeedRecord) -> Result<()> {
        for attribute in self.required {
            let present = match data.get(*attribute) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
            };
            if !present {
                return Err(SeedError::MissingAttribute {
                    content_type: self.uid.to_string(),
                    attribute: attribute.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Resolve a relation attribute to its declaration
    pub fn relation(&self, attribute: &str) -> Result<&'static RelationSpec> {
        self.relations
            .iter()
            .find(|r| r.attribute == attribute)
            .ok_or_else(|| {
                SeedError::UnknownRelation {
                    content_type: self.uid.to_string(),
                    attribute: attribute.to_string(),
                }
                .into()
            })
    }

    pub fn is_single(&self) -> bool {
        self.kind == ContentKind::Single
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use serde_json::json;

    #[test]
    fn test_lookup_known_and_unknown() {
        assert_eq!(lookup(KB_ARTICLE).unwrap().uid, KB_ARTICLE);
        let err = lookup("recipe").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UnknownContentType);
    }

    #[test]
    fn test_uids_are_unique() {
        let mut uids: Vec<_> = all().iter().map(|s| s.uid).collect();
        uids.sort();
        uids.dedup();
        assert_eq!(uids.len(), all().len());
    }

    #[test]
    fn test_relation_targets_are_declared() {
        for schema in all() {
            for relation in schema.relations {
                assert!(
                    lookup(relation.target).is_ok(),
                    "{}.{} targets unknown type {}",
                    schema.uid,
                    relation.attribute,
                    relation.target
                );
            }
        }
    }

    #[test]
    fn test_validate_rejects_blank_required_attribute() {
        let schema = lookup(ARTICLE).unwrap();
        let blank = json!({"title": "  ", "slug": "a"});
        let err = schema.validate(blank.as_object().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);

        let ok = json!({"title": "Hello"});
        assert!(schema.validate(ok.as_object().unwrap()).is_ok());
    }

    #[test]
    fn test_relation_lookup() {
        let schema = lookup(KB_RELEASE_NOTE).unwrap();
        assert_eq!(schema.relation("articles").unwrap().target, KB_ARTICLE);
        assert_eq!(
            schema.relation("collections").unwrap_err().kind(),
            ExErrorKind::UnknownRelation
        );
    }
}
