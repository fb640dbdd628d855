//! Public read access for seeded content types

use crate::cms::PermissionStore;
use crate::content_types::{
    ABOUT, ARTICLE, AUTHOR, CATEGORY, GLOBAL, KB_ARTICLE, KB_AUDIENCE, KB_COLLECTION, KB_GLOBAL,
    KB_RELEASE_NOTE,
};
use crate::errors::Result;

/// Content types readable without authentication after seeding
pub const PUBLIC_CONTENT_TYPES: &[&str] = &[
    ARTICLE,
    CATEGORY,
    AUTHOR,
    GLOBAL,
    ABOUT,
    KB_GLOBAL,
    KB_AUDIENCE,
    KB_COLLECTION,
    KB_ARTICLE,
    KB_RELEASE_NOTE,
];

pub const PUBLIC_ACTIONS: &[&str] = &["find", "findOne"];

/// Permission action id, e.g. `api::article.article.find`
pub fn action_id(content_type: &str, action: &str) -> String {
    format!("api::{ct}.{ct}.{action}", ct = content_type, action = action)
}

/// All public grants, in declaration order
pub fn public_grants() -> Vec<String> {
    PUBLIC_CONTENT_TYPES
        .iter()
        .flat_map(|ct| PUBLIC_ACTIONS.iter().map(move |action| action_id(ct, action)))
        .collect()
}

/// Grant read access to the public role; returns the number of new grants
///
/// # Errors
///
/// Propagates permission store failures.
pub fn grant_public_read(store: &dyn PermissionStore) -> Result<usize> {
    let grants = public_grants();
    let created = store.grant_public(&grants)?;
    tracing::info!(requested = grants.len(), created, "granted public read permissions");
    Ok(created)
}
