//! SQLite content store
//!
//! Entries keep their record as JSON in `entries.data`; slug and publish
//! time are lifted into columns for lookups. Relations are rows in
//! `entry_relations` keyed by row id, ordered by connect order.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;

use rusqlite::{Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use serde_json::Value;

use crate::errors::{from_rusqlite, Result};
use seedbed_core::cms::{ContentStore, PermissionStore, SetupStore};
use seedbed_core::content_types;
use seedbed_core::errors::{ExError, ExErrorKind, SeedError};
use seedbed_core::model::{slug_of, ContentEntry, EntryId, SeedRecord};

/// Name under which setup flags are stored in `core_store`
const SETUP_STORE: &str = "setup";

const ENTRY_COLUMNS: &str = "id, document_id, content_type, data";

/// Content, permission and setup store over one connection
pub struct SqliteCms<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteCms<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Find one entry of `content_type` by slug
    pub fn find_one_by_slug(&self, content_type: &str, slug: &str) -> Result<Option<ContentEntry>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM entries WHERE content_type = ?1 AND slug = ?2",
                    ENTRY_COLUMNS
                ),
                rusqlite::params![content_type, slug],
                entry_row,
            )
            .optional()
            .map_err(from_rusqlite)?
            .map(|row| row.into_entry())
            .transpose()
    }

    /// Entries connected to `parent` through `attribute`, in connect order
    pub fn related(&self, parent: &ContentEntry, attribute: &str) -> Result<Vec<ContentEntry>> {
        let Some(parent_id) = parent.row_id else {
            return Ok(Vec::new());
        };
        let mut stmt = self
            .conn
            .prepare(
                "SELECT e.id, e.document_id, e.content_type, e.data
                 FROM entry_relations r
                 JOIN entries e ON e.id = r.child_id
                 WHERE r.parent_id = ?1 AND r.attribute = ?2
                 ORDER BY r.ordinal",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(rusqlite::params![parent_id, attribute], entry_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        rows.into_iter().map(EntryRow::into_entry).collect()
    }

    /// All entries of one content type, in creation order
    pub fn list(&self, content_type: &str) -> Result<Vec<ContentEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM entries WHERE content_type = ?1 ORDER BY id",
                ENTRY_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([content_type], entry_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        rows.into_iter().map(EntryRow::into_entry).collect()
    }

    /// Number of entries per content type
    pub fn count_entries(&self) -> Result<BTreeMap<String, usize>> {
        let mut stmt = self
            .conn
            .prepare("SELECT content_type, COUNT(*) FROM entries GROUP BY content_type")
            .map_err(from_rusqlite)?;
        let counts = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()
            .map_err(from_rusqlite)?;
        Ok(counts)
    }

    /// Read a setup flag without setting it
    pub fn read_flag(&self, environment: &str, key: &str) -> Result<bool> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM core_store WHERE environment = ?1 AND name = ?2 AND key = ?3",
                rusqlite::params![environment, SETUP_STORE, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;
        Ok(value.as_deref().map(flag_value).unwrap_or(false))
    }

    /// Action ids granted to the public role
    pub fn public_permissions(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT p.action FROM permissions p
                 JOIN roles r ON r.id = p.role_id
                 WHERE r.type = 'public'
                 ORDER BY p.id",
            )
            .map_err(from_rusqlite)?;
        let actions = stmt
            .query_map([], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        Ok(actions)
    }

    fn row_id_of(&self, content_type: &str, id: &EntryId) -> Result<i64> {
        let found = match id {
            EntryId::Document(doc) => self.conn.query_row(
                "SELECT id FROM entries WHERE content_type = ?1 AND document_id = ?2",
                rusqlite::params![content_type, doc],
                |row| row.get(0),
            ),
            EntryId::Row(row_id) => self.conn.query_row(
                "SELECT id FROM entries WHERE content_type = ?1 AND id = ?2",
                rusqlite::params![content_type, row_id],
                |row| row.get(0),
            ),
        }
        .optional()
        .map_err(from_rusqlite)?;

        found.ok_or_else(|| {
            SeedError::EntryNotFound {
                content_type: content_type.to_string(),
                entry_id: id.to_string(),
            }
            .into()
        })
    }
}

struct EntryRow {
    id: i64,
    document_id: String,
    content_type: String,
    data: String,
}

fn entry_row(row: &Row<'_>) -> rusqlite::Result<EntryRow> {
    Ok(EntryRow {
        id: row.get(0)?,
        document_id: row.get(1)?,
        content_type: row.get(2)?,
        data: row.get(3)?,
    })
}

impl EntryRow {
    fn into_entry(self) -> Result<ContentEntry> {
        let data: SeedRecord = serde_json::from_str(&self.data).map_err(|e| {
            ExError::from(e)
                .with_op("load_entry")
                .with_entity_id(self.document_id.clone())
        })?;
        Ok(ContentEntry::new(
            self.content_type,
            Some(self.id),
            Some(self.document_id),
            data,
        ))
    }
}

fn flag_value(raw: &str) -> bool {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

impl ContentStore for SqliteCms<'_> {
    fn create(&self, content_type: &str, data: SeedRecord) -> Result<ContentEntry> {
        let schema = content_types::lookup(content_type)?;
        schema.validate(&data)?;

        if schema.is_single() {
            let occupied: bool = self
                .conn
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM entries WHERE content_type = ?1)",
                    [content_type],
                    |row| row.get(0),
                )
                .map_err(from_rusqlite)?;
            if occupied {
                return Err(SeedError::SingleTypeOccupied {
                    content_type: content_type.to_string(),
                }
                .into());
            }
        }

        let slug = slug_of(&data).map(str::to_string);
        if let Some(slug) = &slug {
            if self.find_one_by_slug(content_type, slug)?.is_some() {
                return Err(SeedError::DuplicateSlug {
                    content_type: content_type.to_string(),
                    slug: slug.clone(),
                }
                .into());
            }
        }

        let document_id = uuid::Uuid::now_v7().to_string();
        let published_at = data
            .get("publishedAt")
            .and_then(Value::as_str)
            .map(str::to_string);
        let json = serde_json::to_string(&data)?;

        self.conn
            .execute(
                "INSERT INTO entries (document_id, content_type, slug, data, published_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    document_id,
                    content_type,
                    slug,
                    json,
                    published_at,
                    chrono::Utc::now().timestamp(),
                ],
            )
            .map_err(|e| from_rusqlite(e).with_content_type(content_type))?;
        let row_id = self.conn.last_insert_rowid();

        Ok(ContentEntry::new(
            content_type,
            Some(row_id),
            Some(document_id),
            data,
        ))
    }

    fn connect(
        &self,
        content_type: &str,
        parent: &EntryId,
        attribute: &str,
        children: &[EntryId],
    ) -> Result<()> {
        let relation = content_types::lookup(content_type)?.relation(attribute)?;
        let parent_id = self.row_id_of(content_type, parent)?;
        let child_ids = children
            .iter()
            .map(|child| self.row_id_of(relation.target, child))
            .collect::<Result<Vec<_>>>()?;

        let tx = self.conn.unchecked_transaction().map_err(from_rusqlite)?;
        let mut ordinal: i64 = tx
            .query_row(
                "SELECT COUNT(*) FROM entry_relations WHERE parent_id = ?1 AND attribute = ?2",
                rusqlite::params![parent_id, attribute],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        for child_id in child_ids {
            let inserted = tx
                .execute(
                    "INSERT OR IGNORE INTO entry_relations (parent_id, attribute, child_id, ordinal)
                     VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![parent_id, attribute, child_id, ordinal],
                )
                .map_err(from_rusqlite)?;
            ordinal += inserted as i64;
        }
        tx.commit().map_err(from_rusqlite)?;
        Ok(())
    }
}

impl PermissionStore for SqliteCms<'_> {
    fn grant_public(&self, actions: &[String]) -> Result<usize> {
        let role_id: i64 = self
            .conn
            .query_row("SELECT id FROM roles WHERE type = 'public'", [], |row| {
                row.get(0)
            })
            .optional()
            .map_err(from_rusqlite)?
            .ok_or_else(|| {
                ExError::new(ExErrorKind::NotFound)
                    .with_op("grant_public")
                    .with_message("Public role not found")
            })?;

        let tx = self.conn.unchecked_transaction().map_err(from_rusqlite)?;
        let now = chrono::Utc::now().timestamp();
        let mut created = 0;
        for action in actions {
            created += tx
                .execute(
                    "INSERT OR IGNORE INTO permissions (action, role_id, created_at) VALUES (?1, ?2, ?3)",
                    rusqlite::params![action, role_id, now],
                )
                .map_err(from_rusqlite)?;
        }
        tx.commit().map_err(from_rusqlite)?;
        Ok(created)
    }
}

impl SetupStore for SqliteCms<'_> {
    fn test_and_set(&self, environment: &str, key: &str) -> Result<bool> {
        // IMMEDIATE takes the write lock up front, so two processes cannot
        // both read the flag as unset.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        let previous: Option<String> = tx
            .query_row(
                "SELECT value FROM core_store WHERE environment = ?1 AND name = ?2 AND key = ?3",
                rusqlite::params![environment, SETUP_STORE, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;
        tx.execute(
            "INSERT INTO core_store (environment, name, key, value, updated_at)
             VALUES (?1, ?2, ?3, 'true', ?4)
             ON CONFLICT(environment, name, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            rusqlite::params![environment, SETUP_STORE, key, chrono::Utc::now().timestamp()],
        )
        .map_err(from_rusqlite)?;
        tx.commit().map_err(from_rusqlite)?;

        Ok(previous.as_deref().map(flag_value).unwrap_or(false))
    }
}
