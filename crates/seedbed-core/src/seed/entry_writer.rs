//! Create single entries and apply the write-failure policy

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cms::ContentStore;
use crate::errors::Result;
use crate::model::{ContentEntry, SeedRecord};
use crate::{log_op_end, log_op_error, log_op_start};

/// What a failed entry write does to the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure, treat the entry as absent, keep going
    #[default]
    Continue,
    /// Stop the run at the first failed write
    Abort,
}

/// Writes entries one at a time and tallies the outcome
pub struct EntryWriter<'a> {
    store: &'a dyn ContentStore,
    policy: FailurePolicy,
    created: BTreeMap<String, usize>,
    failures: usize,
}

impl<'a> EntryWriter<'a> {
    pub fn new(store: &'a dyn ContentStore, policy: FailurePolicy) -> Self {
        Self {
            store,
            policy,
            created: BTreeMap::new(),
            failures: 0,
        }
    }

    /// Create one entry of `content_type`
    ///
    /// Failures are logged with the content type and the record before
    /// being returned.
    ///
    /// # Errors
    ///
    /// Whatever the content store rejects the record with.
    pub fn create(&mut self, content_type: &str, record: SeedRecord) -> Result<ContentEntry> {
        log_op_start!("create_entry", content_type = content_type);
        let start = Instant::now();
        let snapshot = Value::Object(record.clone());

        match self.store.create(content_type, record) {
            Ok(entry) => {
                *self.created.entry(content_type.to_string()).or_default() += 1;
                log_op_end!(
                    "create_entry",
                    duration_ms = start.elapsed().as_millis() as u64,
                    content_type = content_type,
                    document_id = %entry.id().map(ToString::to_string).unwrap_or_default()
                );
                Ok(entry)
            }
            Err(err) => {
                self.failures += 1;
                let err = err.with_op("create_entry").with_content_type(content_type);
                log_op_error!(
                    "create_entry",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    content_type = content_type,
                    record = %snapshot
                );
                Err(err)
            }
        }
    }

    /// Create an entry, applying the failure policy
    ///
    /// Under `Continue` a failed write yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Under `Abort`, the store error.
    pub fn write(&mut self, content_type: &str, record: SeedRecord) -> Result<Option<ContentEntry>> {
        match self.create(content_type, record) {
            Ok(entry) => Ok(Some(entry)),
            Err(_) if self.policy == FailurePolicy::Continue => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Entries created so far, per content type
    pub fn created(&self) -> &BTreeMap<String, usize> {
        &self.created
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}
