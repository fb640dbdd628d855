//! Run the seed pipeline
//!
//! `seed_once` gates on the first-run flag and then calls `import_dataset`,
//! which grants public read access and runs the importers in dependency
//! order: categories, authors, articles, global, about, knowledge base.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::cms::{ContentStore, MediaLibrary, PermissionStore, SetupStore};
use crate::errors::{Result, SeedError};
use crate::model::SeedRecord;
use crate::seed::block_rewriter::rewrite_blocks;
use crate::seed::dataset::SeedDataset;
use crate::seed::entry_writer::{EntryWriter, FailurePolicy};
use crate::seed::file_resolver::FileResolver;
use crate::seed::importers::{blog, knowledge_base, singletons};
use crate::seed::permissions::grant_public_read;
use crate::seed::relation_linker::RelationLinker;
use crate::seed::run_gate::RunGate;
use crate::{log_op_end, log_op_error, log_op_start};

/// Run-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    /// Scope of the first-run flag
    pub environment: String,
    /// Directory holding the files referenced by the dataset
    pub assets_dir: PathBuf,
    pub on_write_failure: FailurePolicy,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            assets_dir: PathBuf::from("data/uploads"),
            on_write_failure: FailurePolicy::Continue,
        }
    }
}

/// The collaborators a run writes through
#[derive(Clone, Copy)]
pub struct SeedBackends<'a> {
    pub content: &'a dyn ContentStore,
    pub media: &'a dyn MediaLibrary,
    pub permissions: &'a dyn PermissionStore,
    pub setup: &'a dyn SetupStore,
}

impl<'a> SeedBackends<'a> {
    /// Use one backend for every role
    pub fn single<B>(backend: &'a B) -> Self
    where
        B: ContentStore + MediaLibrary + PermissionStore + SetupStore,
    {
        Self {
            content: backend,
            media: backend,
            permissions: backend,
            setup: backend,
        }
    }
}

/// Summary of one import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub entries_created: BTreeMap<String, usize>,
    pub write_failures: usize,
    pub assets_uploaded: usize,
    pub assets_reused: usize,
    pub relations_connected: usize,
    pub permissions_granted: usize,
}

impl SeedReport {
    pub fn total_entries(&self) -> usize {
        self.entries_created.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The first-run flag was already set; nothing was written
    AlreadySeeded,
    Imported(SeedReport),
}

/// Shared state for the importers of one run
pub struct Seeder<'a> {
    pub(crate) writer: EntryWriter<'a>,
    pub(crate) linker: RelationLinker<'a>,
    pub(crate) files: FileResolver<'a>,
}

impl<'a> Seeder<'a> {
    pub fn new(backends: SeedBackends<'a>, options: &'a SeedOptions) -> Self {
        Self {
            writer: EntryWriter::new(backends.content, options.on_write_failure),
            linker: RelationLinker::new(backends.content),
            files: FileResolver::new(backends.media, &options.assets_dir),
        }
    }

    /// Mark a record as published now
    pub(crate) fn publish(record: &mut SeedRecord) {
        record.insert(
            "publishedAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
    }

    /// Replace `blocks` in place with its rewritten copy; absent blocks stay absent
    pub(crate) fn rewrite_record_blocks(&mut self, record: &mut SeedRecord) -> Result<()> {
        let rewritten = match record.get("blocks") {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::Array(blocks)) => rewrite_blocks(&mut self.files, blocks)?,
            Some(_) => {
                return Err(SeedError::InvalidField {
                    field: "blocks".to_string(),
                    reason: "expected a list of blocks".to_string(),
                }
                .into())
            }
        };
        record.insert("blocks".to_string(), Value::Array(rewritten));
        Ok(())
    }

    fn report(&self, permissions_granted: usize) -> SeedReport {
        let stats = self.files.stats();
        SeedReport {
            entries_created: self.writer.created().clone(),
            write_failures: self.writer.failures(),
            assets_uploaded: stats.uploaded,
            assets_reused: stats.reused,
            relations_connected: self.linker.connected(),
            permissions_granted,
        }
    }
}

/// Import the dataset if this is the first run for the environment
///
/// # Errors
///
/// Setup store failures, and any error that aborts the import. Writes made
/// before the error are kept.
pub fn seed_once(
    dataset: &SeedDataset,
    backends: SeedBackends<'_>,
    options: &SeedOptions,
) -> Result<SeedOutcome> {
    let gate = RunGate::new(backends.setup, &options.environment);
    if !gate.is_first_run()? {
        tracing::info!(
            environment = %options.environment,
            "seed data already imported, skipping"
        );
        return Ok(SeedOutcome::AlreadySeeded);
    }
    import_dataset(dataset, backends, options).map(SeedOutcome::Imported)
}

/// Import the whole dataset without consulting the first-run flag
///
/// # Errors
///
/// File, relation and permission failures abort the import; write failures
/// abort only under `FailurePolicy::Abort`.
pub fn import_dataset(
    dataset: &SeedDataset,
    backends: SeedBackends<'_>,
    options: &SeedOptions,
) -> Result<SeedReport> {
    log_op_start!(
        "seed_import",
        environment = %options.environment,
        records = dataset.record_count()
    );
    let start = Instant::now();

    let result = run_importers(dataset, backends, options).map_err(|e| {
        log_op_error!(
            "seed_import",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "seed_import",
        duration_ms = start.elapsed().as_millis() as u64,
        entries = result.total_entries(),
        write_failures = result.write_failures,
        assets_uploaded = result.assets_uploaded
    );
    Ok(result)
}

fn run_importers(
    dataset: &SeedDataset,
    backends: SeedBackends<'_>,
    options: &SeedOptions,
) -> Result<SeedReport> {
    let permissions_granted = grant_public_read(backends.permissions)?;

    let mut seeder = Seeder::new(backends, options);
    blog::import_categories(&mut seeder, &dataset.categories)?;
    blog::import_authors(&mut seeder, &dataset.authors)?;
    blog::import_articles(&mut seeder, &dataset.articles)?;
    if let Some(global) = &dataset.global {
        singletons::import_global(&mut seeder, global)?;
    }
    if let Some(about) = &dataset.about {
        singletons::import_about(&mut seeder, about)?;
    }
    if let Some(kb) = &dataset.knowledge_base {
        knowledge_base::import_knowledge_base(&mut seeder, kb)?;
    }

    Ok(seeder.report(permissions_granted))
}
