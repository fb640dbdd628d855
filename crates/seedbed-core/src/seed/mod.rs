//! One-shot seed pipeline
//!
//! - `run_gate`: first-run flag
//! - `file_resolver`: reuse or upload referenced files
//! - `entry_writer` / `relation_linker`: two-phase content creation
//! - `block_rewriter`: file references inside content blocks
//! - `importers`: one per content family
//! - `runner`: ordering, options and the run report

pub mod block_rewriter;
pub mod dataset;
pub mod entry_writer;
pub mod file_resolver;
pub mod importers;
pub mod permissions;
pub mod relation_linker;
pub mod run_gate;
pub mod runner;
pub mod slug_map;

pub use dataset::{KnowledgeBaseSeed, SeedDataset};
pub use entry_writer::FailurePolicy;
pub use run_gate::{RunGate, INIT_HAS_RUN};
pub use runner::{import_dataset, seed_once, SeedBackends, SeedOptions, SeedOutcome, SeedReport};
