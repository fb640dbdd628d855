//! Per-family importers
//!
//! Each importer composes the entry writer, file resolver, block rewriter and
//! relation linker in the order its family's dependencies require.

pub mod blog;
pub mod knowledge_base;
pub mod singletons;
