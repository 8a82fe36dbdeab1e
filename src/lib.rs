//! rsclass: classification table → IFC reference file converter.
//!
//! The core is a two-step pipeline over an in-memory table: the resolver
//! derives each entry's level and parent code from the code-length
//! convention, the builder wires the entries into a tree under a synthetic
//! root. Reading the CSV table and writing the ISO 10303-21 document are
//! infrastructure around that core.

use std::path::Path;

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{ApplicationResult, ConvertReport, ConvertService};
pub use domain::{BuildOutcome, ClassificationEntry, RawRecord, SchemeMeta};

/// Resolve and build a tree from in-memory records.
///
/// Library entry point for callers that already hold the table rows.
pub fn build_tree(records: &[RawRecord], meta: SchemeMeta) -> domain::DomainResult<BuildOutcome> {
    let entries = domain::resolver::resolve(records);
    domain::TreeBuilder::new(meta).build(&entries)
}

/// Convert a table file into an IFC reference file.
///
/// Returns the conversion report with any warnings; see
/// [`ConvertService::convert`] for strict-mode semantics.
pub fn convert_file(
    input: &Path,
    output: &Path,
    meta: SchemeMeta,
    strict: bool,
) -> ApplicationResult<ConvertReport> {
    ConvertService::new(meta).convert(input, output, strict)
}
