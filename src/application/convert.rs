//! Conversion service: orchestrates read → resolve → build → write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::builder::{BuildOutcome, TreeBuilder};
use crate::domain::entities::SchemeMeta;
use crate::domain::error::BuildWarning;
use crate::domain::resolver::{self, RECOGNIZED_LEVELS};
use crate::infrastructure::{read_records, write_ifc_file};

/// Summary of a completed conversion.
#[derive(Debug)]
pub struct ConvertReport {
    pub entries: usize,
    /// Node count including the synthetic root
    pub nodes: usize,
    pub warnings: Vec<BuildWarning>,
    pub output: PathBuf,
}

/// Diagnostics for a table without writing output.
#[derive(Debug)]
pub struct CheckReport {
    pub entries: usize,
    /// Entry count per structural level
    pub level_counts: BTreeMap<usize, usize>,
    pub warnings: Vec<BuildWarning>,
    /// Codes whose shape falls outside the scheme's convention
    pub findings: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.findings.is_empty()
    }

    /// Warnings and shape findings combined.
    pub fn finding_count(&self) -> usize {
        self.warnings.len() + self.findings.len()
    }
}

/// Use-case entry points for the CLI and library facade.
pub struct ConvertService {
    meta: SchemeMeta,
}

impl ConvertService {
    pub fn new(meta: SchemeMeta) -> Self {
        Self { meta }
    }

    /// Read a table and build its classification tree.
    #[instrument(level = "debug", skip(self))]
    pub fn load_tree(&self, input: &Path) -> ApplicationResult<BuildOutcome> {
        let records = read_records(input)?;
        debug!("read {} records from {}", records.len(), input.display());
        let entries = resolver::resolve(&records);
        let outcome = TreeBuilder::new(self.meta.clone()).build(&entries)?;
        Ok(outcome)
    }

    /// Full conversion: table in, IFC reference file out.
    ///
    /// Warnings do not fail the conversion unless `strict` is set, in which
    /// case no output is written.
    #[instrument(level = "debug", skip(self))]
    pub fn convert(
        &self,
        input: &Path,
        output: &Path,
        strict: bool,
    ) -> ApplicationResult<ConvertReport> {
        let outcome = self.load_tree(input)?;

        if strict && !outcome.warnings.is_empty() {
            return Err(ApplicationError::StrictViolation {
                count: outcome.warnings.len(),
            });
        }

        write_ifc_file(&outcome.tree, output)?;

        Ok(ConvertReport {
            entries: outcome.tree.node_count() - 1,
            nodes: outcome.tree.node_count(),
            warnings: outcome.warnings,
            output: output.to_path_buf(),
        })
    }

    /// Diagnose a table: build it and report anything off-convention.
    ///
    /// Build semantics are unchanged (odd codes still land at root level);
    /// this only surfaces what `build` accepts silently.
    #[instrument(level = "debug", skip(self))]
    pub fn check(&self, input: &Path) -> ApplicationResult<CheckReport> {
        let records = read_records(input)?;
        let entries = resolver::resolve(&records);
        let outcome = TreeBuilder::new(self.meta.clone()).build(&entries)?;

        let mut level_counts: BTreeMap<usize, usize> = BTreeMap::new();
        for entry in &entries {
            *level_counts.entry(entry.level).or_default() += 1;
        }

        let shape = Regex::new(r"^[0-9A-Za-z]+$").map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })?;
        let mut findings = Vec::new();
        for entry in &entries {
            if !shape.is_match(&entry.code) {
                findings.push(format!("code {} is not alphanumeric", entry.code));
            } else if !RECOGNIZED_LEVELS.contains(&entry.level) {
                findings.push(format!(
                    "code {} has unrecognized length {} (expected one of {:?})",
                    entry.code, entry.level, RECOGNIZED_LEVELS
                ));
            }
        }

        Ok(CheckReport {
            entries: entries.len(),
            level_counts,
            warnings: outcome.warnings,
            findings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_flags_off_convention_codes() {
        use crate::domain::entities::RawRecord;

        // Exercise the shape logic through resolve + builder directly.
        let entries = resolver::resolve(&[
            RawRecord::new("2", "ok"),
            RawRecord::new("20-3", "dashed"),
            RawRecord::new("2030", "odd length"),
        ]);
        assert_eq!(entries[1].level, 4);
        assert!(!RECOGNIZED_LEVELS.contains(&entries[2].level));
    }
}
