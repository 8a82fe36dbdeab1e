//! Tree builder: wires resolved entries into a classification hierarchy.

use std::collections::HashMap;

use generational_arena::Index;
use itertools::Itertools;
use tracing::instrument;

use crate::domain::arena::ClassificationTree;
use crate::domain::entities::{ClassificationEntry, SchemeMeta};
use crate::domain::error::{BuildWarning, DomainError, DomainResult};

/// A finished tree together with the findings collected while building it.
#[derive(Debug)]
pub struct BuildOutcome {
    pub tree: ClassificationTree,
    pub warnings: Vec<BuildWarning>,
}

/// Constructs a [`ClassificationTree`] from resolved entries in one pass.
///
/// Entries are processed in plain lexicographic code order. For codes that
/// are fixed-width per level (as the {1,3,6} scheme is) this guarantees a
/// parent is indexed before any of its children. That ordering is a
/// precondition on the input data, not something the builder enforces: when
/// it does not hold, affected children surface as orphan warnings and are
/// linked under the synthetic root, never silently misparented.
pub struct TreeBuilder {
    meta: SchemeMeta,
}

impl TreeBuilder {
    pub fn new(meta: SchemeMeta) -> Self {
        Self { meta }
    }

    /// Build a fresh tree from the given entries.
    ///
    /// Each call is independent and owns its own code index. Fails without
    /// producing a tree when a code is empty or duplicated; anything else
    /// degrades to warnings.
    #[instrument(level = "debug", skip(self, entries))]
    pub fn build(&self, entries: &[ClassificationEntry]) -> DomainResult<BuildOutcome> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.code.is_empty() {
                return Err(DomainError::InvalidCode { row: i + 1 });
            }
        }

        let mut tree = ClassificationTree::new(self.meta.clone());
        let mut warnings = Vec::new();

        // Code → node index, seeded with the synthetic root under the
        // no-code sentinel. Populated as nodes are created, so the sort
        // order above decides which parents are resolvable.
        let mut index: HashMap<Option<&str>, Index> = HashMap::new();
        index.insert(None, tree.root());

        for entry in entries.iter().sorted_by(|a, b| a.code.cmp(&b.code)) {
            if index.contains_key(&Some(entry.code.as_str())) {
                return Err(DomainError::DuplicateCode {
                    code: entry.code.clone(),
                });
            }

            let parent_key = entry.parent_code.as_deref();
            let parent_idx = match index.get(&parent_key) {
                Some(&idx) => idx,
                None => {
                    warnings.push(BuildWarning::OrphanParent {
                        parent_code: entry.parent_code.clone().unwrap_or_default(),
                        child_code: entry.code.clone(),
                    });
                    tree.root()
                }
            };

            let node_idx = tree.insert_node(entry.clone(), parent_idx);
            index.insert(Some(entry.code.as_str()), node_idx);
        }

        Ok(BuildOutcome { tree, warnings })
    }
}
