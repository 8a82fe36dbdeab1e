//! Domain-level errors (no external dependencies)

use std::fmt;

use thiserror::Error;

/// Domain errors represent violations of the classification's basic
/// contract. Both are fatal: the build aborts rather than producing a
/// partial or corrupted tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid code in row {row}: code is empty")]
    InvalidCode { row: usize },

    #[error("duplicate code: {code}")]
    DuplicateCode { code: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Non-fatal findings collected during a build.
///
/// The tree stays structurally complete when these occur; callers decide
/// whether to proceed, log, or reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// Resolved parent code had no node at link time; the child was
    /// attached to the synthetic root instead.
    OrphanParent {
        parent_code: String,
        child_code: String,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::OrphanParent {
                parent_code,
                child_code,
            } => write!(
                f,
                "parent code {} not found for code {}, linked under classification root",
                parent_code, child_code
            ),
        }
    }
}
