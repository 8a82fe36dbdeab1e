//! Infrastructure-level errors (I/O boundary)

use std::path::PathBuf;

use thiserror::Error;

/// Infrastructure errors cover the file boundary: reading the source table
/// and writing the reference document.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table row {row} in {path}: {reason}")]
    MalformedRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("invalid edition date '{value}': expected YYYY-MM-DD")]
    InvalidEditionDate { value: String },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
