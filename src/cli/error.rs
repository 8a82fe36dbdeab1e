//! CLI-level errors (wraps application errors)

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApplicationError),

    #[error("input file does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("check found {0} finding(s)")]
    ChecksFailed(usize),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::MissingInput(_) => crate::exitcode::NOINPUT,
            CliError::ChecksFailed(_) => crate::exitcode::DATAERR,
            CliError::App(e) => match e {
                ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                ApplicationError::StrictViolation { .. } => crate::exitcode::DATAERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Infra(ie) => match ie {
                    InfraError::MalformedRow { .. } => crate::exitcode::DATAERR,
                    InfraError::InvalidEditionDate { .. } => crate::exitcode::DATAERR,
                    InfraError::Io { source, .. } => match source.kind() {
                        ErrorKind::NotFound => crate::exitcode::NOINPUT,
                        ErrorKind::PermissionDenied => crate::exitcode::CANTCREAT,
                        _ => crate::exitcode::IOERR,
                    },
                },
            },
        }
    }
}
