//! Error types for Snowplan
//!
//! Uses `thiserror` for library errors. Every fatal error is raised before
//! any output is written; there is no partial-success mode.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Snowplan operations
pub type SnowplanResult<T> = Result<T, SnowplanError>;

/// Main error type for Snowplan operations
#[derive(Error, Debug)]
pub enum SnowplanError {
    /// Mandatory deployment-context value absent or empty
    #[error("missing mandatory configuration value '{field}'")]
    MissingConfiguration { field: String },

    /// Two artifacts resolved to the same platform identifier
    #[error(
        "identifier '{identifier}' resolved for both '{first}' and '{second}' - \
         rename one of the artifacts"
    )]
    AmbiguousArtifact {
        identifier: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Resolved name violates platform naming constraints
    #[error(
        "identifier '{identifier}' derived from '{artifact}' contains characters \
         outside [A-Za-z0-9_]"
    )]
    InvalidIdentifier { identifier: String, artifact: PathBuf },

    /// Invalid project configuration file
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
