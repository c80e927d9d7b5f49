//! Schema loading error types.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid schema version '{0}', expected MAJOR.MINOR")]
    InvalidVersion(String),

    /// No schema files exist for the package under any root
    #[error("No schemas found for package '{0}'")]
    FamilyNotFound(String),

    /// The family was found but could not be built into a valid one
    #[error("{0}")]
    Build(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;

impl SchemaError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SchemaError::FamilyNotFound(_))
            || matches!(self, SchemaError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}
