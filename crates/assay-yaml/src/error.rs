//! Error types for YAML snapshots.

use assay_core::ModelError;
use thiserror::Error;

/// Error type for snapshot loading and saving.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// YAML parsing or serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A specification breaks its own invariants
    #[error("Validation error: {0}")]
    Validation(#[from] ModelError),

    /// Two tests share an id
    #[error("Duplicate test id: {0}")]
    DuplicateTest(String),

    /// Two specifications share an id
    #[error("Duplicate specification id: {0}")]
    DuplicateSpecification(String),
}
