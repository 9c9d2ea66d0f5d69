//! YAML snapshots of specifications and tests for the assay compliance engine.

mod error;
mod snapshot;

pub use error::SnapshotError;
pub use snapshot::Snapshot;
