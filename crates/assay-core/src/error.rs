//! Error types for assay-core.
//!
//! Evaluation itself never fails. These errors only surface at the edges:
//! criterion text that cannot be read, snapshots that break their own
//! invariants, and policy files that cannot be loaded.

use crate::model::{ParameterId, SpecificationId, TestId};
use thiserror::Error;

/// Why a criterion string could not be turned into a numeric comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriterionError {
    /// The expected value was empty.
    #[error("empty criterion")]
    EmptyCriterion,

    /// A bound operator was present but its operand is not a number.
    #[error("malformed bound: '{0}'")]
    MalformedBound(String),

    /// The text looked like a range but a side is not a number.
    #[error("malformed range: '{0}'")]
    MalformedRange(String),

    /// The text contains digits but no leading number.
    #[error("malformed number: '{0}'")]
    MalformedNumber(String),
}

/// Structural problems in a specification snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Two parameters share an id.
    #[error("specification {specification}: duplicate parameter {parameter}")]
    DuplicateParameter {
        specification: SpecificationId,
        parameter: ParameterId,
    },

    /// A parameter links a test its specification does not declare.
    #[error("specification {specification}: parameter {parameter} links undeclared test {test}")]
    UndeclaredLink {
        specification: SpecificationId,
        parameter: ParameterId,
        test: TestId,
    },
}

/// Errors loading or saving an [`EvaluationPolicy`](crate::EvaluationPolicy).
#[derive(Debug, Error)]
pub enum PolicyError {
    /// IO error reading or writing the policy file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML could not be produced.
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}
