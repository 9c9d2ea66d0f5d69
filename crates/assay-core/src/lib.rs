//! Compliance evaluation engine for laboratory quality management.
//!
//! This crate judges recorded lab results against free-text acceptance
//! criteria and rolls them up into compliance states:
//! - Criteria: [`Criterion`], [`CriterionKind`] parsed from expected values
//! - Classification: [`ResultClassifier`] producing a [`Verdict`]
//! - Linking: [`relevant_tests`] with the parameter → specification fallback
//! - Rollups: [`evaluate_parameter`], [`evaluate_specification`],
//!   [`evaluate_portfolio`]
//! - Reporting: [`ComplianceReport`] rows
//! - Configuration: [`EvaluationPolicy`] (TOML)
//!
//! Every evaluation is a pure function over a borrowed snapshot. Running it
//! twice on the same snapshot gives the same answer.

pub mod classifier;
pub mod criterion;
mod engine;
mod error;
pub mod links;
mod model;
mod policy;
mod report;
pub mod rollup;
mod verdict;

pub use classifier::{raw_result, ResultClassifier};
pub use criterion::{classify, evaluate, Criterion, CriterionKind, DEFAULT_TOLERANCE};
pub use engine::ComplianceEngine;
pub use error::{CriterionError, ModelError, PolicyError};
pub use links::{
    index_tests, is_sample_complete, is_test_complete, relevant_tests, LinkSource, RelevantTests,
    TestLookup,
};
pub use model::{
    AcceptableRange, ParameterId, ParameterType, SampleId, SampleTest, Specification,
    SpecificationId, SpecificationParameter, SpecificationStatus, StepId, StepStatus, Test, TestId,
    TestStep, WorkStatus,
};
pub use policy::{EvaluationPolicy, ResultSource};
pub use report::{ComplianceReport, ReportRow, ReportSummary};
pub use rollup::parameter::{evaluate_parameter, ParameterEvaluation, SampleDetail, TestDetail};
pub use rollup::percentage;
pub use rollup::portfolio::{evaluate_portfolio, PortfolioSummary};
pub use rollup::specification::{compliance_status, evaluate_specification, SpecificationEvaluation};
pub use verdict::{ComplianceStatus, ParameterStatus, Verdict};
