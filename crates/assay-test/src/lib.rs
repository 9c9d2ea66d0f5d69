#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::manual_assert)]
#![allow(clippy::module_name_repetitions)]
//! Testing helpers for the assay compliance engine.
//!
//! - [`fixture`]: fluent [`SnapshotBuilder`] plus ready-made tests and samples
//! - [`expect`]: panicking expectations on criteria and evaluations

pub mod expect;
pub mod fixture;

pub use expect::{
    expect_criterion, expect_parameter, expect_specification, CriterionExpectation,
    MeasuredExpectation, ParameterExpectation, SpecificationExpectation,
};
pub use fixture::{
    completed_sample, completed_test, mixed_release, not_started_test, running_test,
    SnapshotBuilder,
};
