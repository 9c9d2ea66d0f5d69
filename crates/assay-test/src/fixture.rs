//! Snapshot fixtures for compliance tests.
//!
//! # Example
//!
//! ```
//! use assay_core::{SpecificationParameter, TestId};
//! use assay_test::fixture::{completed_test, running_test, SnapshotBuilder};
//!
//! let snapshot = SnapshotBuilder::new()
//!     .specification("SP-1", "Tablet", |spec| {
//!         spec.parameter(SpecificationParameter::new("P1", "pH", "6.5-7.5").link("T1"))
//!     })
//!     .test(completed_test("T1", &["7.0"]))
//!     .test(running_test("T2"))
//!     .build();
//!
//! assert_eq!(snapshot.tests.len(), 2);
//! assert!(snapshot.specifications[0].linked_test_ids.contains(&TestId::new("T1")));
//! ```

use assay_core::{SampleTest, Specification, SpecificationParameter, Test, TestStep, WorkStatus};
use assay_yaml::Snapshot;

/// Fluent builder for [`Snapshot`] fixtures.
///
/// Specifications added through [`SnapshotBuilder::specification`] declare
/// every test their parameters link, so the result passes
/// [`Snapshot::validate`] unless a test adds links by hand.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    description: String,
    specifications: Vec<Specification>,
    tests: Vec<Test>,
}

impl SnapshotBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snapshot description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a specification built by `build`.
    #[must_use]
    pub fn specification<F>(mut self, id: &str, name: &str, build: F) -> Self
    where
        F: FnOnce(Specification) -> Specification,
    {
        let mut spec = build(Specification::new(id, name));
        let links: Vec<_> = spec
            .parameters
            .iter()
            .flat_map(|p| p.linked_test_ids.iter().cloned())
            .collect();
        spec.linked_test_ids.extend(links);
        self.specifications.push(spec);
        self
    }

    /// Add a prepared specification as is.
    #[must_use]
    pub fn raw_specification(mut self, specification: Specification) -> Self {
        self.specifications.push(specification);
        self
    }

    /// Add a test.
    #[must_use]
    pub fn test(mut self, test: Test) -> Self {
        self.tests.push(test);
        self
    }

    /// Finish the snapshot.
    #[must_use]
    pub fn build(self) -> Snapshot {
        Snapshot {
            version: "1".to_string(),
            description: self.description,
            specifications: self.specifications,
            tests: self.tests,
        }
    }
}

/// A completed sample with a raw result and one completed step.
#[must_use]
pub fn completed_sample(id: &str, result: &str) -> SampleTest {
    SampleTest::new(id)
        .status(WorkStatus::Completed)
        .results(result)
        .step(TestStep::new("measure").complete().results(result))
}

/// A completed test with one completed sample per result, named `S1`, `S2`...
///
/// Samples get increasing completion times, so the last result is the
/// representative one.
#[must_use]
pub fn completed_test(id: &str, results: &[&str]) -> Test {
    results
        .iter()
        .enumerate()
        .fold(Test::new(id).status(WorkStatus::Completed), |test, (i, result)| {
            let sample = completed_sample(&format!("S{}", i + 1), result);
            test.sample(sample.completed_at(i as u64 + 1))
        })
}

/// A test still in progress with one unfinished sample.
#[must_use]
pub fn running_test(id: &str) -> Test {
    Test::new(id).status(WorkStatus::InProgress).sample(
        SampleTest::new("S1")
            .status(WorkStatus::InProgress)
            .step(TestStep::new("measure").in_progress()),
    )
}

/// A test nobody has started.
#[must_use]
pub fn not_started_test(id: &str) -> Test {
    Test::new(id)
}

/// Tablet release with one passing, one failing and one pending parameter.
///
/// | Parameter | Criterion | Test | Result |
/// |-----------|-----------|------|--------|
/// | P1 pH | `6.5-7.5` | T1 | `7.0` |
/// | P2 Water | `NMT 0.5%` | T2 | `0.8%` |
/// | P3 Assay | `NLT 98%` | T3 | running |
#[must_use]
pub fn mixed_release() -> Snapshot {
    SnapshotBuilder::new()
        .description("mixed release")
        .specification("SP-1", "Tablet release", |spec| {
            spec.parameter(
                SpecificationParameter::new("P1", "pH", "6.5-7.5")
                    .unit("pH")
                    .link("T1"),
            )
            .parameter(
                SpecificationParameter::new("P2", "Water", "NMT 0.5%")
                    .unit("%")
                    .mandatory()
                    .link("T2"),
            )
            .parameter(
                SpecificationParameter::new("P3", "Assay", "NLT 98%")
                    .unit("%")
                    .link("T3"),
            )
        })
        .test(completed_test("T1", &["7.0"]))
        .test(completed_test("T2", &["0.8%"]))
        .test(running_test("T3"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay_core::{is_sample_complete, is_test_complete, TestId};

    #[test]
    fn test_builder_declares_parameter_links() {
        let snapshot = SnapshotBuilder::new()
            .specification("SP", "Spec", |s| {
                s.parameter(SpecificationParameter::new("P", "pH", "7").link("T1").link("T2"))
            })
            .build();
        let spec = &snapshot.specifications[0];
        assert!(spec.linked_test_ids.contains(&TestId::new("T1")));
        assert!(spec.linked_test_ids.contains(&TestId::new("T2")));
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_raw_specification_keeps_links() {
        let snapshot = SnapshotBuilder::new()
            .raw_specification(
                Specification::new("SP", "Spec")
                    .parameter(SpecificationParameter::new("P", "pH", "7").link("T1")),
            )
            .build();
        assert!(snapshot.specifications[0].linked_test_ids.is_empty());
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_completed_test_is_complete() {
        let test = completed_test("T", &["1", "2"]);
        assert!(is_test_complete(&test));
        assert_eq!(test.samples.len(), 2);
        assert_eq!(test.samples[1].sample_id.as_str(), "S2");
        assert_eq!(test.samples[1].completed_at, Some(2));
    }

    #[test]
    fn test_running_and_not_started() {
        let running = running_test("T");
        assert!(!is_test_complete(&running));
        assert!(!is_sample_complete(&running.samples[0]));
        assert!(!is_test_complete(&not_started_test("T")));
    }

    #[test]
    fn test_mixed_release_shape() {
        let snapshot = mixed_release();
        assert_eq!(snapshot.description, "mixed release");
        assert_eq!(snapshot.specifications[0].parameters.len(), 3);
        assert_eq!(snapshot.tests.len(), 3);
        assert!(snapshot.validate().is_ok());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_completed_test_is_complete(
                results in proptest::collection::vec("[0-9]{1,3}", 1..6)
            ) {
                let refs: Vec<&str> = results.iter().map(String::as_str).collect();
                let test = completed_test("T", &refs);
                prop_assert!(is_test_complete(&test));
                prop_assert_eq!(test.samples.len(), results.len());
            }
        }
    }
}
