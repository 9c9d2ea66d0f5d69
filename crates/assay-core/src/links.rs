//! Resolution of the tests that are relevant to a parameter.
//!
//! Parameter-level links are authoritative when present. A parameter without
//! links is covered by every test linked to its specification. The two tiers
//! are never merged.

use crate::model::{SampleTest, Specification, SpecificationParameter, Test, TestId, WorkStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::BuildHasher;
use tracing::warn;

/// Which tier supplied the relevant test set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkSource {
    /// Explicit parameter links
    Parameter,
    /// Fallback to the specification's links
    Specification,
    /// No links at either tier
    None,
}

/// The relevant test set for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantTests {
    /// Test ids to evaluate, in id order
    pub ids: BTreeSet<TestId>,
    /// Tier the ids came from
    pub source: LinkSource,
    /// Parameter links dropped because the specification does not declare them
    pub undeclared: BTreeSet<TestId>,
}

impl RelevantTests {
    /// Whether there is nothing to evaluate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Determine the tests relevant to `parameter` within `specification`.
#[must_use]
pub fn relevant_tests(
    specification: &Specification,
    parameter: &SpecificationParameter,
) -> RelevantTests {
    if parameter.linked_test_ids.is_empty() {
        let source = if specification.linked_test_ids.is_empty() {
            LinkSource::None
        } else {
            LinkSource::Specification
        };
        return RelevantTests {
            ids: specification.linked_test_ids.clone(),
            source,
            undeclared: BTreeSet::new(),
        };
    }

    let (ids, undeclared): (BTreeSet<TestId>, BTreeSet<TestId>) = parameter
        .linked_test_ids
        .iter()
        .cloned()
        .partition(|id| specification.linked_test_ids.contains(id));

    if !undeclared.is_empty() {
        warn!(
            specification = %specification.id,
            parameter = %parameter.id,
            undeclared = ?undeclared,
            "parameter links tests the specification does not declare; ignoring them"
        );
    }

    RelevantTests {
        ids,
        source: LinkSource::Parameter,
        undeclared,
    }
}

/// A sample is complete when marked `Completed` and every step is complete.
#[must_use]
pub fn is_sample_complete(sample: &SampleTest) -> bool {
    sample.is_complete()
}

/// A test is complete when marked `Completed` and every sample is complete.
#[must_use]
pub fn is_test_complete(test: &Test) -> bool {
    test.status == WorkStatus::Completed && test.samples.iter().all(is_sample_complete)
}

/// Read-only access to tests by id.
pub trait TestLookup {
    /// Find a test by id.
    fn lookup(&self, id: &TestId) -> Option<&Test>;
}

impl<S: BuildHasher> TestLookup for HashMap<TestId, Test, S> {
    fn lookup(&self, id: &TestId) -> Option<&Test> {
        self.get(id)
    }
}

impl TestLookup for BTreeMap<TestId, Test> {
    fn lookup(&self, id: &TestId) -> Option<&Test> {
        self.get(id)
    }
}

impl TestLookup for [Test] {
    fn lookup(&self, id: &TestId) -> Option<&Test> {
        self.iter().find(|t| &t.id == id)
    }
}

impl TestLookup for Vec<Test> {
    fn lookup(&self, id: &TestId) -> Option<&Test> {
        self.as_slice().lookup(id)
    }
}

/// Index a list of tests by id. Later duplicates replace earlier ones.
#[must_use]
pub fn index_tests<'a, I>(tests: I) -> BTreeMap<TestId, Test>
where
    I: IntoIterator<Item = &'a Test>,
{
    tests.into_iter().map(|t| (t.id.clone(), t.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestStep;

    fn spec() -> Specification {
        Specification::new("SP-1", "Tablet").link("T1").link("T2")
    }

    #[test]
    fn test_parameter_links_are_authoritative() {
        let spec = spec();
        let p = SpecificationParameter::new("P1", "pH", "6.5-7.5").link("T2");
        let relevant = relevant_tests(&spec, &p);
        assert_eq!(relevant.ids, BTreeSet::from([TestId::new("T2")]));
        assert_eq!(relevant.source, LinkSource::Parameter);
    }

    #[test]
    fn test_falls_back_to_specification_links() {
        let spec = spec();
        let p = SpecificationParameter::new("P1", "pH", "6.5-7.5");
        let relevant = relevant_tests(&spec, &p);
        assert_eq!(
            relevant.ids,
            BTreeSet::from([TestId::new("T1"), TestId::new("T2")])
        );
        assert_eq!(relevant.source, LinkSource::Specification);
    }

    #[test]
    fn test_tiers_are_not_merged() {
        let spec = spec();
        let p = SpecificationParameter::new("P1", "pH", "7").link("T1");
        let relevant = relevant_tests(&spec, &p);
        assert!(!relevant.ids.contains(&TestId::new("T2")));
    }

    #[test]
    fn test_no_links_anywhere() {
        let spec = Specification::new("SP-1", "Tablet");
        let p = SpecificationParameter::new("P1", "pH", "7");
        let relevant = relevant_tests(&spec, &p);
        assert!(relevant.is_empty());
        assert_eq!(relevant.source, LinkSource::None);
    }

    #[test]
    fn test_undeclared_links_are_dropped() {
        let spec = spec();
        let p = SpecificationParameter::new("P1", "pH", "7")
            .link("T1")
            .link("T9");
        let relevant = relevant_tests(&spec, &p);
        assert_eq!(relevant.ids, BTreeSet::from([TestId::new("T1")]));
        assert_eq!(relevant.undeclared, BTreeSet::from([TestId::new("T9")]));
    }

    #[test]
    fn test_only_undeclared_links_do_not_fall_back() {
        let spec = spec();
        let p = SpecificationParameter::new("P1", "pH", "7").link("T9");
        let relevant = relevant_tests(&spec, &p);
        assert!(relevant.is_empty());
        assert_eq!(relevant.source, LinkSource::Parameter);
    }

    #[test]
    fn test_test_completeness() {
        let done = SampleTest::new("S1").status(WorkStatus::Completed);
        let running = SampleTest::new("S2").status(WorkStatus::InProgress);

        let test = Test::new("T1")
            .status(WorkStatus::Completed)
            .sample(done.clone());
        assert!(is_test_complete(&test));

        let test = Test::new("T1")
            .status(WorkStatus::Completed)
            .sample(done.clone())
            .sample(running);
        assert!(!is_test_complete(&test));

        let test = Test::new("T1").status(WorkStatus::InProgress).sample(done);
        assert!(!is_test_complete(&test));
    }

    #[test]
    fn test_sample_with_open_step_is_incomplete() {
        let sample = SampleTest::new("S1")
            .status(WorkStatus::Completed)
            .step(TestStep::new("read").in_progress());
        assert!(!is_sample_complete(&sample));
    }

    #[test]
    fn test_lookup_impls() {
        let tests = vec![Test::new("T1"), Test::new("T2")];
        assert!(tests.lookup(&TestId::new("T2")).is_some());
        assert!(tests.as_slice().lookup(&TestId::new("T3")).is_none());

        let index = index_tests(&tests);
        assert!(index.lookup(&TestId::new("T1")).is_some());

        let map: HashMap<TestId, Test> = tests.into_iter().map(|t| (t.id.clone(), t)).collect();
        assert!(map.lookup(&TestId::new("T1")).is_some());
    }
}
