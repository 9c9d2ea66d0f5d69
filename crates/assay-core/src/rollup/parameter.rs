//! Parameter-level rollup.
//!
//! A parameter is `Pending` until every relevant test is complete. Once they
//! are, any failing or inconclusive representative result makes it `Fail`;
//! otherwise it is `Pass`.

use crate::classifier::{raw_result, ResultClassifier};
use crate::links::{is_sample_complete, is_test_complete, relevant_tests, LinkSource, TestLookup};
use crate::model::{
    ParameterId, SampleId, SampleTest, Specification, SpecificationParameter, Test, TestId,
};
use crate::policy::{EvaluationPolicy, ResultSource};
use crate::verdict::{ParameterStatus, Verdict};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Per-sample inspection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleDetail {
    /// Sample identity
    pub sample_id: SampleId,
    /// Whether the sample and all its steps are complete
    pub complete: bool,
    /// Raw text the verdict was computed from
    pub raw_result: Option<String>,
    /// Verdict stored on the sample
    pub recorded: Option<Verdict>,
    /// Verdict under the active policy
    pub verdict: Option<Verdict>,
}

/// Per-test inspection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDetail {
    /// Test identity
    pub test_id: TestId,
    /// Test display name
    pub name: String,
    /// Whether the test counts as complete
    pub complete: bool,
    /// Most recently completed sample, once the test is complete
    pub representative: Option<SampleId>,
    /// Representative verdict, once the test is complete
    pub verdict: Option<Verdict>,
    /// Every sample of the test, in list order
    pub samples: Vec<SampleDetail>,
}

/// Outcome of evaluating one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterEvaluation {
    /// Parameter identity
    pub parameter_id: ParameterId,
    /// Aggregate status
    pub status: ParameterStatus,
    /// Tier the relevant tests came from
    pub source: LinkSource,
    /// Details of every resolved relevant test
    pub test_details: Vec<TestDetail>,
    /// Relevant ids with no matching test in the snapshot
    pub missing_tests: Vec<TestId>,
    /// Parameter links ignored because the specification does not declare them
    pub undeclared_tests: Vec<TestId>,
}

impl ParameterEvaluation {
    /// Relevant test ids that were resolved.
    pub fn test_ids(&self) -> impl Iterator<Item = &TestId> {
        self.test_details.iter().map(|d| &d.test_id)
    }

    /// Number of resolved tests that are complete.
    #[must_use]
    pub fn completed_tests(&self) -> usize {
        self.test_details.iter().filter(|d| d.complete).count()
    }
}

/// Evaluate one parameter of a specification.
#[must_use]
pub fn evaluate_parameter<L>(
    specification: &Specification,
    parameter: &SpecificationParameter,
    tests: &L,
    policy: &EvaluationPolicy,
) -> ParameterEvaluation
where
    L: TestLookup + ?Sized,
{
    let relevant = relevant_tests(specification, parameter);
    let classifier = ResultClassifier::for_parameter(parameter, policy);

    let mut test_details = Vec::with_capacity(relevant.ids.len());
    let mut missing_tests = Vec::new();
    for id in &relevant.ids {
        match tests.lookup(id) {
            Some(test) => test_details.push(test_detail(test, &classifier, policy)),
            None => {
                debug!(
                    parameter = %parameter.id,
                    test = %id,
                    "relevant test not in snapshot; skipping"
                );
                missing_tests.push(id.clone());
            }
        }
    }

    let status = reduce(&test_details);
    debug!(
        specification = %specification.id,
        parameter = %parameter.id,
        %status,
        tests = test_details.len(),
        missing = missing_tests.len(),
        "parameter evaluated"
    );

    ParameterEvaluation {
        parameter_id: parameter.id.clone(),
        status,
        source: relevant.source,
        test_details,
        missing_tests,
        undeclared_tests: relevant.undeclared.into_iter().collect(),
    }
}

/// Incompleteness wins, then any non-pass verdict fails the parameter.
fn reduce(details: &[TestDetail]) -> ParameterStatus {
    if details.is_empty() || details.iter().any(|d| !d.complete) {
        return ParameterStatus::Pending;
    }
    if details.iter().all(|d| d.verdict == Some(Verdict::Pass)) {
        ParameterStatus::Pass
    } else {
        ParameterStatus::Fail
    }
}

fn test_detail(
    test: &Test,
    classifier: &ResultClassifier,
    policy: &EvaluationPolicy,
) -> TestDetail {
    let samples: Vec<SampleDetail> = test
        .samples
        .iter()
        .map(|s| sample_detail(s, classifier, policy))
        .collect();

    let complete = is_test_complete(test);
    let (representative, verdict) = if complete {
        let representative = representative_index(&test.samples);
        let verdict = representative
            .and_then(|i| samples[i].verdict)
            .unwrap_or(Verdict::Inconclusive);
        (representative.map(|i| samples[i].sample_id.clone()), Some(verdict))
    } else {
        (None, None)
    };

    trace!(test = %test.id, complete, verdict = ?verdict, "test classified");

    TestDetail {
        test_id: test.id.clone(),
        name: test.name.clone(),
        complete,
        representative,
        verdict,
        samples,
    }
}

fn sample_detail(
    sample: &SampleTest,
    classifier: &ResultClassifier,
    policy: &EvaluationPolicy,
) -> SampleDetail {
    let raw = raw_result(sample);
    let computed = raw.map(|r| classifier.classify_raw(r));
    let verdict = match policy.result_source {
        ResultSource::PreferRaw => computed.or(sample.result_status),
        ResultSource::PreferRecorded => sample.result_status.or(computed),
    };

    SampleDetail {
        sample_id: sample.sample_id.clone(),
        complete: is_sample_complete(sample),
        raw_result: raw.map(str::to_string),
        recorded: sample.result_status,
        verdict,
    }
}

/// Most recently completed sample: highest stamp, later position on ties.
fn representative_index(samples: &[SampleTest]) -> Option<usize> {
    samples
        .iter()
        .enumerate()
        .filter(|(_, s)| is_sample_complete(s))
        .max_by_key(|(i, s)| (s.completed_at, *i))
        .map(|(i, _)| i)
}
