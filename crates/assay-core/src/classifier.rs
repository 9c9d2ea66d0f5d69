//! Classification of recorded results against a parameter's criterion.

use crate::criterion::Criterion;
use crate::model::{SampleTest, SpecificationParameter};
use crate::policy::EvaluationPolicy;
use crate::verdict::Verdict;

/// Judges raw results for one parameter.
///
/// The criterion is parsed once on construction and reused for every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultClassifier {
    criterion: Criterion,
}

impl ResultClassifier {
    /// Build a classifier for a parameter using the default tolerance.
    #[must_use]
    pub fn new(parameter: &SpecificationParameter) -> Self {
        Self::for_parameter(parameter, &EvaluationPolicy::default())
    }

    /// Build a classifier for a parameter under a policy.
    #[must_use]
    pub fn for_parameter(parameter: &SpecificationParameter, policy: &EvaluationPolicy) -> Self {
        Self {
            criterion: Criterion::parse(&parameter.expected_value).with_tolerance(policy.tolerance),
        }
    }

    /// The cached criterion.
    #[must_use]
    pub const fn criterion(&self) -> &Criterion {
        &self.criterion
    }

    /// Classify a raw result string.
    #[must_use]
    pub fn classify_raw(&self, raw_result: &str) -> Verdict {
        self.criterion.evaluate(raw_result)
    }

    /// Classify the raw text recorded on a sample, if any.
    #[must_use]
    pub fn classify_sample(&self, sample: &SampleTest) -> Option<Verdict> {
        raw_result(sample).map(|raw| self.classify_raw(raw))
    }
}

/// Classify a raw result against a parameter's expected value.
#[must_use]
pub fn classify(parameter: &SpecificationParameter, raw_result: &str) -> Verdict {
    ResultClassifier::new(parameter).classify_raw(raw_result)
}

/// Raw result text of a sample.
///
/// The sample's own `results` wins; otherwise the last step that recorded
/// something.
#[must_use]
pub fn raw_result(sample: &SampleTest) -> Option<&str> {
    non_empty(sample.results.as_deref()).or_else(|| {
        sample
            .steps
            .iter()
            .rev()
            .find_map(|step| non_empty(step.results.as_deref()))
    })
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}
