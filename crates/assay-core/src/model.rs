//! Snapshot data model for specifications, tests, samples, and steps.
//!
//! These records are owned and mutated by the calling store. The engine only
//! ever borrows them, so every evaluation runs over an immutable snapshot.
//!
//! # Example
//!
//! ```
//! use assay_core::{SampleTest, Test, TestStep, WorkStatus};
//!
//! let sample = SampleTest::new("S-001")
//!     .status(WorkStatus::Completed)
//!     .results("7.1")
//!     .step(TestStep::new("prep").complete())
//!     .step(TestStep::new("read").complete());
//! let test = Test::new("T-pH").status(WorkStatus::Completed).sample(sample);
//!
//! assert!(test.samples[0].is_complete());
//! ```

use crate::error::ModelError;
use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a [`Test`].
    TestId
);
string_id!(
    /// Identifier of a [`SampleTest`] within a test.
    SampleId
);
string_id!(
    /// Identifier of a [`SpecificationParameter`].
    ParameterId
);
string_id!(
    /// Identifier of a [`Specification`].
    SpecificationId
);
string_id!(
    /// Identifier of a [`TestStep`].
    StepId
);

/// Category of a measurable quality attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParameterType {
    /// Appearance, density, particle size...
    Physical,
    /// Assay, impurities, pH...
    Chemical,
    /// Bioburden and pathogen limits
    Microbial,
    /// Dissolution, disintegration...
    Performance,
    /// Shelf-life attributes
    Stability,
    /// Anything else
    #[default]
    Other,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Physical => "Physical",
            Self::Chemical => "Chemical",
            Self::Microbial => "Microbial",
            Self::Performance => "Performance",
            Self::Stability => "Stability",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Numeric acceptance window recorded next to the free-text criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptableRange {
    /// Lower limit (inclusive)
    pub min: f64,
    /// Upper limit (inclusive)
    pub max: f64,
}

impl AcceptableRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check whether a value lies inside the window.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One measurable quality attribute with an expected-value criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationParameter {
    /// Stable parameter identity
    pub id: ParameterId,
    /// Display name
    pub name: String,
    /// Attribute category
    #[serde(rename = "type", default)]
    pub parameter_type: ParameterType,
    /// Unit of measure
    #[serde(default)]
    pub unit: String,
    /// Free-text acceptance criterion, e.g. `"6.5-7.5"` or `"NLT 80%"`
    pub expected_value: String,
    /// Structured window, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_range: Option<AcceptableRange>,
    /// Compendial or in-house method reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_method: Option<String>,
    /// Whether the attribute is release-critical
    #[serde(default)]
    pub mandatory: bool,
    /// Tests explicitly covering this parameter
    #[serde(default)]
    pub linked_test_ids: BTreeSet<TestId>,
}

impl SpecificationParameter {
    /// Create a parameter with a name and a criterion.
    #[must_use]
    pub fn new(
        id: impl Into<ParameterId>,
        name: impl Into<String>,
        expected_value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parameter_type: ParameterType::Other,
            unit: String::new(),
            expected_value: expected_value.into(),
            acceptable_range: None,
            test_method: None,
            mandatory: false,
            linked_test_ids: BTreeSet::new(),
        }
    }

    /// Set the attribute category.
    #[must_use]
    pub fn parameter_type(mut self, parameter_type: ParameterType) -> Self {
        self.parameter_type = parameter_type;
        self
    }

    /// Set the unit.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the acceptable range.
    #[must_use]
    pub fn acceptable_range(mut self, min: f64, max: f64) -> Self {
        self.acceptable_range = Some(AcceptableRange::new(min, max));
        self
    }

    /// Set the test method reference.
    #[must_use]
    pub fn test_method(mut self, method: impl Into<String>) -> Self {
        self.test_method = Some(method.into());
        self
    }

    /// Mark the parameter as mandatory.
    #[must_use]
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Link a test to this parameter.
    #[must_use]
    pub fn link(mut self, test_id: impl Into<TestId>) -> Self {
        self.linked_test_ids.insert(test_id.into());
        self
    }
}

/// Lifecycle state of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpecificationStatus {
    /// Being authored
    #[default]
    Draft,
    /// Approved and in force
    Active,
    /// Superseded
    Archived,
}

/// A named set of acceptance-criteria parameters governing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    /// Stable specification identity
    pub id: SpecificationId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Ordered parameters
    #[serde(default)]
    pub parameters: Vec<SpecificationParameter>,
    /// Tests declared against the whole specification
    #[serde(default)]
    pub linked_test_ids: BTreeSet<TestId>,
    /// Document lifecycle state
    #[serde(default)]
    pub status: SpecificationStatus,
}

impl Specification {
    /// Create an empty specification.
    #[must_use]
    pub fn new(id: impl Into<SpecificationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parameters: Vec::new(),
            linked_test_ids: BTreeSet::new(),
            status: SpecificationStatus::Draft,
        }
    }

    /// Append a parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: SpecificationParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Declare a test against the specification.
    #[must_use]
    pub fn link(mut self, test_id: impl Into<TestId>) -> Self {
        self.linked_test_ids.insert(test_id.into());
        self
    }

    /// Set the lifecycle state.
    #[must_use]
    pub fn status(mut self, status: SpecificationStatus) -> Self {
        self.status = status;
        self
    }

    /// Look up a parameter by id.
    #[must_use]
    pub fn find_parameter(&self, id: &ParameterId) -> Option<&SpecificationParameter> {
        self.parameters.iter().find(|p| &p.id == id)
    }

    /// Parameter links that the specification does not declare itself.
    #[must_use]
    pub fn undeclared_links(&self) -> Vec<(ParameterId, TestId)> {
        self.parameters
            .iter()
            .flat_map(|p| {
                p.linked_test_ids
                    .iter()
                    .filter(|id| !self.linked_test_ids.contains(*id))
                    .map(move |id| (p.id.clone(), id.clone()))
            })
            .collect()
    }

    /// Check the structural invariants of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateParameter`] when two parameters share an
    /// id, or [`ModelError::UndeclaredLink`] for the first parameter link that
    /// the specification does not declare.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = BTreeSet::new();
        for parameter in &self.parameters {
            if !seen.insert(&parameter.id) {
                return Err(ModelError::DuplicateParameter {
                    specification: self.id.clone(),
                    parameter: parameter.id.clone(),
                });
            }
        }

        if let Some((parameter, test)) = self.undeclared_links().into_iter().next() {
            return Err(ModelError::UndeclaredLink {
                specification: self.id.clone(),
                parameter,
                test,
            });
        }

        Ok(())
    }
}

/// Progress of a test or a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkStatus {
    /// Not yet started
    #[default]
    NotStarted,
    /// Some work recorded
    InProgress,
    /// All work done
    Completed,
}

/// Progress of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StepStatus {
    /// Not yet started
    #[default]
    NotStarted,
    /// Underway
    InProgress,
    /// Finished
    Complete,
}

/// Leaf unit of lab work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    /// Step identity
    pub id: StepId,
    /// Progress
    #[serde(default)]
    pub status: StepStatus,
    /// Raw recorded result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
}

impl TestStep {
    /// Create a step that has not started.
    #[must_use]
    pub fn new(id: impl Into<StepId>) -> Self {
        Self {
            id: id.into(),
            status: StepStatus::NotStarted,
            results: None,
        }
    }

    /// Mark the step complete.
    #[must_use]
    pub fn complete(mut self) -> Self {
        self.status = StepStatus::Complete;
        self
    }

    /// Mark the step in progress.
    #[must_use]
    pub fn in_progress(mut self) -> Self {
        self.status = StepStatus::InProgress;
        self
    }

    /// Record a raw result.
    #[must_use]
    pub fn results(mut self, results: impl Into<String>) -> Self {
        self.results = Some(results.into());
        self
    }

    /// Move the step one state forward. Complete steps stay complete.
    pub fn advance(&mut self) -> StepStatus {
        self.status = match self.status {
            StepStatus::NotStarted => StepStatus::InProgress,
            StepStatus::InProgress | StepStatus::Complete => StepStatus::Complete,
        };
        self.status
    }

    /// Whether the step is finished.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == StepStatus::Complete
    }
}

/// One sample run through a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleTest {
    /// Sample identity
    pub sample_id: SampleId,
    /// Recorded progress
    #[serde(default)]
    pub status: WorkStatus,
    /// Raw result text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    /// Verdict recorded by the terminal step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_status: Option<Verdict>,
    /// Monotonic completion stamp, larger is more recent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
    /// Steps in execution order
    #[serde(default)]
    pub steps: Vec<TestStep>,
}

impl SampleTest {
    /// Create a sample that has not started.
    #[must_use]
    pub fn new(sample_id: impl Into<SampleId>) -> Self {
        Self {
            sample_id: sample_id.into(),
            status: WorkStatus::NotStarted,
            results: None,
            result_status: None,
            completed_at: None,
            steps: Vec::new(),
        }
    }

    /// Set the recorded progress.
    #[must_use]
    pub fn status(mut self, status: WorkStatus) -> Self {
        self.status = status;
        self
    }

    /// Record raw result text.
    #[must_use]
    pub fn results(mut self, results: impl Into<String>) -> Self {
        self.results = Some(results.into());
        self
    }

    /// Record a verdict.
    #[must_use]
    pub fn result_status(mut self, verdict: Verdict) -> Self {
        self.result_status = Some(verdict);
        self
    }

    /// Set the completion stamp.
    #[must_use]
    pub fn completed_at(mut self, stamp: u64) -> Self {
        self.completed_at = Some(stamp);
        self
    }

    /// Append a step.
    #[must_use]
    pub fn step(mut self, step: TestStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Progress implied by the steps alone.
    ///
    /// A sample without steps reports its recorded status.
    #[must_use]
    pub fn derived_status(&self) -> WorkStatus {
        if self.steps.is_empty() {
            return self.status;
        }
        if self.steps.iter().all(TestStep::is_complete) {
            WorkStatus::Completed
        } else if self
            .steps
            .iter()
            .any(|s| s.status != StepStatus::NotStarted)
        {
            WorkStatus::InProgress
        } else {
            WorkStatus::NotStarted
        }
    }

    /// Complete iff marked `Completed` and every step is `Complete`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == WorkStatus::Completed && self.steps.iter().all(TestStep::is_complete)
    }
}

/// A unit of lab work applied to one or more samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    /// Test identity
    pub id: TestId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Samples run through this test
    #[serde(default)]
    pub samples: Vec<SampleTest>,
    /// Recorded progress
    #[serde(default)]
    pub status: WorkStatus,
}

impl Test {
    /// Create a test that has not started.
    #[must_use]
    pub fn new(id: impl Into<TestId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            samples: Vec::new(),
            status: WorkStatus::NotStarted,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the recorded progress.
    #[must_use]
    pub fn status(mut self, status: WorkStatus) -> Self {
        self.status = status;
        self
    }

    /// Append a sample.
    #[must_use]
    pub fn sample(mut self, sample: SampleTest) -> Self {
        self.samples.push(sample);
        self
    }

    /// Look up a sample by id.
    #[must_use]
    pub fn find_sample(&self, id: &SampleId) -> Option<&SampleTest> {
        self.samples.iter().find(|s| &s.sample_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_advance() {
        let mut step = TestStep::new("s1");
        assert_eq!(step.advance(), StepStatus::InProgress);
        assert_eq!(step.advance(), StepStatus::Complete);
        assert_eq!(step.advance(), StepStatus::Complete);
        assert!(step.is_complete());
    }

    #[test]
    fn test_sample_derived_status() {
        let sample = SampleTest::new("a");
        assert_eq!(sample.derived_status(), WorkStatus::NotStarted);

        let sample = SampleTest::new("a")
            .step(TestStep::new("1").complete())
            .step(TestStep::new("2"));
        assert_eq!(sample.derived_status(), WorkStatus::InProgress);

        let sample = SampleTest::new("a")
            .step(TestStep::new("1").complete())
            .step(TestStep::new("2").complete());
        assert_eq!(sample.derived_status(), WorkStatus::Completed);
    }

    #[test]
    fn test_sample_complete_requires_all_steps() {
        let sample = SampleTest::new("a")
            .status(WorkStatus::Completed)
            .step(TestStep::new("1").complete())
            .step(TestStep::new("2").in_progress());
        assert!(!sample.is_complete());

        let sample = SampleTest::new("a").status(WorkStatus::Completed);
        assert!(sample.is_complete());
    }

    #[test]
    fn test_undeclared_links() {
        let spec = Specification::new("SP-1", "Tablet")
            .link("T1")
            .parameter(SpecificationParameter::new("P1", "pH", "6.5-7.5").link("T1"))
            .parameter(SpecificationParameter::new("P2", "Assay", "NLT 80%").link("T9"));

        let undeclared = spec.undeclared_links();
        assert_eq!(undeclared, vec![(ParameterId::new("P2"), TestId::new("T9"))]);
        assert!(matches!(
            spec.validate(),
            Err(ModelError::UndeclaredLink { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_parameter() {
        let spec = Specification::new("SP-1", "Tablet")
            .parameter(SpecificationParameter::new("P1", "pH", "7"))
            .parameter(SpecificationParameter::new("P1", "pH again", "7"));
        assert!(matches!(
            spec.validate(),
            Err(ModelError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_validate_ok() {
        let spec = Specification::new("SP-1", "Tablet")
            .link("T1")
            .parameter(SpecificationParameter::new("P1", "pH", "7").link("T1"));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_parameter_serde_camel_case() {
        let parameter = SpecificationParameter::new("P1", "pH", "6.5-7.5")
            .parameter_type(ParameterType::Chemical)
            .link("T1");
        let json = serde_json::to_string(&parameter).unwrap();
        assert!(json.contains("\"expectedValue\":\"6.5-7.5\""));
        assert!(json.contains("\"linkedTestIds\":[\"T1\"]"));
        assert!(json.contains("\"type\":\"Chemical\""));
    }

    #[test]
    fn test_acceptable_range_contains() {
        let range = AcceptableRange::new(6.5, 7.5);
        assert!(range.contains(6.5));
        assert!(range.contains(7.5));
        assert!(!range.contains(7.51));
    }
}
