//! Policy-bound entry point to the evaluation functions.

use crate::error::PolicyError;
use crate::links::TestLookup;
use crate::model::{Specification, SpecificationParameter};
use crate::policy::EvaluationPolicy;
use crate::report::ComplianceReport;
use crate::rollup::parameter::{evaluate_parameter, ParameterEvaluation};
use crate::rollup::portfolio::{evaluate_portfolio, PortfolioSummary};
use crate::rollup::specification::{evaluate_specification, SpecificationEvaluation};

/// Evaluates snapshots under one [`EvaluationPolicy`].
///
/// The engine holds no state besides the policy; callers re-run it whenever
/// their snapshot changes.
///
/// # Example
///
/// ```
/// use assay_core::{
///     ComplianceEngine, ComplianceStatus, EvaluationPolicy, SampleTest, Specification,
///     SpecificationParameter, Test, WorkStatus,
/// };
///
/// let spec = Specification::new("SP-1", "Tablet")
///     .link("T1")
///     .parameter(SpecificationParameter::new("P1", "pH", "6.5-7.5"));
/// let tests = vec![Test::new("T1")
///     .status(WorkStatus::Completed)
///     .sample(SampleTest::new("S1").status(WorkStatus::Completed).results("7.2"))];
///
/// let engine = ComplianceEngine::new(EvaluationPolicy::default());
/// let result = engine.evaluate_specification(&spec, &tests);
/// assert_eq!(result.status, ComplianceStatus::Compliant);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplianceEngine {
    policy: EvaluationPolicy,
}

impl ComplianceEngine {
    /// Create an engine with a policy.
    ///
    /// The policy is not validated; an unusable tolerance falls back to
    /// [`DEFAULT_TOLERANCE`](crate::DEFAULT_TOLERANCE). Use
    /// [`ComplianceEngine::try_new`] to reject it instead.
    #[must_use]
    pub const fn new(policy: EvaluationPolicy) -> Self {
        Self { policy }
    }

    /// Create an engine after checking the policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidValue`] for a tolerance that is not
    /// finite and positive.
    pub fn try_new(policy: EvaluationPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> &EvaluationPolicy {
        &self.policy
    }

    /// Evaluate one parameter.
    #[must_use]
    pub fn evaluate_parameter<L: TestLookup + ?Sized>(
        &self,
        specification: &Specification,
        parameter: &SpecificationParameter,
        tests: &L,
    ) -> ParameterEvaluation {
        evaluate_parameter(specification, parameter, tests, &self.policy)
    }

    /// Evaluate a specification.
    #[must_use]
    pub fn evaluate_specification<L: TestLookup + ?Sized>(
        &self,
        specification: &Specification,
        tests: &L,
    ) -> SpecificationEvaluation {
        evaluate_specification(specification, tests, &self.policy)
    }

    /// Evaluate many specifications.
    #[must_use]
    pub fn evaluate_portfolio<'a, I, L>(&self, specifications: I, tests: &L) -> PortfolioSummary
    where
        I: IntoIterator<Item = &'a Specification>,
        L: TestLookup + ?Sized,
    {
        evaluate_portfolio(specifications, tests, &self.policy)
    }

    /// Evaluate a specification and flatten it into report rows.
    #[must_use]
    pub fn report<L: TestLookup + ?Sized>(
        &self,
        specification: &Specification,
        tests: &L,
    ) -> ComplianceReport {
        let evaluation = self.evaluate_specification(specification, tests);
        ComplianceReport::from_evaluation(specification, &evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SampleTest, Test, WorkStatus};
    use crate::verdict::{ComplianceStatus, ParameterStatus};

    fn snapshot() -> (Specification, Vec<Test>) {
        let spec = Specification::new("SP-1", "Tablet")
            .link("T1")
            .link("T2")
            .parameter(SpecificationParameter::new("P1", "pH", "6.5-7.5").link("T1"))
            .parameter(SpecificationParameter::new("P2", "Assay", "NLT 98%").link("T2"));
        let tests = vec![
            Test::new("T1").status(WorkStatus::Completed).sample(
                SampleTest::new("S1")
                    .status(WorkStatus::Completed)
                    .results("8.0"),
            ),
            Test::new("T2").status(WorkStatus::InProgress),
        ];
        (spec, tests)
    }

    #[test]
    fn test_engine_applies_policy() {
        let (spec, tests) = snapshot();
        let strict = ComplianceEngine::new(EvaluationPolicy::fail_first());
        let lenient = ComplianceEngine::new(EvaluationPolicy::pending_first());
        assert_eq!(
            strict.evaluate_specification(&spec, &tests).status,
            ComplianceStatus::NonCompliant
        );
        assert_eq!(
            lenient.evaluate_specification(&spec, &tests).status,
            ComplianceStatus::Incomplete
        );
    }

    #[test]
    fn test_engine_parameter_and_report() {
        let (spec, tests) = snapshot();
        let engine = ComplianceEngine::default();
        let p1 = engine.evaluate_parameter(&spec, &spec.parameters[0], &tests);
        assert_eq!(p1.status, ParameterStatus::Fail);

        let report = engine.report(&spec, &tests);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].result, "8.0");
    }

    #[test]
    fn test_try_new_rejects_unusable_tolerance() {
        for tolerance in [0.0, -1.0, f64::NAN] {
            let policy = EvaluationPolicy::default().with_tolerance(tolerance);
            assert!(matches!(
                ComplianceEngine::try_new(policy),
                Err(PolicyError::InvalidValue { .. })
            ));
        }
        assert!(ComplianceEngine::try_new(EvaluationPolicy::pending_first()).is_ok());
    }

    #[test]
    fn test_unvalidated_zero_tolerance_still_matches_exact_values() {
        let spec = Specification::new("SP-2", "Exact")
            .link("T1")
            .parameter(SpecificationParameter::new("P1", "Count", "7").link("T1"));
        let tests = vec![Test::new("T1").status(WorkStatus::Completed).sample(
            SampleTest::new("S1")
                .status(WorkStatus::Completed)
                .results("7"),
        )];
        let engine = ComplianceEngine::new(EvaluationPolicy::default().with_tolerance(0.0));
        assert_eq!(
            engine.evaluate_specification(&spec, &tests).status,
            ComplianceStatus::Compliant
        );
    }

    #[test]
    fn test_engine_portfolio() {
        let (spec, tests) = snapshot();
        let engine = ComplianceEngine::default();
        let summary = engine.evaluate_portfolio([&spec], &tests);
        assert_eq!(summary.non_compliant, 1);
        assert!(engine.policy().fail_first);
    }
}
