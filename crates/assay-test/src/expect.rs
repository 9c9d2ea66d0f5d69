//! Expectation helpers for evaluation results.
//!
//! ```
//! use assay_core::{ComplianceStatus, EvaluationPolicy, Verdict};
//! use assay_test::expect::{expect_criterion, expect_specification};
//! use assay_test::fixture::mixed_release;
//!
//! expect_criterion("NMT 0.5%").on("0.3%").to_be(Verdict::Pass);
//!
//! let evaluation = mixed_release()
//!     .evaluate_specification(&"SP-1".into(), &EvaluationPolicy::default())
//!     .unwrap();
//! expect_specification(&evaluation)
//!     .to_be(ComplianceStatus::NonCompliant)
//!     .to_count(1, 1, 1);
//! ```

use assay_core::{
    evaluate, ComplianceStatus, ParameterEvaluation, ParameterStatus, SpecificationEvaluation,
    TestId, Verdict,
};

/// Expectation on a criterion string.
pub struct CriterionExpectation<'a> {
    expected: &'a str,
}

/// Start an expectation on a criterion string.
pub fn expect_criterion(expected: &str) -> CriterionExpectation<'_> {
    CriterionExpectation { expected }
}

impl<'a> CriterionExpectation<'a> {
    /// Bind the measured value.
    pub fn on(self, measured: &'a str) -> MeasuredExpectation<'a> {
        MeasuredExpectation {
            expected: self.expected,
            measured,
        }
    }
}

/// Expectation on a criterion applied to a measured value.
pub struct MeasuredExpectation<'a> {
    expected: &'a str,
    measured: &'a str,
}

impl MeasuredExpectation<'_> {
    /// Assert the verdict.
    pub fn to_be(self, verdict: Verdict) {
        let actual = evaluate(self.expected, self.measured);
        if actual != verdict {
            panic!(
                "Expected {:?} against {:?} to be {:?} but got {:?}",
                self.measured, self.expected, verdict, actual
            );
        }
    }

    /// Assert [`Verdict::Pass`].
    pub fn to_pass(self) {
        self.to_be(Verdict::Pass);
    }

    /// Assert [`Verdict::Fail`].
    pub fn to_fail(self) {
        self.to_be(Verdict::Fail);
    }

    /// Assert [`Verdict::Inconclusive`].
    pub fn to_be_inconclusive(self) {
        self.to_be(Verdict::Inconclusive);
    }
}

/// Expectation on a parameter evaluation.
pub struct ParameterExpectation<'a> {
    evaluation: &'a ParameterEvaluation,
}

/// Start an expectation on a parameter evaluation.
pub fn expect_parameter(evaluation: &ParameterEvaluation) -> ParameterExpectation<'_> {
    ParameterExpectation { evaluation }
}

impl ParameterExpectation<'_> {
    /// Assert the parameter status.
    pub fn to_be(self, status: ParameterStatus) -> Self {
        if self.evaluation.status != status {
            panic!(
                "Expected parameter {} to be {:?} but got {:?}",
                self.evaluation.parameter_id, status, self.evaluation.status
            );
        }
        self
    }

    /// Assert the resolved relevant tests, in id order.
    pub fn to_use_tests(self, ids: &[&str]) -> Self {
        let actual: Vec<&str> = self.evaluation.test_ids().map(TestId::as_str).collect();
        if actual != ids {
            panic!(
                "Expected parameter {} to use tests {:?} but got {:?}",
                self.evaluation.parameter_id, ids, actual
            );
        }
        self
    }
}

/// Expectation on a specification evaluation.
pub struct SpecificationExpectation<'a> {
    evaluation: &'a SpecificationEvaluation,
}

/// Start an expectation on a specification evaluation.
pub fn expect_specification(evaluation: &SpecificationEvaluation) -> SpecificationExpectation<'_> {
    SpecificationExpectation { evaluation }
}

impl SpecificationExpectation<'_> {
    /// Assert the compliance status.
    pub fn to_be(self, status: ComplianceStatus) -> Self {
        if self.evaluation.status != status {
            panic!(
                "Expected specification {} to be {} but got {}",
                self.evaluation.specification_id, status, self.evaluation.status
            );
        }
        self
    }

    /// Assert passing, failing and pending parameter counts.
    pub fn to_count(self, passing: usize, failing: usize, pending: usize) -> Self {
        let e = self.evaluation;
        let actual = (e.passing, e.failing, e.pending);
        if actual != (passing, failing, pending) {
            panic!(
                "Expected specification {} counts {:?} but got {:?}",
                e.specification_id,
                (passing, failing, pending),
                actual
            );
        }
        self
    }

    /// Assert the status of one parameter.
    pub fn parameter(self, id: &str, status: ParameterStatus) -> Self {
        match self
            .evaluation
            .parameters
            .iter()
            .find(|p| p.parameter_id.as_str() == id)
        {
            Some(parameter) => {
                expect_parameter(parameter).to_be(status);
            }
            None => panic!(
                "Specification {} has no parameter {}",
                self.evaluation.specification_id, id
            ),
        }
        self
    }
}
