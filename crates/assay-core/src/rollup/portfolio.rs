//! Portfolio rollup across many specifications.
//!
//! This is the dashboard aggregation: how many specifications are compliant,
//! non-compliant, or still incomplete. Every count comes from the same
//! deterministic specification rollup.

use crate::links::TestLookup;
use crate::model::Specification;
use crate::policy::EvaluationPolicy;
use crate::rollup::percentage;
use crate::rollup::specification::{evaluate_specification, SpecificationEvaluation};
use crate::verdict::ComplianceStatus;
use serde::{Deserialize, Serialize};

/// Summary of a set of specifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Specifications that are compliant
    pub compliant: usize,
    /// Specifications that are non-compliant
    pub non_compliant: usize,
    /// Specifications that are incomplete
    pub incomplete: usize,
    /// Number of specifications
    pub total: usize,
    /// Per-specification results, in input order
    pub specifications: Vec<SpecificationEvaluation>,
}

impl PortfolioSummary {
    /// Share of compliant specifications, rounded to a whole percent.
    #[must_use]
    pub fn compliance_rate(&self) -> u32 {
        percentage(self.compliant, self.total)
    }

    /// Specifications in a given state.
    pub fn with_status(
        &self,
        status: ComplianceStatus,
    ) -> impl Iterator<Item = &SpecificationEvaluation> {
        self.specifications.iter().filter(move |s| s.status == status)
    }
}

/// Evaluate every specification and count the outcomes.
#[must_use]
pub fn evaluate_portfolio<'a, I, L>(
    specifications: I,
    tests: &L,
    policy: &EvaluationPolicy,
) -> PortfolioSummary
where
    I: IntoIterator<Item = &'a Specification>,
    L: TestLookup + ?Sized,
{
    let mut summary = PortfolioSummary::default();
    for specification in specifications {
        let evaluation = evaluate_specification(specification, tests, policy);
        match evaluation.status {
            ComplianceStatus::Compliant => summary.compliant += 1,
            ComplianceStatus::NonCompliant => summary.non_compliant += 1,
            ComplianceStatus::Incomplete => summary.incomplete += 1,
        }
        summary.total += 1;
        summary.specifications.push(evaluation);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SampleTest, SpecificationParameter, Test, WorkStatus};

    fn finished(id: &str, result: &str) -> Test {
        Test::new(id).status(WorkStatus::Completed).sample(
            SampleTest::new("S1")
                .status(WorkStatus::Completed)
                .results(result),
        )
    }

    fn specs() -> Vec<Specification> {
        vec![
            Specification::new("A", "passes")
                .link("T-ok")
                .parameter(SpecificationParameter::new("P", "pH", "6.5-7.5")),
            Specification::new("B", "fails")
                .link("T-bad")
                .parameter(SpecificationParameter::new("P", "pH", "6.5-7.5")),
            Specification::new("C", "unlinked")
                .parameter(SpecificationParameter::new("P", "pH", "6.5-7.5")),
        ]
    }

    #[test]
    fn test_portfolio_counts() {
        let tests = vec![finished("T-ok", "7.0"), finished("T-bad", "8.2")];
        let summary = evaluate_portfolio(&specs(), &tests, &EvaluationPolicy::default());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.compliant, 1);
        assert_eq!(summary.non_compliant, 1);
        assert_eq!(summary.incomplete, 1);
        assert_eq!(summary.compliance_rate(), 33);
        assert_eq!(
            summary
                .with_status(ComplianceStatus::NonCompliant)
                .map(|s| s.specification_id.as_str())
                .collect::<Vec<_>>(),
            vec!["B"]
        );
    }

    #[test]
    fn test_portfolio_is_deterministic() {
        let tests = vec![finished("T-ok", "7.0"), finished("T-bad", "8.2")];
        let specs = specs();
        let policy = EvaluationPolicy::default();
        let runs: Vec<_> = (0..5)
            .map(|_| evaluate_portfolio(&specs, &tests, &policy))
            .collect();
        assert!(runs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_empty_portfolio() {
        let summary = evaluate_portfolio(&[], &Vec::<Test>::new(), &EvaluationPolicy::default());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.compliance_rate(), 0);
    }
}
