//! Specification-level rollup.

use crate::links::TestLookup;
use crate::model::{Specification, SpecificationId};
use crate::policy::EvaluationPolicy;
use crate::rollup::parameter::{evaluate_parameter, ParameterEvaluation};
use crate::rollup::percentage;
use crate::verdict::{ComplianceStatus, ParameterStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of evaluating a whole specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationEvaluation {
    /// Specification identity
    pub specification_id: SpecificationId,
    /// Aggregate compliance state
    pub status: ComplianceStatus,
    /// Parameters with status `Pass`
    pub passing: usize,
    /// Parameters with status `Fail`
    pub failing: usize,
    /// Parameters with status `Pending`
    pub pending: usize,
    /// Number of parameters
    pub total: usize,
    /// Failing parameters flagged mandatory
    pub mandatory_failing: usize,
    /// Per-parameter results, in parameter order
    pub parameters: Vec<ParameterEvaluation>,
}

impl SpecificationEvaluation {
    /// Share of passing parameters, rounded to a whole percent.
    #[must_use]
    pub fn passing_pct(&self) -> u32 {
        percentage(self.passing, self.total)
    }

    /// Share of failing parameters, rounded to a whole percent.
    #[must_use]
    pub fn failing_pct(&self) -> u32 {
        percentage(self.failing, self.total)
    }

    /// Share of pending parameters, rounded to a whole percent.
    #[must_use]
    pub fn pending_pct(&self) -> u32 {
        percentage(self.pending, self.total)
    }
}

/// Decide the compliance state from parameter counts.
#[must_use]
pub fn compliance_status(
    failing: usize,
    pending: usize,
    total: usize,
    policy: &EvaluationPolicy,
) -> ComplianceStatus {
    if total == 0 {
        return ComplianceStatus::Incomplete;
    }
    if policy.fail_first {
        if failing > 0 {
            ComplianceStatus::NonCompliant
        } else if pending > 0 {
            ComplianceStatus::Incomplete
        } else {
            ComplianceStatus::Compliant
        }
    } else if pending > 0 {
        ComplianceStatus::Incomplete
    } else if failing > 0 {
        ComplianceStatus::NonCompliant
    } else {
        ComplianceStatus::Compliant
    }
}

/// Evaluate every parameter of a specification and roll the results up.
#[must_use]
pub fn evaluate_specification<L>(
    specification: &Specification,
    tests: &L,
    policy: &EvaluationPolicy,
) -> SpecificationEvaluation
where
    L: TestLookup + ?Sized,
{
    let parameters: Vec<ParameterEvaluation> = specification
        .parameters
        .iter()
        .map(|p| evaluate_parameter(specification, p, tests, policy))
        .collect();

    let count = |status: ParameterStatus| parameters.iter().filter(|p| p.status == status).count();
    let passing = count(ParameterStatus::Pass);
    let failing = count(ParameterStatus::Fail);
    let pending = count(ParameterStatus::Pending);
    let total = parameters.len();

    let mandatory_failing = specification
        .parameters
        .iter()
        .zip(&parameters)
        .filter(|(p, e)| p.mandatory && e.status.is_fail())
        .count();

    let status = compliance_status(failing, pending, total, policy);
    debug!(
        specification = %specification.id,
        %status,
        passing,
        failing,
        pending,
        total,
        fail_first = policy.fail_first,
        "specification evaluated"
    );

    SpecificationEvaluation {
        specification_id: specification.id.clone(),
        status,
        passing,
        failing,
        pending,
        total,
        mandatory_failing,
        parameters,
    }
}
