//! Outcome types at each level of the rollup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single measured result against a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Result meets the criterion.
    Pass,
    /// Result violates the criterion.
    Fail,
    /// No comparison was possible.
    Inconclusive,
}

impl Verdict {
    /// Check if the result passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Check if the result failed.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }

    /// Check if the result is inconclusive.
    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Self::Inconclusive)
    }

    /// Map a boolean comparison onto a verdict.
    pub const fn from_bool(passed: bool) -> Self {
        if passed {
            Self::Pass
        } else {
            Self::Fail
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "Pass"),
            Self::Fail => write!(f, "Fail"),
            Self::Inconclusive => write!(f, "Inconclusive"),
        }
    }
}

/// Aggregate status of one specification parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterStatus {
    /// Every relevant test is complete and passing.
    Pass,
    /// Every relevant test is complete and at least one did not pass.
    Fail,
    /// No relevant tests, or at least one is still running.
    Pending,
}

impl ParameterStatus {
    /// Check if the parameter passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Check if the parameter failed.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }

    /// Check if the parameter is pending.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for ParameterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "Pass"),
            Self::Fail => write!(f, "Fail"),
            Self::Pending => write!(f, "Pending"),
        }
    }
}

/// Aggregate compliance state of a specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// All parameters pass.
    Compliant,
    /// At least one parameter fails.
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
    /// Some parameters cannot be decided yet.
    Incomplete,
}

impl ComplianceStatus {
    /// Label used by report surfaces.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::NonCompliant => "Non-Compliant",
            Self::Incomplete => "Incomplete",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
