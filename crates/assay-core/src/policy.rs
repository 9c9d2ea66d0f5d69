//! Evaluation policy (from .assay-policy.toml).
//!
//! The engine has a few genuinely open choices. Each one is a named field
//! here instead of a hard-coded branch.

use crate::criterion::DEFAULT_TOLERANCE;
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where a completed test's representative verdict comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultSource {
    /// Re-classify raw result text; fall back to the recorded verdict.
    #[default]
    PreferRaw,
    /// Use the recorded verdict; fall back to re-classifying raw text.
    PreferRecorded,
}

/// Named configuration of the compliance engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationPolicy {
    /// Report a known failure before incompleteness at specification level.
    ///
    /// `true` surfaces Non-Compliant as soon as any parameter fails.
    /// `false` holds the specification at Incomplete until nothing is pending.
    pub fail_first: bool,
    /// Absolute tolerance for exact numeric criteria.
    pub tolerance: f64,
    /// Source of each completed test's verdict.
    pub result_source: ResultSource,
}

impl Default for EvaluationPolicy {
    fn default() -> Self {
        Self {
            fail_first: true,
            tolerance: DEFAULT_TOLERANCE,
            result_source: ResultSource::PreferRaw,
        }
    }
}

impl EvaluationPolicy {
    /// Default config file name.
    pub const CONFIG_FILE: &'static str = ".assay-policy.toml";

    /// Policy matching the summary and list views: failures first.
    #[must_use]
    pub fn fail_first() -> Self {
        Self::default()
    }

    /// Policy matching the report view: incompleteness first.
    #[must_use]
    pub fn pending_first() -> Self {
        Self {
            fail_first: false,
            ..Self::default()
        }
    }

    /// Set the exact-numeric tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the result source.
    #[must_use]
    pub fn with_result_source(mut self, source: ResultSource) -> Self {
        self.result_source = source;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(PolicyError::InvalidValue {
                field: "tolerance".to_string(),
                message: format!("must be a finite, positive number (got {})", self.tolerance),
            });
        }
        Ok(())
    }

    /// Parse a policy from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid or values are out of range.
    pub fn from_toml(toml_str: &str) -> Result<Self, PolicyError> {
        let policy: Self = toml::from_str(toml_str)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Serialize the policy to a TOML string.
    pub fn to_toml(&self) -> Result<String, PolicyError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a policy from a file.
    pub fn load_from_file(path: &Path) -> Result<Self, PolicyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Save the policy to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), PolicyError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Load from the default config file in the current directory.
    ///
    /// Returns the default policy if the file is missing or unreadable.
    #[must_use]
    pub fn load_default() -> Self {
        let path = Path::new(Self::CONFIG_FILE);
        match Self::load_from_file(path) {
            Ok(policy) => policy,
            Err(err) => {
                tracing::debug!(path = Self::CONFIG_FILE, error = %err, "using default policy");
                Self::default()
            }
        }
    }

    /// Generate a sample TOML config file content.
    #[must_use]
    pub fn sample_config() -> String {
        r#"# Assay Evaluation Policy
# Place this file at .assay-policy.toml in your project root

# Surface a failing parameter even while others are still pending.
# Set to false to keep the specification Incomplete until every parameter
# has a final result.
fail_first = true

# Absolute tolerance for exact numeric criteria such as "7.0"
tolerance = 0.001

# Where each completed test's verdict comes from: "prefer-raw" re-classifies
# the recorded result text, "prefer-recorded" trusts the stored verdict.
result_source = "prefer-raw"
"#
        .to_string()
    }
}
