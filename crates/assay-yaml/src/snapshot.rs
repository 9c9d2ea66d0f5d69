//! YAML snapshot documents.
//!
//! A snapshot is a point-in-time copy of the specifications and tests an
//! evaluation runs over. It is used for fixtures and for handing data between
//! tools, not as a storage format.

use crate::error::SnapshotError;
use assay_core::{
    evaluate_portfolio, evaluate_specification, EvaluationPolicy, PortfolioSummary, Specification,
    SpecificationEvaluation, SpecificationId, Test, TestId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// Snapshot of specifications and tests loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    #[serde(default = "default_version")]
    pub version: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Specifications
    #[serde(default)]
    pub specifications: Vec<Specification>,
    /// Tests referenced by the specifications
    #[serde(default)]
    pub tests: Vec<Test>,
}

fn default_version() -> String {
    "1".to_string()
}

impl Snapshot {
    /// Parse a snapshot from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or ids are duplicated.
    pub fn from_yaml(yaml: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_yaml_ng::from_str(yaml)?;
        snapshot.check_unique_ids()?;
        debug!(
            specifications = snapshot.specifications.len(),
            tests = snapshot.tests.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Serialize the snapshot to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, SnapshotError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Load a snapshot from a file.
    pub fn load_from_file(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Save the snapshot to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Run [`Specification::validate`] on every specification.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.check_unique_ids()?;
        for specification in &self.specifications {
            specification.validate()?;
        }
        Ok(())
    }

    /// Tests indexed by id.
    #[must_use]
    pub fn tests_by_id(&self) -> BTreeMap<TestId, Test> {
        assay_core::index_tests(&self.tests)
    }

    /// Look up a specification by id.
    #[must_use]
    pub fn specification(&self, id: &SpecificationId) -> Option<&Specification> {
        self.specifications.iter().find(|s| &s.id == id)
    }

    /// Evaluate one specification of the snapshot.
    #[must_use]
    pub fn evaluate_specification(
        &self,
        id: &SpecificationId,
        policy: &EvaluationPolicy,
    ) -> Option<SpecificationEvaluation> {
        let tests = self.tests_by_id();
        self.specification(id)
            .map(|s| evaluate_specification(s, &tests, policy))
    }

    /// Evaluate every specification of the snapshot.
    #[must_use]
    pub fn evaluate(&self, policy: &EvaluationPolicy) -> PortfolioSummary {
        evaluate_portfolio(&self.specifications, &self.tests_by_id(), policy)
    }

    fn check_unique_ids(&self) -> Result<(), SnapshotError> {
        let mut tests = BTreeSet::new();
        if let Some(dup) = self.tests.iter().find(|t| !tests.insert(&t.id)) {
            return Err(SnapshotError::DuplicateTest(dup.id.to_string()));
        }
        let mut specs = BTreeSet::new();
        if let Some(dup) = self.specifications.iter().find(|s| !specs.insert(&s.id)) {
            return Err(SnapshotError::DuplicateSpecification(dup.id.to_string()));
        }
        Ok(())
    }
}
