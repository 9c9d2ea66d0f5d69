//! Assay: deterministic compliance evaluation for laboratory quality management.
//!
//! Re-exports the engine from `assay_core` and the YAML snapshot format as
//! [`yaml`].
//!
//! ```
//! use assay::{ComplianceEngine, ComplianceStatus, EvaluationPolicy};
//!
//! let snapshot = assay::yaml::Snapshot::from_yaml(r#"
//! specifications:
//!   - id: SP-1
//!     linkedTestIds: [T1]
//!     parameters:
//!       - id: P1
//!         name: pH
//!         expectedValue: "6.5-7.5"
//! tests:
//!   - id: T1
//!     status: Completed
//!     samples:
//!       - sampleId: S1
//!         status: Completed
//!         results: "7.0"
//! "#).unwrap();
//!
//! let engine = ComplianceEngine::new(EvaluationPolicy::default());
//! let summary = engine.evaluate_portfolio(&snapshot.specifications, &snapshot.tests);
//! assert_eq!(summary.with_status(ComplianceStatus::Compliant).count(), 1);
//! ```

pub use assay_core::*;
pub use assay_yaml as yaml;
