//! Compliance report rows for summary, report, and export surfaces.
//!
//! One row per parameter, in parameter order, with the counts of the
//! specification evaluation alongside.

use crate::model::{ParameterId, Specification, SpecificationId, TestId};
use crate::rollup::specification::SpecificationEvaluation;
use crate::verdict::{ComplianceStatus, ParameterStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

/// One tabular row of a compliance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Parameter identity
    pub parameter_id: ParameterId,
    /// Parameter display name
    pub parameter: String,
    /// Unit of measure
    pub unit: String,
    /// Expected-value criterion as written
    pub expected: String,
    /// Whether the parameter is mandatory
    pub mandatory: bool,
    /// Parameter status
    pub status: ParameterStatus,
    /// Resolved relevant tests
    pub tests: Vec<TestId>,
    /// Representative raw results, joined with `"; "`
    pub result: String,
}

/// Summary counts of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Passing parameters
    pub passing: usize,
    /// Failing parameters
    pub failing: usize,
    /// Pending parameters
    pub pending: usize,
    /// All parameters
    pub total: usize,
    /// Passing share, whole percent
    pub passing_pct: u32,
    /// Failing share, whole percent
    pub failing_pct: u32,
    /// Pending share, whole percent
    pub pending_pct: u32,
}

/// Flat compliance report for one specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    /// Specification identity
    pub specification_id: SpecificationId,
    /// Specification display name
    pub specification: String,
    /// Aggregate compliance state
    pub status: ComplianceStatus,
    /// Counts and percentages
    pub summary: ReportSummary,
    /// One row per parameter
    pub rows: Vec<ReportRow>,
}

impl ComplianceReport {
    /// Build the report for an evaluated specification.
    #[must_use]
    pub fn from_evaluation(
        specification: &Specification,
        evaluation: &SpecificationEvaluation,
    ) -> Self {
        let rows = specification
            .parameters
            .iter()
            .zip(&evaluation.parameters)
            .map(|(parameter, result)| {
                let results: Vec<&str> = result
                    .test_details
                    .iter()
                    .filter_map(|detail| {
                        let representative = detail.representative.as_ref()?;
                        detail
                            .samples
                            .iter()
                            .find(|s| &s.sample_id == representative)
                            .and_then(|s| s.raw_result.as_deref())
                    })
                    .collect();

                ReportRow {
                    parameter_id: parameter.id.clone(),
                    parameter: parameter.name.clone(),
                    unit: parameter.unit.clone(),
                    expected: parameter.expected_value.clone(),
                    mandatory: parameter.mandatory,
                    status: result.status,
                    tests: result.test_ids().cloned().collect(),
                    result: results.join("; "),
                }
            })
            .collect();

        Self {
            specification_id: specification.id.clone(),
            specification: specification.name.clone(),
            status: evaluation.status,
            summary: ReportSummary {
                passing: evaluation.passing,
                failing: evaluation.failing,
                pending: evaluation.pending,
                total: evaluation.total,
                passing_pct: evaluation.passing_pct(),
                failing_pct: evaluation.failing_pct(),
                pending_pct: evaluation.pending_pct(),
            },
            rows,
        }
    }

    /// Format as compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Format as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as text.
    #[must_use]
    pub fn format_text(&self) -> String {
        let mut out = String::new();

        let title = format!(
            "COMPLIANCE REPORT: {} ({})",
            self.specification, self.specification_id
        );
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "{}\n", "=".repeat(title.chars().count()));
        let _ = writeln!(out, "Status: {}", self.status);
        let _ = writeln!(
            out,
            "Passing: {}/{} ({}%)  Failing: {} ({}%)  Pending: {} ({}%)\n",
            self.summary.passing,
            self.summary.total,
            self.summary.passing_pct,
            self.summary.failing,
            self.summary.failing_pct,
            self.summary.pending,
            self.summary.pending_pct
        );

        for row in &self.rows {
            let marker = if row.mandatory { "*" } else { " " };
            let _ = writeln!(
                out,
                "{marker} {:<24} {:<20} {:<16} {}",
                row.parameter,
                row.expected,
                if row.result.is_empty() { "-" } else { row.result.as_str() },
                row.status
            );
        }

        out
    }

    /// Format as Markdown.
    #[must_use]
    pub fn format_markdown(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "# Compliance Report: {}\n", self.specification);
        let _ = writeln!(out, "**Status:** {}\n", self.status);
        let _ = writeln!(out, "| Metric | Count | Share |");
        let _ = writeln!(out, "|--------|-------|-------|");
        let _ = writeln!(
            out,
            "| Passing | {} | {}% |",
            self.summary.passing, self.summary.passing_pct
        );
        let _ = writeln!(
            out,
            "| Failing | {} | {}% |",
            self.summary.failing, self.summary.failing_pct
        );
        let _ = writeln!(
            out,
            "| Pending | {} | {}% |",
            self.summary.pending, self.summary.pending_pct
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "| Parameter | Unit | Expected | Result | Tests | Status |");
        let _ = writeln!(out, "|-----------|------|----------|--------|-------|--------|");
        for row in &self.rows {
            let tests: Vec<&str> = row.tests.iter().map(TestId::as_str).collect();
            let _ = writeln!(
                out,
                "| {}{} | {} | {} | {} | {} | {} |",
                row.parameter,
                if row.mandatory { " *" } else { "" },
                row.unit,
                row.expected,
                row.result,
                tests.join(", "),
                row.status
            );
        }

        out
    }
}
