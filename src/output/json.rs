//! JSON output formatter.

use crate::finding::{CheckOutcome, Finding, ValidationReport};
use crate::validate::{RunMode, Stage};

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    root: String,
    contract: &'a str,
    checked_at: &'a str,
    mode: RunMode,
    stage: Stage,
    failed_at: Option<Stage>,
    passed: bool,
    summary: Summary,
    checks: &'a [CheckOutcome],
    findings: &'a [Finding],
}

#[derive(serde::Serialize)]
struct Summary {
    passed: usize,
    failed: usize,
    skipped: usize,
}

fn to_output(report: &ValidationReport) -> JsonOutput<'_> {
    let (passed, failed, skipped) = report.count_by_status();
    JsonOutput {
        root: report.root.display().to_string(),
        contract: &report.contract,
        checked_at: &report.checked_at,
        mode: report.mode,
        stage: report.stage,
        failed_at: report.failed_at,
        passed: report.passed,
        summary: Summary {
            passed,
            failed,
            skipped,
        },
        checks: &report.outcomes,
        findings: &report.findings,
    }
}

/// Formats a [`ValidationReport`] as pretty-printed JSON.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &ValidationReport) -> String {
    serde_json::to_string_pretty(&to_output(report)).expect("JSON serialization failed")
}

/// Formats several reports as one JSON array, in the given order.
pub fn format_many(reports: &[ValidationReport]) -> String {
    let outputs: Vec<JsonOutput<'_>> = reports.iter().map(to_output).collect();
    serde_json::to_string_pretty(&outputs).expect("JSON serialization failed")
}
