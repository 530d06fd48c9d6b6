//! Terminal formatter.
//!
//! A passing run renders exactly one line, [`SUCCESS_LINE`]. A failing run
//! renders one `ERROR: <message>` line per finding, which is exactly one
//! line in fail-fast mode. The caller decides the stream (stdout for
//! success, stderr for failure).

use crate::finding::{CheckStatus, ValidationReport};
use colored::Colorize;
use std::path::Path;

pub const SUCCESS_LINE: &str = "metadata, docs, and runtime contract are aligned";

pub fn format(report: &ValidationReport) -> String {
    if report.passed {
        return format!("{SUCCESS_LINE}\n");
    }

    let mut out = String::new();
    for finding in &report.findings {
        out.push_str(&format!("{} {}\n", "ERROR:".red().bold(), finding.message));
    }
    out
}

/// Per-check progress lines, printed with `--verbose` before the result.
pub fn format_outcomes(report: &ValidationReport) -> String {
    let mut out = String::new();
    for outcome in &report.outcomes {
        let icon = match outcome.status {
            CheckStatus::Passed => "PASS".green().bold().to_string(),
            CheckStatus::Failed => "FAIL".red().bold().to_string(),
            CheckStatus::Skipped => "SKIP".dimmed().to_string(),
        };
        out.push_str(&format!(
            "  [{icon}] {name:<14} {desc}\n",
            name = outcome.check,
            desc = outcome.description.dimmed(),
        ));
    }
    out
}

/// Compact summary table for `check-all`.
pub fn format_collection_summary(collection: &Path, reports: &[ValidationReport]) -> String {
    let mut out = String::new();
    let separator = "─".repeat(54);

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        format!(
            "  Collection Summary: {}  ({} bundles)",
            collection.display(),
            reports.len()
        )
        .bold()
        .underline()
    ));
    out.push_str(&format!("{}\n", separator.dimmed()));

    let mut n_failed = 0usize;
    for report in reports {
        if report.passed {
            out.push_str(&format!(
                "  {}  {:<22} {}\n",
                "✓".green(),
                report.bundle_name(),
                "ALIGNED".green().bold()
            ));
        } else {
            n_failed += 1;
            let reason = report
                .findings
                .first()
                .map(|f| f.message.as_str())
                .unwrap_or("failed");
            out.push_str(&format!(
                "  {}  {:<22} {}  {}\n",
                "✗".red(),
                report.bundle_name(),
                "FAILED ".red().bold(),
                reason
            ));
        }
    }

    out.push_str(&format!("{}\n", separator.dimmed()));
    out.push_str(&format!(
        "  Total: {}  {}\n",
        format!("{n_failed} failed").red().bold(),
        format!("{} aligned", reports.len() - n_failed).green().bold(),
    ));

    out
}
