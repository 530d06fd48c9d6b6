//! Output formatting for validation reports.
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | One diagnostic line; the CLI gate default |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | Automation / scripting  |
//! | [`Sarif`](OutputFormat::Sarif)   | [`sarif`]  | CI annotations          |

pub mod json;
pub mod pretty;
pub mod sarif;

use crate::finding::ValidationReport;

/// Supported output formats.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// A single success line, or one `ERROR:` line per failure.
    Pretty,
    /// Machine-readable JSON.
    Json,
    /// [SARIF 2.1.0](https://sarifweb.azurewebsites.net/) for CI/CD tool integration.
    Sarif,
}

/// Formats a [`ValidationReport`] in the requested [`OutputFormat`].
pub fn format_report(report: &ValidationReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => pretty::format(report),
        OutputFormat::Json => json::format(report),
        OutputFormat::Sarif => sarif::format(std::slice::from_ref(report)),
    }
}
