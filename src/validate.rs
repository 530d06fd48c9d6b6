//! Validation orchestration.
//!
//! A run moves through a fixed, linear sequence of stages:
//!
//! ```text
//! Loading → MetadataSelfConsistency → FrontmatterCrossConsistency
//!         → RuntimeTokens → Docs → TrustedHosts → Success
//! ```
//!
//! Any failure moves the run to [`Stage::Failed`]. A load failure always
//! halts the run, because no check means anything without its inputs.
//! Whether a failing check halts the remaining ones depends on [`RunMode`].

use crate::checks;
use crate::config::Config;
use crate::finding::{CheckOutcome, CheckStatus, ValidationReport};
use crate::loader::Artifacts;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Loading,
    MetadataSelfConsistency,
    FrontmatterCrossConsistency,
    RuntimeTokens,
    Docs,
    TrustedHosts,
    Success,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Loading => "loading",
            Stage::MetadataSelfConsistency => "metadata",
            Stage::FrontmatterCrossConsistency => "frontmatter",
            Stage::RuntimeTokens => "runtime",
            Stage::Docs => "docs",
            Stage::TrustedHosts => "trusted-hosts",
            Stage::Success => "success",
            Stage::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Stop at the first failing check.
    #[default]
    FailFast,
    /// Run every check and report one failure per failing check.
    Collect,
}

/// Loads the bundle at `root` and runs every check.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use skill_contract::config::Config;
/// use skill_contract::validate::{run_checks, RunMode};
///
/// let root = Path::new("./iex-cloud-skill");
/// let config = Config::load(root, None).unwrap();
/// let report = run_checks(root, &config, RunMode::FailFast);
///
/// std::process::exit(if report.passed { 0 } else { 1 });
/// ```
pub fn run_checks(root: &Path, config: &Config, mode: RunMode) -> ValidationReport {
    match Artifacts::load(root, config) {
        Ok(artifacts) => run_loaded(root, &artifacts, config, mode),
        Err(err) => {
            let outcomes = checks::all_checks()
                .iter()
                .map(|c| outcome(c.as_ref(), CheckStatus::Skipped))
                .collect();
            ValidationReport::from_outcomes(
                root.to_path_buf(),
                &config.expected.name,
                mode,
                outcomes,
                vec![err],
            )
        }
    }
}

/// Runs every check against artifacts that are already loaded.
pub fn run_loaded(
    root: &Path,
    artifacts: &Artifacts,
    config: &Config,
    mode: RunMode,
) -> ValidationReport {
    let mut outcomes = Vec::new();
    let mut failures = Vec::new();

    for check in checks::all_checks() {
        if mode == RunMode::FailFast && !failures.is_empty() {
            outcomes.push(outcome(check.as_ref(), CheckStatus::Skipped));
            continue;
        }
        match check.run(artifacts, config) {
            Ok(()) => outcomes.push(outcome(check.as_ref(), CheckStatus::Passed)),
            Err(err) => {
                outcomes.push(outcome(check.as_ref(), CheckStatus::Failed));
                failures.push(err);
            }
        }
    }

    ValidationReport::from_outcomes(
        root.to_path_buf(),
        &config.expected.name,
        mode,
        outcomes,
        failures,
    )
}

fn outcome(check: &dyn checks::Check, status: CheckStatus) -> CheckOutcome {
    CheckOutcome {
        check: check.name().to_string(),
        description: check.description().to_string(),
        stage: check.stage(),
        status,
    }
}

/// Returns immediate child directories of `path` that contain
/// `metadata_file`, sorted by path.
pub fn find_bundle_dirs(path: &Path, metadata_file: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .filter(|p| p.join(metadata_file).exists())
        .collect();

    dirs.sort();
    dirs
}
