use crate::error::ContractError;
use crate::validate::{RunMode, Stage};
use std::path::PathBuf;

#[derive(Debug, Clone, serde::Serialize)]
pub struct Finding {
    pub rule_id: String,
    pub message: String,
    pub stage: Stage,
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
}

impl Finding {
    pub fn from_error(err: &ContractError, stage: Stage) -> Self {
        Finding {
            rule_id: err.rule_id().to_string(),
            message: err.to_string(),
            stage,
            file: err.file().map(|p| p.to_path_buf()),
            line: err.line(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
    /// Not run: loading failed, or an earlier check failed in fail-fast mode.
    Skipped,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckOutcome {
    pub check: String,
    pub description: String,
    pub stage: Stage,
    pub status: CheckStatus,
}

#[derive(Debug, serde::Serialize)]
pub struct ValidationReport {
    pub root: PathBuf,
    pub contract: String,
    pub checked_at: String,
    pub mode: RunMode,
    /// Terminal state: [`Stage::Success`] or [`Stage::Failed`].
    pub stage: Stage,
    /// Stage of the first failure, if any.
    pub failed_at: Option<Stage>,
    pub outcomes: Vec<CheckOutcome>,
    pub findings: Vec<Finding>,
    pub passed: bool,
    #[serde(skip)]
    pub errors: Vec<ContractError>,
}

impl ValidationReport {
    /// Builds a report from per-check outcomes and the errors raised, in
    /// order. Load errors are attributed to [`Stage::Loading`]; every other
    /// error belongs to the next `Failed` outcome.
    pub fn from_outcomes(
        root: PathBuf,
        contract: &str,
        mode: RunMode,
        outcomes: Vec<CheckOutcome>,
        errors: Vec<ContractError>,
    ) -> Self {
        let mut failed_stages = outcomes
            .iter()
            .filter(|o| o.status == CheckStatus::Failed)
            .map(|o| o.stage);
        let findings: Vec<Finding> = errors
            .iter()
            .map(|err| {
                let stage = if err.is_load_error() {
                    Stage::Loading
                } else {
                    failed_stages.next().unwrap_or(Stage::Failed)
                };
                Finding::from_error(err, stage)
            })
            .collect();
        let failed_at = findings.first().map(|f| f.stage);
        let passed = findings.is_empty();

        ValidationReport {
            root,
            contract: contract.to_string(),
            checked_at: chrono::Utc::now().to_rfc3339(),
            mode,
            stage: if passed { Stage::Success } else { Stage::Failed },
            failed_at,
            outcomes,
            findings,
            passed,
            errors,
        }
    }

    /// The first failure, which is the only one in fail-fast mode.
    pub fn first_error(&self) -> Option<&ContractError> {
        self.errors.first()
    }

    /// Count `(passed, failed, skipped)` checks in a single pass.
    pub fn count_by_status(&self) -> (usize, usize, usize) {
        self.outcomes
            .iter()
            .fold((0, 0, 0), |(p, f, s), o| match o.status {
                CheckStatus::Passed => (p + 1, f, s),
                CheckStatus::Failed => (p, f + 1, s),
                CheckStatus::Skipped => (p, f, s + 1),
            })
    }

    /// Last path component of the bundle root, or `"unknown"`.
    pub fn bundle_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
