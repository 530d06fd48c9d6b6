//! Documentation markers.
//!
//! Markers are checked per file: a marker present in one doc does not excuse
//! its absence from another.

use crate::checks::markers::require_marker;
use crate::checks::{Check, RuleInfo};
use crate::config::{Config, DocsPolicy};
use crate::error::ContractError;
use crate::loader::{Artifacts, Doc};
use crate::validate::Stage;

pub fn check_docs(docs: &[Doc], policy: &DocsPolicy) -> Result<(), ContractError> {
    for doc in docs {
        for marker in &policy.markers {
            require_marker(
                "docs/required-marker",
                &doc.text,
                marker,
                &doc.path,
                &format!(
                    "{} is missing required marker: {marker}",
                    doc.path.display()
                ),
            )?;
        }
    }
    Ok(())
}

pub struct DocsCheck;

impl Check for DocsCheck {
    fn name(&self) -> &'static str {
        "docs"
    }

    fn description(&self) -> &'static str {
        "every doc names the credential path, remediation command and env vars"
    }

    fn stage(&self) -> Stage {
        Stage::Docs
    }

    fn run(&self, artifacts: &Artifacts, config: &Config) -> Result<(), ContractError> {
        check_docs(&artifacts.docs, &config.docs)
    }
}

pub fn rules() -> Vec<RuleInfo> {
    vec![RuleInfo {
        id: "docs/required-marker",
        stage: Stage::Docs,
        message: "A documentation file lacks a required marker",
        remediation: "Document the credential path, the secrets-configure command and every env var in each listed doc",
    }]
}
