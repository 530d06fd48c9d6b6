//! Contract checks.
//!
//! Every check implements the [`Check`] trait and compares already-loaded
//! [`Artifacts`] against the [`Config`] contract. The set is fixed and runs
//! in the order returned by [`all_checks`]:
//!
//! | Check | Stage | Compares |
//! |-------|-------|----------|
//! | [`metadata`] | [`Stage::MetadataSelfConsistency`] | descriptor vs. expected constants |
//! | [`frontmatter`] | [`Stage::FrontmatterCrossConsistency`] | SKILL.md frontmatter vs. descriptor |
//! | [`runtime`] | [`Stage::RuntimeTokens`] | runtime script text vs. safety tokens |
//! | [`docs`] | [`Stage::Docs`] | each doc vs. required markers |
//! | [`trusted_hosts`] | [`Stage::TrustedHosts`] | trusted hosts vs. docs ∪ runtime text |
//!
//! The building blocks live in [`equality`] (field comparisons) and
//! [`markers`] (literal substring checks). Each check stops at its own first
//! failing rule; whether the run continues to the next check is decided by
//! [`RunMode`](crate::validate::RunMode), not by the checks.

pub mod docs;
pub mod equality;
pub mod frontmatter;
pub mod markers;
pub mod metadata;
pub mod runtime;
pub mod trusted_hosts;

use crate::config::Config;
use crate::error::ContractError;
use crate::loader::Artifacts;
use crate::validate::Stage;

/// One step of the validation chain.
pub trait Check {
    /// Short identifier (e.g., `"metadata"`, `"docs"`).
    fn name(&self) -> &'static str;

    /// One-line human-readable description.
    fn description(&self) -> &'static str;

    /// The orchestrator stage this check implements.
    fn stage(&self) -> Stage;

    /// Runs the check, returning the first violated rule.
    fn run(&self, artifacts: &Artifacts, config: &Config) -> Result<(), ContractError>;
}

/// Returns every check in execution order.
pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(metadata::MetadataCheck),
        Box::new(frontmatter::FrontmatterCheck),
        Box::new(runtime::RuntimeCheck),
        Box::new(docs::DocsCheck),
        Box::new(trusted_hosts::TrustedHostsCheck),
    ]
}

/// Metadata for a single named rule.
///
/// Returned by [`all_rules`] and used by the `list-rules` and `explain`
/// commands.
pub struct RuleInfo {
    /// Unique rule identifier (e.g., `"metadata/required-env-vars"`).
    pub id: &'static str,
    /// Stage that evaluates the rule.
    pub stage: Stage,
    /// Short description of what the rule checks.
    pub message: &'static str,
    /// Guidance on how to fix a violation.
    pub remediation: &'static str,
}

/// Rules raised while loading artifacts, before any check runs.
pub fn load_rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            id: "load/missing-file",
            stage: Stage::Loading,
            message: "A required artifact does not exist",
            remediation: "Restore the file or point [paths] in skill-contract.toml at it",
        },
        RuleInfo {
            id: "load/unreadable-file",
            stage: Stage::Loading,
            message: "A required artifact exists but could not be read",
            remediation: "Check file permissions and that the file is valid UTF-8",
        },
        RuleInfo {
            id: "load/malformed-json",
            stage: Stage::Loading,
            message: "The metadata descriptor or frontmatter metadata is not valid JSON",
            remediation: "Fix the JSON syntax at the reported location",
        },
    ]
}

/// Aggregates [`RuleInfo`] from loading and every check module, in
/// evaluation order.
pub fn all_rules() -> Vec<RuleInfo> {
    let mut rules = load_rules();
    rules.extend(frontmatter::parse_rules());
    rules.extend(metadata::rules());
    rules.extend(frontmatter::rules());
    rules.extend(runtime::rules());
    rules.extend(docs::rules());
    rules.extend(trusted_hosts::rules());
    rules
}
