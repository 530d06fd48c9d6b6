//! SKILL.md frontmatter vs. metadata descriptor.
//!
//! The frontmatter mirrors a subset of the descriptor under different key
//! names. [`FIELD_MAP`] is the authoritative mapping; rules run in its
//! order and the first divergence is reported.

use crate::checks::equality::{expect_same, value_at};
use crate::checks::{Check, RuleInfo};
use crate::config::Config;
use crate::error::ContractError;
use crate::frontmatter::Frontmatter;
use crate::loader::Artifacts;
use crate::validate::Stage;
use serde_json::Value;

/// A single frontmatter ↔ descriptor correspondence.
pub struct FieldMapping {
    pub rule: &'static str,
    /// Dotted path inside the frontmatter.
    pub frontmatter: &'static str,
    /// Dotted path inside the descriptor.
    pub metadata: &'static str,
    /// What diverged, phrased for the diagnostic line.
    pub subject: &'static str,
    /// Catalogue description.
    pub summary: &'static str,
}

pub const FIELD_MAP: &[FieldMapping] = &[
    FieldMapping {
        rule: "frontmatter/name",
        frontmatter: "name",
        metadata: "name",
        subject: "name",
        summary: "Frontmatter name differs from descriptor name",
    },
    FieldMapping {
        rule: "frontmatter/description",
        frontmatter: "description",
        metadata: "description",
        subject: "description",
        summary: "Frontmatter description differs from descriptor description",
    },
    FieldMapping {
        rule: "frontmatter/homepage",
        frontmatter: "homepage",
        metadata: "homepage",
        subject: "homepage",
        summary: "Frontmatter homepage differs from descriptor homepage",
    },
    FieldMapping {
        rule: "frontmatter/skill-key",
        frontmatter: "metadata.openclaw.skillKey",
        metadata: "name",
        subject: "metadata.openclaw.skillKey",
        summary: "metadata.openclaw.skillKey differs from descriptor name",
    },
    FieldMapping {
        rule: "frontmatter/openclaw-homepage",
        frontmatter: "metadata.openclaw.homepage",
        metadata: "homepage",
        subject: "metadata.openclaw.homepage",
        summary: "metadata.openclaw.homepage differs from descriptor homepage",
    },
    FieldMapping {
        rule: "frontmatter/source-repository",
        frontmatter: "metadata.openclaw.sourceRepository",
        metadata: "source_repository",
        subject: "metadata.openclaw.sourceRepository",
        summary: "metadata.openclaw.sourceRepository differs from descriptor source_repository",
    },
    FieldMapping {
        rule: "frontmatter/requires-env",
        frontmatter: "metadata.openclaw.requires.env",
        metadata: "required_env_vars",
        subject: "required env vars",
        summary: "requires.env differs from descriptor required_env_vars",
    },
    FieldMapping {
        rule: "frontmatter/requires-optional-env",
        frontmatter: "metadata.openclaw.requires.optionalEnv",
        metadata: "optional_env_vars",
        subject: "optional env vars",
        summary: "requires.optionalEnv differs from descriptor optional_env_vars",
    },
    FieldMapping {
        rule: "frontmatter/requires-primary-env",
        frontmatter: "metadata.openclaw.requires.primaryEnv",
        metadata: "primary_credential.env_vars",
        subject: "primary env vars",
        summary: "requires.primaryEnv differs from descriptor primary_credential.env_vars",
    },
    FieldMapping {
        rule: "frontmatter/requires-bins",
        frontmatter: "metadata.openclaw.requires.bins",
        metadata: "required_binaries",
        subject: "required binaries",
        summary: "requires.bins differs from descriptor required_binaries",
    },
    FieldMapping {
        rule: "frontmatter/requires-optional-bins",
        frontmatter: "metadata.openclaw.requires.optionalBins",
        metadata: "optional_binaries",
        subject: "optional binaries",
        summary: "requires.optionalBins differs from descriptor optional_binaries",
    },
];

/// Checks every [`FIELD_MAP`] entry in order.
///
/// `document` is the display name used in diagnostics (normally `SKILL.md`).
pub fn check_frontmatter(
    frontmatter: &Frontmatter,
    metadata: &Value,
    document: &str,
) -> Result<(), ContractError> {
    for mapping in FIELD_MAP {
        expect_same(
            mapping.rule,
            mapping.frontmatter,
            frontmatter.get(mapping.frontmatter),
            mapping.metadata,
            value_at(metadata, mapping.metadata),
            &format!(
                "{document} {} must match registry metadata",
                mapping.subject
            ),
        )?;
    }
    Ok(())
}

/// Frontmatter vs. descriptor.
pub struct FrontmatterCheck;

impl Check for FrontmatterCheck {
    fn name(&self) -> &'static str {
        "frontmatter"
    }

    fn description(&self) -> &'static str {
        "SKILL.md frontmatter mirrors registry metadata"
    }

    fn stage(&self) -> Stage {
        Stage::FrontmatterCrossConsistency
    }

    fn run(&self, artifacts: &Artifacts, _config: &Config) -> Result<(), ContractError> {
        let document = artifacts
            .skill_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "SKILL.md".to_string());
        check_frontmatter(&artifacts.frontmatter, &artifacts.metadata, &document)
    }
}

/// Rules raised while extracting the frontmatter block.
pub fn parse_rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            id: "frontmatter/missing-block",
            stage: Stage::Loading,
            message: "SKILL.md does not start with a ---delimited frontmatter block",
            remediation: "Start SKILL.md with '---', the key: value lines, then a closing '---'",
        },
        RuleInfo {
            id: "frontmatter/invalid-line",
            stage: Stage::Loading,
            message: "A frontmatter line has no ':' separator",
            remediation: "Write every non-blank frontmatter line as 'key: value'",
        },
        RuleInfo {
            id: "frontmatter/duplicate-key",
            stage: Stage::Loading,
            message: "A frontmatter key appears more than once (duplicate_keys = \"reject\")",
            remediation: "Remove the repeated key or merge the values",
        },
    ]
}

/// One rule per [`FIELD_MAP`] entry.
pub fn rules() -> Vec<RuleInfo> {
    FIELD_MAP
        .iter()
        .map(|m| RuleInfo {
            id: m.rule,
            stage: Stage::FrontmatterCrossConsistency,
            message: m.summary,
            remediation: "Update SKILL.md frontmatter so it mirrors registry-metadata.json",
        })
        .collect()
}
