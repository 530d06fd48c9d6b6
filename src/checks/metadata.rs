//! Metadata descriptor self-consistency.
//!
//! # Rules
//!
//! | ID | What it checks |
//! |----|----------------|
//! | `metadata/name` … `metadata/optional-binaries` | identity and capability fields equal the contract |
//! | `metadata/credential-type` | `primary_credential.type` equals the contract credential type |
//! | `metadata/credential-env-vars` | `primary_credential.env_vars` equals `required_env_vars` |
//! | `metadata/provenance` | `provenance.owner`, `.repository`, `.remote` are non-empty |

use crate::checks::equality::{expect_field, expect_non_empty, expect_same, value_at};
use crate::checks::{Check, RuleInfo};
use crate::config::{Config, ExpectedContract};
use crate::error::ContractError;
use crate::loader::Artifacts;
use crate::validate::Stage;
use serde_json::{json, Value};

const PROVENANCE_FIELDS: &[&str] = &["owner", "repository", "remote"];

/// `(rule, descriptor key, expected value)` for every field pinned to a
/// contract constant, in evaluation order.
fn pinned_fields(expected: &ExpectedContract) -> [(&'static str, &'static str, Value); 8] {
    [
        ("metadata/name", "name", json!(expected.name)),
        ("metadata/description", "description", json!(expected.description)),
        ("metadata/homepage", "homepage", json!(expected.homepage)),
        (
            "metadata/source-repository",
            "source_repository",
            json!(expected.source_repository),
        ),
        (
            "metadata/required-env-vars",
            "required_env_vars",
            json!(expected.required_env_vars),
        ),
        (
            "metadata/optional-env-vars",
            "optional_env_vars",
            json!(expected.optional_env_vars),
        ),
        (
            "metadata/required-binaries",
            "required_binaries",
            json!(expected.required_binaries),
        ),
        (
            "metadata/optional-binaries",
            "optional_binaries",
            json!(expected.optional_binaries),
        ),
    ]
}

/// Checks the descriptor against the expected contract.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use skill_contract::checks::metadata::check_metadata;
/// use skill_contract::config::ExpectedContract;
///
/// let metadata = json!({"name": "something-else"});
/// let err = check_metadata(&metadata, &ExpectedContract::default()).unwrap_err();
/// assert_eq!(err.rule_id(), "metadata/name");
/// ```
pub fn check_metadata(metadata: &Value, expected: &ExpectedContract) -> Result<(), ContractError> {
    for (rule, key, value) in pinned_fields(expected) {
        expect_field(
            rule,
            key,
            &value,
            metadata.get(key),
            &format!("metadata {key} mismatch"),
        )?;
    }

    expect_field(
        "metadata/credential-type",
        "primary_credential.type",
        &json!(expected.credential_type),
        value_at(metadata, "primary_credential.type"),
        &format!(
            "primary_credential.type must be {}",
            expected.credential_type
        ),
    )?;
    expect_same(
        "metadata/credential-env-vars",
        "primary_credential.env_vars",
        value_at(metadata, "primary_credential.env_vars"),
        "required_env_vars",
        metadata.get("required_env_vars"),
        "primary_credential.env_vars must match required_env_vars",
    )?;

    for field in PROVENANCE_FIELDS {
        let path = format!("provenance.{field}");
        expect_non_empty(
            "metadata/provenance",
            &path,
            value_at(metadata, &path),
            &format!("metadata {path} is required"),
        )?;
    }

    Ok(())
}

/// Descriptor vs. contract constants.
pub struct MetadataCheck;

impl Check for MetadataCheck {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn description(&self) -> &'static str {
        "registry metadata matches the expected contract"
    }

    fn stage(&self) -> Stage {
        Stage::MetadataSelfConsistency
    }

    fn run(&self, artifacts: &Artifacts, config: &Config) -> Result<(), ContractError> {
        check_metadata(&artifacts.metadata, &config.expected)
    }
}

pub fn rules() -> Vec<RuleInfo> {
    let stage = Stage::MetadataSelfConsistency;
    vec![
        RuleInfo {
            id: "metadata/name",
            stage,
            message: "Descriptor name differs from the contract name",
            remediation: "Set \"name\" in registry-metadata.json to the expected skill name",
        },
        RuleInfo {
            id: "metadata/description",
            stage,
            message: "Descriptor description differs from the contract description",
            remediation: "Copy the expected description verbatim into registry-metadata.json",
        },
        RuleInfo {
            id: "metadata/homepage",
            stage,
            message: "Descriptor homepage differs from the contract homepage",
            remediation: "Set \"homepage\" to the expected URL",
        },
        RuleInfo {
            id: "metadata/source-repository",
            stage,
            message: "Descriptor source_repository differs from the contract",
            remediation: "Set \"source_repository\" to the expected clone URL",
        },
        RuleInfo {
            id: "metadata/required-env-vars",
            stage,
            message: "Descriptor required_env_vars differs from the contract (order-sensitive)",
            remediation: "List exactly the expected required variables in priority order",
        },
        RuleInfo {
            id: "metadata/optional-env-vars",
            stage,
            message: "Descriptor optional_env_vars differs from the contract (order-sensitive)",
            remediation: "List exactly the expected optional variables in priority order",
        },
        RuleInfo {
            id: "metadata/required-binaries",
            stage,
            message: "Descriptor required_binaries differs from the contract",
            remediation: "List exactly the executables the runtime cannot work without",
        },
        RuleInfo {
            id: "metadata/optional-binaries",
            stage,
            message: "Descriptor optional_binaries differs from the contract",
            remediation: "List exactly the executables the runtime uses when present",
        },
        RuleInfo {
            id: "metadata/credential-type",
            stage,
            message: "primary_credential.type differs from the contract credential type",
            remediation: "Set primary_credential.type (normally \"env_var\")",
        },
        RuleInfo {
            id: "metadata/credential-env-vars",
            stage,
            message: "primary_credential.env_vars differs from required_env_vars",
            remediation: "Make primary_credential.env_vars an exact copy of required_env_vars",
        },
        RuleInfo {
            id: "metadata/provenance",
            stage,
            message: "provenance.owner, provenance.repository or provenance.remote is missing or empty",
            remediation: "Fill in every provenance field with a non-empty string",
        },
    ]
}
