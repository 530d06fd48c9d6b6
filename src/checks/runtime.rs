//! Runtime script safety tokens.
//!
//! The runtime script is never executed or parsed. Its safety behaviour is
//! evidenced by literal tokens, checked in this order:
//!
//! 1. each configured token (credential fallback, base-URL override,
//!    command-existence guard);
//! 2. the trusted-host allow-list, the contract hosts joined with `|`;
//! 3. the relative-path validation phrase;
//! 4. at least one accepted phrasing of the base-URL override warning.

use crate::checks::markers::{require_any_marker, require_marker};
use crate::checks::{Check, RuleInfo};
use crate::config::Config;
use crate::error::ContractError;
use crate::loader::Artifacts;
use crate::validate::Stage;
use std::path::Path;

pub fn check_runtime(text: &str, path: &Path, config: &Config) -> Result<(), ContractError> {
    for token in &config.runtime.tokens {
        require_marker(
            "runtime/required-token",
            text,
            token,
            path,
            &format!("runtime file missing expected token: {token}"),
        )?;
    }

    let allowlist = config.expected.host_allowlist();
    require_marker(
        "runtime/trusted-host-allowlist",
        text,
        &allowlist,
        path,
        &format!("runtime file must enforce trusted hosts ({allowlist})"),
    )?;

    require_marker(
        "runtime/relative-path-validation",
        text,
        &config.runtime.relative_path_phrase,
        path,
        "runtime file must validate raw PATH input",
    )?;

    require_any_marker(
        "runtime/override-warning",
        text,
        &config.runtime.override_warnings,
        path,
        "runtime file must emit visible warnings for explicit base URL overrides",
    )
}

/// Runtime script vs. safety tokens.
pub struct RuntimeCheck;

impl Check for RuntimeCheck {
    fn name(&self) -> &'static str {
        "runtime"
    }

    fn description(&self) -> &'static str {
        "runtime script carries the required safety tokens"
    }

    fn stage(&self) -> Stage {
        Stage::RuntimeTokens
    }

    fn run(&self, artifacts: &Artifacts, config: &Config) -> Result<(), ContractError> {
        check_runtime(&artifacts.runtime, &artifacts.runtime_path, config)
    }
}

pub fn rules() -> Vec<RuleInfo> {
    let stage = Stage::RuntimeTokens;
    vec![
        RuleInfo {
            id: "runtime/required-token",
            stage,
            message: "Runtime script lacks a required token (credential fallback, base URL, command guard)",
            remediation: "Restore the token verbatim, e.g. ${IEX_TOKEN:-${IEX_CLOUD_TOKEN:-}} or need_cmd curl",
        },
        RuleInfo {
            id: "runtime/trusted-host-allowlist",
            stage,
            message: "Runtime script does not carry the literal trusted-host allow-list",
            remediation: "Match the API host against the exact list, e.g. case \"$host\" in cloud.iexapis.com|sandbox.iexapis.com)",
        },
        RuleInfo {
            id: "runtime/relative-path-validation",
            stage,
            message: "Runtime script does not validate that raw API paths are relative",
            remediation: "Reject absolute or scheme-qualified paths with the configured error phrase",
        },
        RuleInfo {
            id: "runtime/override-warning",
            stage,
            message: "Runtime script does not warn when the base URL is overridden",
            remediation: "Print a visible warning (one of the configured phrasings) when the base URL override is used",
        },
    ]
}
