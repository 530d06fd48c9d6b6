//! Trusted-host cross-reference.
//!
//! Unlike the per-file doc markers, each trusted host only needs to appear
//! somewhere: in the docs taken together, or in the runtime script. A miss
//! therefore points at no single file.

use crate::checks::{Check, RuleInfo};
use crate::config::Config;
use crate::error::ContractError;
use crate::loader::{Artifacts, Doc};
use crate::validate::Stage;

pub fn check_trusted_hosts(
    hosts: &[String],
    docs: &[Doc],
    runtime: &str,
) -> Result<(), ContractError> {
    let docs_text = docs
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    for host in hosts {
        if !docs_text.contains(host.as_str()) && !runtime.contains(host.as_str()) {
            return Err(ContractError::MissingMarker {
                rule: "hosts/trusted-host",
                marker: host.clone(),
                file: None,
                message: format!("trusted host {host} must appear in docs or runtime"),
            });
        }
    }
    Ok(())
}

pub struct TrustedHostsCheck;

impl Check for TrustedHostsCheck {
    fn name(&self) -> &'static str {
        "trusted_hosts"
    }

    fn description(&self) -> &'static str {
        "every trusted host is mentioned in the docs or the runtime"
    }

    fn stage(&self) -> Stage {
        Stage::TrustedHosts
    }

    fn run(&self, artifacts: &Artifacts, config: &Config) -> Result<(), ContractError> {
        check_trusted_hosts(
            &config.expected.trusted_hosts,
            &artifacts.docs,
            &artifacts.runtime,
        )
    }
}

pub fn rules() -> Vec<RuleInfo> {
    vec![RuleInfo {
        id: "hosts/trusted-host",
        stage: Stage::TrustedHosts,
        message: "A trusted host is mentioned neither in the docs nor in the runtime script",
        remediation: "Name the host in the runtime allow-list or in the API documentation",
    }]
}
