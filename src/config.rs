//! Contract configuration loading.
//!
//! The contract a bundle is checked against (expected identity fields,
//! capability lists, trusted hosts, required runtime tokens and doc markers)
//! is an explicit [`Config`] value rather than constants baked into the
//! checks, so the same engine can gate different skills.
//!
//! # Configuration file
//!
//! The validator looks for `skill-contract.toml` in the bundle root. Every
//! field has a default (the IEX Cloud skill contract), so the file may be
//! omitted or only override a few values:
//!
//! ```toml
//! [expected]
//! name = "my-skill"
//! trusted_hosts = ["api.example.com"]
//!
//! [frontmatter]
//! duplicate_keys = "reject"
//! ```
//!
//! ```rust,no_run
//! use std::path::Path;
//! use skill_contract::config::Config;
//!
//! let config = Config::load(Path::new("./iex-cloud-skill"), None).expect("failed to load config");
//! assert_eq!(config.expected.name, "iex-cloud");
//! ```

use crate::frontmatter::DuplicateKeyPolicy;
use std::path::{Path, PathBuf};

/// File name looked up in the bundle root when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = "skill-contract.toml";

/// Full configuration for one validation run.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Artifact locations, relative to the bundle root.
    pub paths: PathsConfig,
    /// Ground-truth values the metadata descriptor must carry.
    pub expected: ExpectedContract,
    /// Literal tokens the runtime script must contain.
    pub runtime: RuntimePolicy,
    /// Literal markers every documentation file must contain.
    pub docs: DocsPolicy,
    pub frontmatter: FrontmatterConfig,
}

/// Where each artifact lives inside the bundle.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub metadata: PathBuf,
    pub skill: PathBuf,
    pub runtime: PathBuf,
    /// Documentation files, checked in this order.
    pub docs: Vec<PathBuf>,
}

/// Expected contract constants.
///
/// List-valued fields are compared order-sensitively: the order of
/// environment variables and binaries encodes lookup priority.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ExpectedContract {
    pub name: String,
    pub description: String,
    pub homepage: String,
    pub source_repository: String,
    pub required_env_vars: Vec<String>,
    pub optional_env_vars: Vec<String>,
    pub required_binaries: Vec<String>,
    pub optional_binaries: Vec<String>,
    /// Required value of `primary_credential.type`.
    pub credential_type: String,
    /// API hosts the runtime is allowed to contact.
    pub trusted_hosts: Vec<String>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct RuntimePolicy {
    /// Tokens that must each appear verbatim (credential fallback, base-URL
    /// override, command guard).
    pub tokens: Vec<String>,
    /// Phrase proving raw API paths are checked to be relative.
    pub relative_path_phrase: String,
    /// Accepted phrasings of the base-URL override warning; any one suffices.
    pub override_warnings: Vec<String>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DocsPolicy {
    pub markers: Vec<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct FrontmatterConfig {
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl ExpectedContract {
    /// The literal allow-list the runtime script must carry, e.g.
    /// `cloud.iexapis.com|sandbox.iexapis.com`.
    pub fn host_allowlist(&self) -> String {
        self.trusted_hosts.join("|")
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            metadata: PathBuf::from("registry-metadata.json"),
            skill: PathBuf::from("SKILL.md"),
            runtime: PathBuf::from("scripts/iex_cloud_cli.sh"),
            docs: vec![
                PathBuf::from("README.md"),
                PathBuf::from("scripts/README.md"),
                PathBuf::from("references/api_docs.md"),
            ],
        }
    }
}

impl Default for ExpectedContract {
    fn default() -> Self {
        ExpectedContract {
            name: "iex-cloud".to_string(),
            description: "Use this skill when a task needs IEX Cloud market data through the REST API \
                (quotes, charts, fundamentals, market lists, and batch calls), including \
                secure token handling and scriptable CLI usage."
                .to_string(),
            homepage: "https://github.com/oscraters/iex-cloud-skill".to_string(),
            source_repository: "https://github.com/oscraters/iex-cloud-skill.git".to_string(),
            required_env_vars: vec!["IEX_TOKEN".to_string()],
            optional_env_vars: vec!["IEX_CLOUD_TOKEN".to_string(), "IEX_BASE_URL".to_string()],
            required_binaries: vec!["curl".to_string()],
            optional_binaries: vec!["jq".to_string()],
            credential_type: "env_var".to_string(),
            trusted_hosts: vec![
                "cloud.iexapis.com".to_string(),
                "sandbox.iexapis.com".to_string(),
            ],
        }
    }
}

impl Default for RuntimePolicy {
    fn default() -> Self {
        RuntimePolicy {
            tokens: vec![
                "IEX_TOKEN:-${IEX_CLOUD_TOKEN:-}".to_string(),
                "IEX_BASE_URL".to_string(),
                "need_cmd curl".to_string(),
            ],
            relative_path_phrase: "raw PATH must be a relative API path".to_string(),
            override_warnings: vec!["warning: using".to_string(), "warn ".to_string()],
        }
    }
}

impl Default for DocsPolicy {
    fn default() -> Self {
        DocsPolicy {
            markers: vec![
                "skills.entries.iex-cloud.apiKey".to_string(),
                "openclaw secrets configure".to_string(),
                "IEX_TOKEN".to_string(),
                "IEX_CLOUD_TOKEN".to_string(),
                "IEX_BASE_URL".to_string(),
            ],
        }
    }
}

impl Config {
    /// Loads configuration for the bundle at `root`.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. Otherwise try [`CONFIG_FILE_NAME`] inside `root`.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when the explicit path does not exist, the file
    /// cannot be read or parsed, or the parsed contract is unusable (see
    /// [`Config::validate`]).
    pub fn load(root: &Path, path: Option<&Path>) -> Result<Config, String> {
        let config_path = if let Some(p) = path {
            if p.exists() {
                Some(p.to_path_buf())
            } else {
                return Err(format!("Config file not found: {}", p.display()));
            }
        } else {
            let default_path = root.join(CONFIG_FILE_NAME);
            if default_path.exists() {
                Some(default_path)
            } else {
                None
            }
        };

        match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
                let config: Config = toml::from_str(&content)
                    .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?;
                config
                    .validate()
                    .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }

    /// Rejects contracts that no bundle could ever satisfy or that would
    /// vacuously pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use skill_contract::config::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.runtime.override_warnings.clear();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.expected.name.trim().is_empty() {
            return Err("expected.name must not be empty".to_string());
        }
        if self.expected.trusted_hosts.is_empty() {
            return Err("expected.trusted_hosts must list at least one host".to_string());
        }
        if self.runtime.override_warnings.is_empty() {
            return Err("runtime.override_warnings must list at least one phrasing".to_string());
        }
        if let Some(empty) = self
            .expected
            .trusted_hosts
            .iter()
            .chain(&self.runtime.tokens)
            .chain(std::iter::once(&self.runtime.relative_path_phrase))
            .chain(&self.runtime.override_warnings)
            .chain(&self.docs.markers)
            .find(|s| s.is_empty())
        {
            // An empty marker is contained in every text.
            return Err(format!("empty marker {empty:?} would always match"));
        }
        Ok(())
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))
    }
}
