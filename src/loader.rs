//! Artifact loading.
//!
//! Every artifact is read fresh for each run and never mutated afterwards.
//! A run either loads all of them or stops at the first load failure, before
//! any comparison starts.

use crate::config::Config;
use crate::error::ContractError;
use crate::frontmatter::{self, Frontmatter};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads a file to a string.
///
/// # Errors
///
/// [`ContractError::MissingFile`] when `path` does not exist, and
/// [`ContractError::Io`] for any other read failure.
pub fn load_text(path: &Path) -> Result<String, ContractError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ContractError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => ContractError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Reads and decodes a JSON file.
///
/// # Errors
///
/// Everything [`load_text`] returns, plus [`ContractError::MalformedData`]
/// when the content is not valid JSON.
pub fn load_json(path: &Path) -> Result<Value, ContractError> {
    let text = load_text(path)?;
    serde_json::from_str(&text).map_err(|source| ContractError::MalformedData {
        path: path.to_path_buf(),
        line: None,
        source,
    })
}

/// A documentation file and its raw text.
#[derive(Debug, Clone)]
pub struct Doc {
    pub path: PathBuf,
    pub text: String,
}

/// Everything a validation run compares.
#[derive(Debug, Clone)]
pub struct Artifacts {
    /// Decoded metadata descriptor.
    pub metadata: Value,
    pub metadata_path: PathBuf,
    /// Frontmatter of `SKILL.md`.
    pub frontmatter: Frontmatter,
    pub skill_path: PathBuf,
    /// Raw runtime script text; never parsed.
    pub runtime: String,
    pub runtime_path: PathBuf,
    /// Documentation files in configured order.
    pub docs: Vec<Doc>,
}

impl Artifacts {
    /// Loads every artifact named by `config.paths`, relative to `root`.
    ///
    /// Order: metadata descriptor, `SKILL.md` frontmatter, runtime
    /// script, then each doc.
    pub fn load(root: &Path, config: &Config) -> Result<Artifacts, ContractError> {
        let metadata_path = root.join(&config.paths.metadata);
        let metadata = load_json(&metadata_path)?;

        let skill_path = root.join(&config.paths.skill);
        let skill_text = load_text(&skill_path)?;
        let frontmatter = frontmatter::parse(&skill_text, config.frontmatter.duplicate_keys)
            .map_err(|e| e.into_contract_error(&skill_path))?;

        let runtime_path = root.join(&config.paths.runtime);
        let runtime = load_text(&runtime_path)?;

        let docs = config
            .paths
            .docs
            .iter()
            .map(|rel| {
                let path = root.join(rel);
                load_text(&path).map(|text| Doc { path, text })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Artifacts {
            metadata,
            metadata_path,
            frontmatter,
            skill_path,
            runtime,
            runtime_path,
            docs,
        })
    }
}
