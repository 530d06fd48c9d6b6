//! Error taxonomy for contract validation.
//!
//! Every failure the validator can report is a [`ContractError`]. Loading
//! errors (`MissingFile`, `Io`, `MalformedData`, frontmatter errors) end a
//! run before any comparison; `FieldMismatch` and `MissingMarker` come from
//! the checks themselves.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single, fatal reason why the bundle's artifacts disagree.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("missing file: {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", location(.path, .line))]
    MalformedData {
        path: PathBuf,
        /// Set when the JSON is embedded in a frontmatter line.
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is missing frontmatter", file_name(.path))]
    MissingFrontmatter { path: PathBuf },

    #[error("invalid frontmatter line {line} in {}: {content}", file_name(.path))]
    InvalidFrontmatterLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("duplicate frontmatter key '{key}' on line {line} in {}", file_name(.path))]
    DuplicateFrontmatterKey {
        path: PathBuf,
        line: usize,
        key: String,
    },

    #[error("{message}")]
    FieldMismatch {
        rule: &'static str,
        /// Dotted name of the field that diverged.
        field: String,
        message: String,
    },

    #[error("{message}")]
    MissingMarker {
        rule: &'static str,
        marker: String,
        /// `None` when the marker may live in any of several artifacts.
        file: Option<PathBuf>,
        message: String,
    },
}

impl ContractError {
    /// Catalogue rule this error reports against (see [`crate::checks::all_rules`]).
    pub fn rule_id(&self) -> &'static str {
        match self {
            ContractError::MissingFile { .. } => "load/missing-file",
            ContractError::Io { .. } => "load/unreadable-file",
            ContractError::MalformedData { .. } => "load/malformed-json",
            ContractError::MissingFrontmatter { .. } => "frontmatter/missing-block",
            ContractError::InvalidFrontmatterLine { .. } => "frontmatter/invalid-line",
            ContractError::DuplicateFrontmatterKey { .. } => "frontmatter/duplicate-key",
            ContractError::FieldMismatch { rule, .. } | ContractError::MissingMarker { rule, .. } => {
                *rule
            }
        }
    }

    /// The artifact the failure points at, when there is one.
    pub fn file(&self) -> Option<&Path> {
        match self {
            ContractError::MissingFile { path }
            | ContractError::Io { path, .. }
            | ContractError::MalformedData { path, .. }
            | ContractError::MissingFrontmatter { path }
            | ContractError::InvalidFrontmatterLine { path, .. }
            | ContractError::DuplicateFrontmatterKey { path, .. } => Some(path),
            ContractError::MissingMarker { file, .. } => file.as_deref(),
            ContractError::FieldMismatch { .. } => None,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            ContractError::MalformedData { line, .. } => *line,
            ContractError::InvalidFrontmatterLine { line, .. }
            | ContractError::DuplicateFrontmatterKey { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns `true` for failures raised before any comparison ran.
    pub fn is_load_error(&self) -> bool {
        !matches!(
            self,
            ContractError::FieldMismatch { .. } | ContractError::MissingMarker { .. }
        )
    }
}

fn location(path: &Path, line: &Option<usize>) -> String {
    match line {
        Some(l) => format!("{} metadata frontmatter (line {l})", file_name(path)),
        None => path.display().to_string(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
