//! SKILL.md frontmatter extraction.
//!
//! The frontmatter is the first `---`-delimited block at the very start of
//! the document. Inside it, every non-blank line is a `key: value` pair split
//! on the first colon. The `metadata` key is special: its value is a single
//! line of JSON and is decoded into a nested structure. All other values are
//! kept as plain strings, quotes included.
//!
//! ```text
//! ---
//! name: iex-cloud
//! description: Use this skill when ...
//! metadata: {"openclaw": {"skillKey": "iex-cloud", "requires": {"env": ["IEX_TOKEN"]}}}
//! ---
//! ```
//!
//! Parsing never panics on malformed input; every failure is a
//! [`FrontmatterError`] carrying the 1-based document line it refers to.

use crate::checks::equality::value_at;
use crate::error::ContractError;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::LazyLock;

/// Key whose value is decoded as JSON instead of kept as a string.
pub const METADATA_KEY: &str = "metadata";

/// Opening delimiter, non-greedy body, closing delimiter. Only a block at the
/// very start of the document counts.
static RE_FRONTMATTER: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?s)\A---\n(.*?)\n---\n").unwrap());

/// What to do when a key appears twice in the block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKeyPolicy {
    /// Later lines win, in document order.
    #[default]
    Overwrite,
    /// A repeated key is an authoring error.
    Reject,
}

#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("no frontmatter block at start of document")]
    Missing,

    #[error("line {line} has no ':' separator: {content}")]
    InvalidLine { line: usize, content: String },

    #[error("invalid JSON in metadata on line {line}: {source}")]
    MalformedMetadata {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate key '{key}' on line {line}")]
    DuplicateKey { line: usize, key: String },
}

impl FrontmatterError {
    /// Attaches the document path, mapping onto the validator's taxonomy.
    pub fn into_contract_error(self, path: &Path) -> ContractError {
        let path = path.to_path_buf();
        match self {
            FrontmatterError::Missing => ContractError::MissingFrontmatter { path },
            FrontmatterError::InvalidLine { line, content } => {
                ContractError::InvalidFrontmatterLine {
                    path,
                    line,
                    content,
                }
            }
            FrontmatterError::MalformedMetadata { line, source } => ContractError::MalformedData {
                path,
                line: Some(line),
                source,
            },
            FrontmatterError::DuplicateKey { line, key } => {
                ContractError::DuplicateFrontmatterKey { path, line, key }
            }
        }
    }
}

/// Parsed frontmatter: an unordered key → value mapping plus the raw block.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    fields: Value,
    block: String,
}

impl Frontmatter {
    /// Resolves a dotted path such as `metadata.openclaw.requires.env`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        value_at(&self.fields, path)
    }

    /// Top-level keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields
            .as_object()
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }

    /// The text between the delimiters, exactly as captured.
    pub fn block(&self) -> &str {
        &self.block
    }

    pub fn as_value(&self) -> &Value {
        &self.fields
    }
}

/// Extracts and parses the frontmatter block from a full document.
///
/// # Examples
///
/// ```
/// use skill_contract::frontmatter::{parse, DuplicateKeyPolicy};
///
/// let doc = "---\nname: iex-cloud\nmetadata: {\"openclaw\": {\"skillKey\": \"iex-cloud\"}}\n---\n# Body\n";
/// let fm = parse(doc, DuplicateKeyPolicy::Overwrite).unwrap();
/// assert_eq!(fm.get("name").unwrap(), "iex-cloud");
/// assert_eq!(fm.get("metadata.openclaw.skillKey").unwrap(), "iex-cloud");
/// ```
pub fn parse(content: &str, policy: DuplicateKeyPolicy) -> Result<Frontmatter, FrontmatterError> {
    let block = RE_FRONTMATTER
        .captures(content)
        .and_then(|c| c.get(1))
        .ok_or(FrontmatterError::Missing)?
        .as_str();
    // The opening delimiter occupies line 1.
    parse_lines(block, 2, policy)
}

/// Parses an already-extracted block (the text between the delimiters).
///
/// Line numbers in errors are relative to the block.
pub fn parse_block(block: &str, policy: DuplicateKeyPolicy) -> Result<Frontmatter, FrontmatterError> {
    parse_lines(block, 1, policy)
}

fn parse_lines(
    block: &str,
    first_line: usize,
    policy: DuplicateKeyPolicy,
) -> Result<Frontmatter, FrontmatterError> {
    let mut fields = Map::new();

    for (idx, raw_line) in block.lines().enumerate() {
        let line = first_line + idx;
        if raw_line.trim().is_empty() {
            continue;
        }

        let Some((key, value)) = raw_line.split_once(':') else {
            return Err(FrontmatterError::InvalidLine {
                line,
                content: raw_line.to_string(),
            });
        };
        let key = key.trim();
        let value = value.trim();

        if policy == DuplicateKeyPolicy::Reject && fields.contains_key(key) {
            return Err(FrontmatterError::DuplicateKey {
                line,
                key: key.to_string(),
            });
        }

        let parsed = if key == METADATA_KEY {
            serde_json::from_str(value)
                .map_err(|source| FrontmatterError::MalformedMetadata { line, source })?
        } else {
            Value::String(value.to_string())
        };
        fields.insert(key.to_string(), parsed);
    }

    Ok(Frontmatter {
        fields: Value::Object(fields),
        block: block.to_string(),
    })
}
