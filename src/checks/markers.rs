//! Literal-marker primitives.
//!
//! A marker stands in for behaviour that cannot be checked structurally, for
//! example "the runtime rejects absolute paths". Presence is a plain
//! substring test on the raw text.

use crate::error::ContractError;
use std::path::Path;

/// `marker` must occur in `text`.
pub fn require_marker(
    rule: &'static str,
    text: &str,
    marker: &str,
    file: &Path,
    message: &str,
) -> Result<(), ContractError> {
    if text.contains(marker) {
        return Ok(());
    }
    Err(ContractError::MissingMarker {
        rule,
        marker: marker.to_string(),
        file: Some(file.to_path_buf()),
        message: message.to_string(),
    })
}

/// At least one of `markers` must occur in `text`.
pub fn require_any_marker(
    rule: &'static str,
    text: &str,
    markers: &[String],
    file: &Path,
    message: &str,
) -> Result<(), ContractError> {
    if markers.iter().any(|m| text.contains(m.as_str())) {
        return Ok(());
    }
    Err(ContractError::MissingMarker {
        rule,
        marker: markers.join(" | "),
        file: Some(file.to_path_buf()),
        message: message.to_string(),
    })
}
