//! Field-equality primitives.
//!
//! Values are compared as [`serde_json::Value`], so sequences are equal only
//! when they have the same length, elements and order. An absent field never
//! equals anything.

use crate::error::ContractError;
use serde_json::Value;

/// Resolves a dotted path (`primary_credential.env_vars`) through nested
/// objects. Returns `None` as soon as a segment is missing or a non-object
/// is traversed.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use skill_contract::checks::equality::value_at;
///
/// let v = json!({"provenance": {"owner": "oscraters"}});
/// assert_eq!(value_at(&v, "provenance.owner"), Some(&json!("oscraters")));
/// assert_eq!(value_at(&v, "provenance.owner.name"), None);
/// ```
pub fn value_at<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |v, segment| v.get(segment))
}

/// Expected constant vs. actual field.
pub fn expect_field(
    rule: &'static str,
    field: &str,
    expected: &Value,
    actual: Option<&Value>,
    message: &str,
) -> Result<(), ContractError> {
    if actual == Some(expected) {
        return Ok(());
    }
    Err(ContractError::FieldMismatch {
        rule,
        field: field.to_string(),
        message: format!(
            "{message}: expected {}, found {}",
            render(Some(expected)),
            render(actual)
        ),
    })
}

/// Field in one artifact vs. the corresponding field in another.
///
/// `field` names the left-hand side; `right_field` is only used in the
/// diagnostic.
pub fn expect_same(
    rule: &'static str,
    field: &str,
    left: Option<&Value>,
    right_field: &str,
    right: Option<&Value>,
    message: &str,
) -> Result<(), ContractError> {
    if left.is_some() && left == right {
        return Ok(());
    }
    Err(ContractError::FieldMismatch {
        rule,
        field: field.to_string(),
        message: format!(
            "{message} ({field} = {}, {right_field} = {})",
            render(left),
            render(right)
        ),
    })
}

/// Field must be a non-empty string.
pub fn expect_non_empty(
    rule: &'static str,
    field: &str,
    actual: Option<&Value>,
    message: &str,
) -> Result<(), ContractError> {
    match actual {
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        _ => Err(ContractError::FieldMismatch {
            rule,
            field: field.to_string(),
            message: message.to_string(),
        }),
    }
}

/// Compact single-line rendering for diagnostics.
fn render(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<missing>".to_string(),
    }
}
