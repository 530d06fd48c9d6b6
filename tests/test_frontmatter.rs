mod common;

use serde_json::json;
use skill_contract::frontmatter::{parse, parse_block, DuplicateKeyPolicy, FrontmatterError};

const OVERWRITE: DuplicateKeyPolicy = DuplicateKeyPolicy::Overwrite;

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[test]
fn parses_scalar_and_metadata_keys() {
    let doc = "---\nname: iex-cloud\nmetadata: {\"openclaw\": {\"requires\": {\"env\": [\"IEX_TOKEN\"]}}}\n---\n# Body\n";
    let fm = parse(doc, OVERWRITE).unwrap();

    assert_eq!(fm.get("name"), Some(&json!("iex-cloud")));
    assert_eq!(
        fm.get("metadata.openclaw.requires.env"),
        Some(&json!(["IEX_TOKEN"]))
    );
}

#[test]
fn values_split_on_first_colon_only() {
    let doc = "---\nhomepage: https://github.com/oscraters/iex-cloud-skill\n---\n";
    let fm = parse(doc, OVERWRITE).unwrap();
    assert_eq!(
        fm.get("homepage"),
        Some(&json!("https://github.com/oscraters/iex-cloud-skill"))
    );
}

#[test]
fn keys_and_values_are_trimmed() {
    let doc = "---\n  name  :   iex-cloud   \n---\n";
    let fm = parse(doc, OVERWRITE).unwrap();
    assert_eq!(fm.get("name"), Some(&json!("iex-cloud")));
}

#[test]
fn non_metadata_values_stay_strings() {
    let doc = "---\nversion: 1\nlist: [\"a\"]\n---\n";
    let fm = parse(doc, OVERWRITE).unwrap();
    assert_eq!(fm.get("version"), Some(&json!("1")));
    assert_eq!(fm.get("list"), Some(&json!("[\"a\"]")));
}

#[test]
fn blank_lines_are_skipped() {
    let doc = "---\nname: a\n\n   \ndescription: b\n---\n";
    let fm = parse(doc, OVERWRITE).unwrap();
    assert_eq!(fm.keys().collect::<Vec<_>>(), vec!["description", "name"]);
}

#[test]
fn only_first_block_is_captured() {
    let doc = "---\nname: first\n---\nbody\n---\nname: second\n---\n";
    let fm = parse(doc, OVERWRITE).unwrap();
    assert_eq!(fm.get("name"), Some(&json!("first")));
    assert_eq!(fm.block(), "name: first");
}

#[test]
fn fixture_skill_md_parses() {
    let fm = parse(&common::fixture_text("SKILL.md"), OVERWRITE).unwrap();
    assert_eq!(fm.get("metadata.openclaw.skillKey"), Some(&json!("iex-cloud")));
    assert_eq!(
        fm.get("metadata.openclaw.requires.optionalEnv"),
        Some(&json!(["IEX_CLOUD_TOKEN", "IEX_BASE_URL"]))
    );
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn missing_block_is_reported() {
    let err = parse("# No frontmatter here\n", OVERWRITE).unwrap_err();
    assert!(matches!(err, FrontmatterError::Missing));
}

#[test]
fn block_not_at_start_is_missing() {
    let err = parse("\n---\nname: a\n---\n", OVERWRITE).unwrap_err();
    assert!(matches!(err, FrontmatterError::Missing));
}

#[test]
fn unterminated_block_is_missing() {
    let err = parse("---\nname: a\n", OVERWRITE).unwrap_err();
    assert!(matches!(err, FrontmatterError::Missing));
}

#[test]
fn line_without_colon_reports_document_line() {
    let doc = "---\nname: a\nnot a pair\n---\n";
    match parse(doc, OVERWRITE).unwrap_err() {
        FrontmatterError::InvalidLine { line, content } => {
            assert_eq!(line, 3);
            assert_eq!(content, "not a pair");
        }
        other => panic!("expected InvalidLine, got {other:?}"),
    }
}

#[test]
fn malformed_metadata_json_reports_line() {
    let doc = "---\nname: a\n\nmetadata: {\"openclaw\": \n---\n";
    match parse(doc, OVERWRITE).unwrap_err() {
        FrontmatterError::MalformedMetadata { line, .. } => assert_eq!(line, 4),
        other => panic!("expected MalformedMetadata, got {other:?}"),
    }
}

#[test]
fn errors_map_onto_contract_taxonomy() {
    let path = std::path::Path::new("SKILL.md");
    let err = parse("---\nbad\n---\n", OVERWRITE)
        .unwrap_err()
        .into_contract_error(path);
    assert_eq!(err.rule_id(), "frontmatter/invalid-line");
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.file(), Some(path));
}

// ---------------------------------------------------------------------------
// Duplicate keys
// ---------------------------------------------------------------------------

#[test]
fn duplicate_keys_overwrite_in_document_order() {
    let doc = "---\nname: first\nname: second\n---\n";
    let fm = parse(doc, DuplicateKeyPolicy::Overwrite).unwrap();
    assert_eq!(fm.get("name"), Some(&json!("second")));
}

#[test]
fn duplicate_keys_rejected_when_configured() {
    let doc = "---\nname: first\nhomepage: x\nname: second\n---\n";
    match parse(doc, DuplicateKeyPolicy::Reject).unwrap_err() {
        FrontmatterError::DuplicateKey { line, key } => {
            assert_eq!(line, 4);
            assert_eq!(key, "name");
        }
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn reparsing_extracted_block_yields_identical_values() {
    let first = parse(&common::fixture_text("SKILL.md"), OVERWRITE).unwrap();
    let second = parse_block(first.block(), OVERWRITE).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_value(), second.as_value());
}
