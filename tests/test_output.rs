mod common;

use serde_json::json;
use skill_contract::config::Config;
use skill_contract::finding::ValidationReport;
use skill_contract::output;
use skill_contract::output::pretty::SUCCESS_LINE;
use skill_contract::output::OutputFormat;
use skill_contract::validate::{run_checks, RunMode};
use std::path::Path;

fn aligned_report() -> ValidationReport {
    run_checks(Path::new(common::FIXTURE), &Config::default(), RunMode::FailFast)
}

/// Report for a bundle whose runtime drops the command guard and whose
/// README drops the secrets command.
fn drifted_report(mode: RunMode) -> (tempfile::TempDir, ValidationReport) {
    let bundle = common::aligned_bundle();
    common::edit(bundle.path(), "scripts/iex_cloud_cli.sh", |t| {
        t.replace("need_cmd curl\n", "\n")
    });
    common::edit(bundle.path(), "README.md", |t| {
        t.replace("openclaw secrets configure", "")
    });
    let report = run_checks(bundle.path(), &Config::default(), mode);
    (bundle, report)
}

#[test]
fn pretty_success_is_exactly_one_line() {
    let pretty = output::format_report(&aligned_report(), &OutputFormat::Pretty);
    assert_eq!(pretty, format!("{SUCCESS_LINE}\n"));
}

#[test]
fn pretty_failure_is_one_error_line_in_fail_fast() {
    let (_bundle, report) = drifted_report(RunMode::FailFast);
    let pretty = output::format_report(&report, &OutputFormat::Pretty);

    assert_eq!(pretty.lines().count(), 1);
    assert!(pretty.contains("ERROR:"));
    assert!(pretty.contains("runtime file missing expected token: need_cmd curl"));
}

#[test]
fn pretty_collect_mode_lists_each_failure() {
    let (_bundle, report) = drifted_report(RunMode::Collect);
    let pretty = output::format_report(&report, &OutputFormat::Pretty);

    assert_eq!(pretty.lines().count(), 2);
    assert!(pretty.lines().all(|l| l.contains("ERROR:")));
    assert!(pretty.contains("is missing required marker: openclaw secrets configure"));
}

#[test]
fn verbose_outcomes_show_each_check() {
    let (_bundle, report) = drifted_report(RunMode::FailFast);
    let outcomes = output::pretty::format_outcomes(&report);

    assert!(outcomes.contains("PASS"));
    assert!(outcomes.contains("FAIL"));
    assert!(outcomes.contains("SKIP"));
    assert!(outcomes.contains("trusted_hosts"));
}

#[test]
fn json_output_is_valid() {
    let (_bundle, report) = drifted_report(RunMode::Collect);
    let json = output::format_report(&report, &OutputFormat::Json);

    let parsed: serde_json::Value = serde_json::from_str(&json).expect("JSON should be valid");
    assert_eq!(parsed["contract"], json!("iex-cloud"));
    assert_eq!(parsed["passed"], json!(false));
    assert_eq!(parsed["mode"], json!("collect"));
    assert_eq!(parsed["stage"], json!("failed"));
    assert_eq!(parsed["failed_at"], json!("runtime_tokens"));
    assert_eq!(parsed["summary"]["failed"], json!(2));
    assert_eq!(parsed["checks"].as_array().unwrap().len(), 5);

    let findings = parsed["findings"].as_array().unwrap();
    assert_eq!(findings[0]["rule_id"], json!("runtime/required-token"));
    assert_eq!(findings[1]["rule_id"], json!("docs/required-marker"));
    assert!(findings[1]["file"].as_str().unwrap().ends_with("README.md"));
}

#[test]
fn json_aligned_bundle_passes() {
    let json = output::format_report(&aligned_report(), &OutputFormat::Json);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["passed"], json!(true));
    assert_eq!(parsed["stage"], json!("success"));
    assert!(parsed["failed_at"].is_null());
    assert!(parsed["findings"].as_array().unwrap().is_empty());
    assert!(parsed["checked_at"].is_string());
}

#[test]
fn json_many_is_an_array_in_order() {
    let (_bundle, drifted) = drifted_report(RunMode::FailFast);
    let json = output::json::format_many(&[aligned_report(), drifted]);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["passed"], json!(true));
    assert_eq!(items[1]["passed"], json!(false));
}

#[test]
fn sarif_output_is_valid() {
    let (_bundle, report) = drifted_report(RunMode::Collect);
    let sarif = output::format_report(&report, &OutputFormat::Sarif);

    let parsed: serde_json::Value =
        serde_json::from_str(&sarif).expect("SARIF JSON should be valid");
    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "skill-contract-check");

    let results = parsed["runs"][0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r["level"] == "error"));
    assert_eq!(results[0]["ruleId"], "runtime/required-token");
}

#[test]
fn sarif_host_miss_has_no_location() {
    let bundle = common::aligned_bundle();
    let mut config = Config::default();
    config
        .expected
        .trusted_hosts
        .push("extra.iexapis.com".to_string());
    let report = run_checks(bundle.path(), &config, RunMode::Collect);

    let sarif = output::format_report(&report, &OutputFormat::Sarif);
    let parsed: serde_json::Value = serde_json::from_str(&sarif).unwrap();
    let results = parsed["runs"][0]["results"].as_array().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["ruleId"], "runtime/trusted-host-allowlist");
    assert!(results[0]["locations"].is_array());
    assert_eq!(results[1]["ruleId"], "hosts/trusted-host");
    assert!(results[1].get("locations").is_none());
}

#[test]
fn sarif_catalogue_lists_every_rule() {
    let sarif = output::format_report(&aligned_report(), &OutputFormat::Sarif);
    let parsed: serde_json::Value = serde_json::from_str(&sarif).unwrap();

    let rules = parsed["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap();
    assert_eq!(rules.len(), skill_contract::checks::all_rules().len());
    assert!(rules.iter().any(|r| r["id"] == "hosts/trusted-host"));
    assert!(parsed["runs"][0]["results"].as_array().unwrap().is_empty());
}

#[test]
fn collection_summary_counts_bundles() {
    let (_bundle, drifted) = drifted_report(RunMode::FailFast);
    let summary =
        output::pretty::format_collection_summary(Path::new("skills"), &[aligned_report(), drifted]);

    assert!(summary.contains("(2 bundles)"));
    assert!(summary.contains("ALIGNED"));
    assert!(summary.contains("FAILED"));
    assert!(summary.contains("1 failed"));
    assert!(summary.contains("1 aligned"));
}
