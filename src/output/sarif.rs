use crate::checks::all_rules;
use crate::finding::ValidationReport;
use serde_sarif::sarif::{
    ArtifactLocation, Location, Message, MultiformatMessageString, PhysicalLocation, Region,
    ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, Tool, ToolComponent,
};
use std::collections::HashMap;

/// One SARIF run covering every report; all findings are errors.
pub fn format(reports: &[ValidationReport]) -> String {
    let catalogue = all_rules();

    let rules: Vec<ReportingDescriptor> = catalogue
        .iter()
        .map(|info| {
            let mut rule = ReportingDescriptor::builder().id(info.id.to_string()).build();
            rule.short_description = Some(
                MultiformatMessageString::builder()
                    .text(info.message.to_string())
                    .build(),
            );
            rule.help = Some(
                MultiformatMessageString::builder()
                    .text(info.remediation.to_string())
                    .build(),
            );
            rule
        })
        .collect();

    let rule_index: HashMap<&str, i64> = catalogue
        .iter()
        .enumerate()
        .map(|(i, info)| (info.id, i as i64))
        .collect();

    let results: Vec<SarifResult> = reports
        .iter()
        .flat_map(|r| r.findings.iter())
        .map(|f| {
            let mut result = SarifResult::builder()
                .message(Message::builder().text(f.message.clone()).build())
                .build();

            result.rule_id = Some(f.rule_id.clone());
            result.level = Some(ResultLevel::Error);
            result.rule_index = rule_index.get(f.rule_id.as_str()).copied();

            if let Some(ref file) = f.file {
                let uri = file.to_string_lossy().replace('\\', "/");

                let mut location = Location::builder().build();
                let mut physical = PhysicalLocation::builder().build();

                physical.artifact_location = Some(ArtifactLocation::builder().uri(uri).build());

                if let Some(line) = f.line {
                    physical.region = Some(Region::builder().start_line(line as i64).build());
                }

                location.physical_location = Some(physical);
                result.locations = Some(vec![location]);
            }

            result
        })
        .collect();

    let driver = ToolComponent::builder()
        .name("skill-contract-check")
        .version(env!("CARGO_PKG_VERSION").to_string())
        .rules(rules)
        .build();

    let tool = Tool::builder().driver(driver).build();

    let run = Run::builder().tool(tool).results(results).build();

    let sarif = Sarif::builder().version("2.1.0").runs(vec![run]).build();

    serde_json::to_string_pretty(&sarif).expect("SARIF serialization failed")
}
