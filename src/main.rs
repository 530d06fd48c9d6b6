mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use skill_contract::checks;
use skill_contract::config::Config;
use skill_contract::finding::ValidationReport;
use skill_contract::output::{self, OutputFormat};
use skill_contract::validate::{self, RunMode};
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            path,
            format,
            output: output_path,
            all,
            verbose,
            config: config_path,
        } => {
            if !path.exists() {
                eprintln!("Error: path does not exist: {}", path.display());
                std::process::exit(2);
            }

            let config = load_config(&path, config_path.as_deref());

            // A collection directory would otherwise fail with a confusing
            // "missing file" on the descriptor.
            let children = validate::find_bundle_dirs(&path, &config.paths.metadata);
            if !path.join(&config.paths.metadata).exists() && !children.is_empty() {
                eprintln!(
                    "Error: '{}' looks like a collection of skill bundles, not a single bundle.",
                    path.display()
                );
                eprintln!();
                eprintln!("To check all bundles at once:");
                eprintln!("  skill-contract-check check-all {}", path.display());
                eprintln!();
                eprintln!("To check a specific bundle:");
                for child in &children {
                    eprintln!("  skill-contract-check check {}", child.display());
                }
                std::process::exit(2);
            }

            let report = validate::run_checks(&path, &config, run_mode(all));
            let formatted = output::format_report(&report, &format);

            if verbose {
                eprint!("{}", output::pretty::format_outcomes(&report));
            }

            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else if matches!(format, OutputFormat::Pretty) && !report.passed {
                eprint!("{formatted}");
            } else {
                print!("{formatted}");
            }

            std::process::exit(if report.passed { 0 } else { 1 });
        }

        Commands::CheckAll {
            path,
            format,
            all,
            config: config_path,
        } => {
            if !path.exists() {
                eprintln!("Error: path does not exist: {}", path.display());
                std::process::exit(2);
            }

            let collection_config = load_config(&path, config_path.as_deref());
            let bundle_dirs =
                validate::find_bundle_dirs(&path, &collection_config.paths.metadata);
            if bundle_dirs.is_empty() {
                eprintln!(
                    "Error: no skill bundles found in '{}' (no subdirectory contains {})",
                    path.display(),
                    collection_config.paths.metadata.display()
                );
                std::process::exit(2);
            }

            let reports: Vec<ValidationReport> = bundle_dirs
                .iter()
                .map(|dir| {
                    let config = load_config(dir, config_path.as_deref());
                    validate::run_checks(dir, &config, run_mode(all))
                })
                .collect();

            match format {
                OutputFormat::Pretty => {
                    print!("{}", output::pretty::format_collection_summary(&path, &reports))
                }
                OutputFormat::Json => println!("{}", output::json::format_many(&reports)),
                OutputFormat::Sarif => println!("{}", output::sarif::format(&reports)),
            }

            let all_passed = reports.iter().all(|r| r.passed);
            std::process::exit(if all_passed { 0 } else { 1 });
        }

        Commands::ListRules => {
            let rules = checks::all_rules();
            println!("{}", "Contract Rules".bold().underline());
            println!();

            let mut current_stage = None;
            for rule in &rules {
                if current_stage != Some(rule.stage) {
                    if current_stage.is_some() {
                        println!();
                    }
                    println!("  {}", rule.stage.to_string().bold());
                    current_stage = Some(rule.stage);
                }

                println!(
                    "    {id:<38} {message}",
                    id = rule.id,
                    message = rule.message,
                );
            }

            println!();
            println!("  Total: {} rules", rules.len());
        }

        Commands::Explain { rule_id } => {
            let rules = checks::all_rules();
            match rules.iter().find(|r| r.id == rule_id) {
                Some(rule) => {
                    println!("{}", rule.id.bold());
                    println!();
                    println!("  Stage:        {}", rule.stage);
                    println!("  Description:  {}", rule.message);
                    println!("  Remediation:  {}", rule.remediation);
                }
                None => {
                    eprintln!("Unknown rule: {rule_id}");
                    eprintln!("Use 'skill-contract-check list-rules' to see all available rules.");
                    std::process::exit(2);
                }
            }
        }

        Commands::ShowContract {
            path,
            config: config_path,
        } => {
            let config = load_config(&path, config_path.as_deref());
            match config.to_toml() {
                Ok(text) => print!("{text}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                }
            }
        }
    }
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Config {
    Config::load(root, explicit).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    })
}

fn run_mode(all: bool) -> RunMode {
    if all {
        RunMode::Collect
    } else {
        RunMode::FailFast
    }
}
