use clap::{Parser, Subcommand};
use skill_contract::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skill-contract-check",
    version,
    about = "Checks that a skill bundle's metadata, SKILL.md, runtime script and docs agree"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check one skill bundle
    Check {
        /// Path to the bundle root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout/stderr
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Run every check and report all failures instead of stopping at the first
        #[arg(long)]
        all: bool,

        /// Print per-check progress to stderr
        #[arg(long, short)]
        verbose: bool,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check every bundle directory inside a collection directory
    #[command(name = "check-all")]
    CheckAll {
        /// Path to a directory containing multiple bundle subdirectories
        path: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Run every check and report all failures instead of stopping at the first
        #[arg(long)]
        all: bool,

        /// Custom config file path (applies to every bundle)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List all named rules
    ListRules,

    /// Show full explanation for a rule
    Explain {
        /// Rule ID (e.g., "metadata/required-env-vars")
        rule_id: String,
    },

    /// Print the effective contract as TOML
    #[command(name = "show-contract")]
    ShowContract {
        /// Path to the bundle root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
