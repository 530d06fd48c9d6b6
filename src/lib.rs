//! # skill-contract
//!
//! Cross-artifact consistency checks for agent skill bundles.
//!
//! A skill bundle describes one contract three times: a machine-readable
//! metadata descriptor (`registry-metadata.json`), the `SKILL.md`
//! frontmatter, and the runtime script that implements it. Docs describe it
//! a fourth time. These drift apart while a skill is edited. This crate
//! compares them field by field, and greps the runtime and docs for literal
//! markers standing in for safety behaviour (trusted-host allow-list,
//! relative-path validation, override warnings).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use skill_contract::{config::Config, output, validate};
//!
//! let root = Path::new("./iex-cloud-skill");
//! let config = Config::load(root, None).expect("failed to load config");
//! let report = validate::run_checks(root, &config, validate::RunMode::FailFast);
//!
//! if report.passed {
//!     print!("{}", output::pretty::format(&report));
//! } else {
//!     eprint!("{}", output::pretty::format(&report));
//! }
//! ```
//!
//! ## Architecture
//!
//! 1. **[`config`]**: the contract (expected constants, paths, markers) from TOML.
//! 2. **[`loader`]** / **[`frontmatter`]**: read the artifacts and extract frontmatter.
//! 3. **[`checks`]**: the fixed chain of [`checks::Check`] implementations.
//! 4. **[`validate`]**: run the chain, fail-fast or collecting.
//! 5. **[`finding`]** / **[`output`]**: report types and formatters.
//!
//! Every failure is a typed [`error::ContractError`].

pub mod checks;
pub mod config;
pub mod error;
pub mod finding;
pub mod frontmatter;
pub mod loader;
pub mod output;
pub mod validate;
