#![allow(dead_code)]

use std::path::Path;

use serde_json::Value;
use skill_contract::config::Config;
use skill_contract::loader::Artifacts;
use walkdir::WalkDir;

pub const FIXTURE: &str = "tests/fixtures/aligned-skill";

/// Copies the aligned fixture bundle into a fresh temporary directory.
pub fn aligned_bundle() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let src = Path::new(FIXTURE);
    for entry in WalkDir::new(src).into_iter().filter_map(|e| e.ok()) {
        let rel = entry.path().strip_prefix(src).unwrap();
        let dest = dir.path().join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).unwrap();
        } else {
            std::fs::copy(entry.path(), &dest).unwrap();
        }
    }
    dir
}

/// Rewrites a bundle file through `f`.
pub fn edit(root: &Path, rel: &str, f: impl FnOnce(String) -> String) {
    let path = root.join(rel);
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, f(text)).unwrap();
}

/// Rewrites the metadata descriptor through `f`.
pub fn edit_metadata(root: &Path, f: impl FnOnce(&mut Value)) {
    edit(root, "registry-metadata.json", |text| {
        let mut value: Value = serde_json::from_str(&text).unwrap();
        f(&mut value);
        serde_json::to_string_pretty(&value).unwrap()
    });
}

/// Loads the untouched fixture with the default contract.
pub fn aligned_artifacts() -> (Artifacts, Config) {
    let config = Config::default();
    let artifacts = Artifacts::load(Path::new(FIXTURE), &config).unwrap();
    (artifacts, config)
}

pub fn fixture_text(rel: &str) -> String {
    std::fs::read_to_string(Path::new(FIXTURE).join(rel)).unwrap()
}
