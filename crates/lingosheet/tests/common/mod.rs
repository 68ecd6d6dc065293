#![allow(dead_code)] // Functions used by different test binaries appear unused per-binary

//! Shared helpers for lingosheet integration tests.

use lingosheet::TranslationTree;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Write `value` as pretty JSON to `root/relative`, creating parent directories.
pub fn write_json(root: &Path, relative: &str, value: &Value) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&content).unwrap()
}

pub fn tree(value: Value) -> TranslationTree {
    TranslationTree::from_value(value).expect("test tree must be an object")
}
