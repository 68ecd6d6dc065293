//! The two conversion pipelines and the directory handling they share.

mod to_json;
mod to_workbook;

pub use to_json::{ToJsonOptions, workbooks_to_json};
pub use to_workbook::{InputLayout, ToWorkbookOptions, json_to_workbooks, scan_input};

use crate::error::SheetError;
use crate::report::{ConversionReport, Issue};
use crate::workbook::Workbook;
use fs_err as fs;
use std::path::{Path, PathBuf};

fn ensure_input_dir(dir: &Path) -> Result<(), SheetError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(SheetError::MissingInputDirectory(dir.to_path_buf()))
    }
}

/// Files in `dir` with the given extension, sorted by name.
///
/// Office lock files (`~$name.xlsx`) are skipped.
fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SheetError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_lock_file = file_name(&path).is_some_and(|name| name.starts_with("~$"));
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) && !is_lock_file {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().and_then(|n| n.to_str()).map(str::to_string)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().and_then(|n| n.to_str()).map(str::to_string)
}

fn write_workbook(workbook: &Workbook, path: PathBuf, report: &mut ConversionReport) {
    match workbook.write(&path) {
        Ok(()) => report.generated(path),
        Err(e) => report.issue(Issue::WriteFailed {
            path,
            message: e.to_string(),
        }),
    }
}
