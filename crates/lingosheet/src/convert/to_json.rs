use super::{ensure_input_dir, file_name, file_stem, files_with_extension};
use crate::error::SheetError;
use crate::model::{DEFAULT_BASE_LANGUAGE, DEFAULT_MERGE_STEM};
use crate::reconcile::{Reconciler, Strategy};
use crate::report::{ConversionReport, Issue};
use crate::store::LocaleStore;
use crate::workbook::Workbook;
use fs_err as fs;
use std::path::PathBuf;

/// Settings for workbook → JSON conversion.
#[derive(Clone, Debug)]
pub struct ToJsonOptions {
    /// Directory holding the `.xlsx` files.
    pub input: PathBuf,
    /// Existing translations to merge into. `None` builds every file from scratch.
    pub locales: Option<PathBuf>,
    /// Root of the `<language>/<logical_id>.json` output.
    pub output: PathBuf,
    /// Read only the aggregate workbook instead of the per-file ones.
    pub merge: bool,
    pub base_language: String,
    pub merge_stem: String,
    /// Spaces per indentation level of the written JSON.
    pub indent: usize,
}

impl ToJsonOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            locales: None,
            output: output.into(),
            merge: false,
            base_language: DEFAULT_BASE_LANGUAGE.to_string(),
            merge_stem: DEFAULT_MERGE_STEM.to_string(),
            indent: 4,
        }
    }

    pub fn with_locales(mut self, locales: Option<PathBuf>) -> Self {
        self.locales = locales;
        self
    }

    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    fn merge_file_name(&self) -> String {
        format!("{}.xlsx", self.merge_stem)
    }
}

/// Convert the workbooks in `options.input` back into JSON files.
///
/// With `merge` set only the aggregate workbook is read, and each row's key
/// prefix picks its file. Otherwise every other workbook is read and named
/// after its file stem. Unreadable workbooks, missing locale files and rows
/// without a key are reported and skipped.
pub fn workbooks_to_json(options: &ToJsonOptions) -> Result<ConversionReport, SheetError> {
    ensure_input_dir(&options.input)?;
    let workbooks = files_with_extension(&options.input, "xlsx")?;
    if workbooks.is_empty() {
        return Err(SheetError::EmptyInputDirectory(options.input.clone()));
    }

    fs::create_dir_all(&options.output)?;

    let store = LocaleStore::new(options.locales.clone());
    let reconciler = Reconciler::new(
        &store,
        &options.output,
        &options.base_language,
        options.indent,
    );
    let merge_file = options.merge_file_name();
    let mut report = ConversionReport::new();

    for path in workbooks {
        let (Some(name), Some(stem)) = (file_name(&path), file_stem(&path)) else {
            continue;
        };
        let is_merge_file = name == merge_file;
        if is_merge_file != options.merge {
            continue;
        }

        let strategy = if is_merge_file {
            Strategy::Merge
        } else {
            Strategy::Individual { logical_id: stem }
        };

        let workbook = match Workbook::read(&path) {
            Ok(workbook) => workbook,
            Err(e) => {
                report.issue(Issue::InvalidSource {
                    path,
                    message: e.to_string(),
                });
                continue;
            },
        };

        tracing::debug!(workbook = %name, sheets = workbook.sheets.len(), "converting workbook");
        report.extend(reconciler.reconcile_workbook(&name, &workbook, &strategy));
    }

    report.sort();
    Ok(report)
}
