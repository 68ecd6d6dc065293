use super::{ensure_input_dir, file_name, file_stem, files_with_extension, write_workbook};
use crate::assemble::{merge_workbook, multi_sheet_workbook, single_sheet_workbook};
use crate::error::SheetError;
use crate::flatten::{FlattenRole, flatten};
use crate::model::{DEFAULT_BASE_LANGUAGE, DEFAULT_MERGE_STEM, MergeConfig, SheetGroup};
use crate::report::{ConversionReport, Issue};
use crate::tree::TranslationTree;
use fs_err as fs;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Settings for JSON → workbook conversion.
#[derive(Clone, Debug)]
pub struct ToWorkbookOptions {
    /// Either a directory of base language `.json` files, or a directory of
    /// `<language>/<logical_id>.json` sub-directories.
    pub input: PathBuf,
    /// Directory the workbooks are written to.
    pub output: PathBuf,
    pub base_language: String,
    pub merge_stem: String,
}

impl ToWorkbookOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            base_language: DEFAULT_BASE_LANGUAGE.to_string(),
            merge_stem: DEFAULT_MERGE_STEM.to_string(),
        }
    }

    fn workbook_path(&self, stem: &str) -> PathBuf {
        self.output.join(format!("{stem}.xlsx"))
    }
}

/// What the input directory holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputLayout {
    /// Base language files directly in the input directory.
    Flat(Vec<PathBuf>),
    /// One sub-directory per language.
    Languages(MergeConfig),
}

/// Inspect the input directory.
///
/// A directory holding nothing but sub-directories is read as one directory
/// per language; anything else as a flat set of base language files.
pub fn scan_input(input: &Path, base_language: &str) -> Result<InputLayout, SheetError> {
    ensure_input_dir(input)?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(input)? {
        entries.push(entry?.path());
    }
    if entries.is_empty() {
        return Err(SheetError::EmptyInputDirectory(input.to_path_buf()));
    }

    if entries.iter().all(|path| path.is_dir()) {
        entries.sort();
        let mut config = MergeConfig::new(base_language);
        for language_dir in &entries {
            let Some(language) = file_name(language_dir) else {
                continue;
            };
            for file in files_with_extension(language_dir, "json")? {
                if let Some(logical_id) = file_stem(&file) {
                    config.add(&logical_id, &language);
                }
            }
        }
        if config.is_empty() {
            return Err(SheetError::EmptyInputDirectory(input.to_path_buf()));
        }
        return Ok(InputLayout::Languages(config));
    }

    let files = files_with_extension(input, "json")?;
    if files.is_empty() {
        return Err(SheetError::EmptyInputDirectory(input.to_path_buf()));
    }
    Ok(InputLayout::Flat(files))
}

/// Convert JSON translation files into workbooks.
///
/// Flat input yields one single-sheet workbook per file. Per-language input
/// yields one workbook per logical file with a sheet per language. Both also
/// write the aggregate `<merge_stem>.xlsx`.
pub fn json_to_workbooks(options: &ToWorkbookOptions) -> Result<ConversionReport, SheetError> {
    let layout = scan_input(&options.input, &options.base_language)?;
    fs::create_dir_all(&options.output)?;

    let mut report = ConversionReport::new();
    match layout {
        InputLayout::Flat(files) => flat_workbooks(options, &files, &mut report),
        InputLayout::Languages(config) => language_workbooks(options, &config, &mut report),
    }

    report.sort();
    Ok(report)
}

fn flat_workbooks(options: &ToWorkbookOptions, files: &[PathBuf], report: &mut ConversionReport) {
    let base = options.base_language.as_str();
    let mut merged = Vec::new();

    for path in files {
        let Some(logical_id) = file_stem(path) else {
            continue;
        };
        let tree = match TranslationTree::load(path) {
            Ok(tree) => tree,
            Err(e) => {
                report.issue(Issue::InvalidSource {
                    path: path.clone(),
                    message: e.to_string(),
                });
                continue;
            },
        };

        let records = flatten(&tree, &logical_id, FlattenRole::Base);
        merged.extend(records.iter().cloned());
        write_workbook(
            &single_sheet_workbook(base, records),
            options.workbook_path(&logical_id),
            report,
        );
    }

    write_workbook(
        &single_sheet_workbook(base, merged),
        options.workbook_path(&options.merge_stem),
        report,
    );
}

fn language_workbooks(options: &ToWorkbookOptions, config: &MergeConfig, report: &mut ConversionReport) {
    let mut all_groups = Vec::new();
    tracing::debug!(
        files = config.len(),
        languages = ?config.languages(),
        "per-language input"
    );

    for (logical_id, languages) in config.iter() {
        let groups = load_groups(options, logical_id, languages, report);
        if groups.is_empty() {
            continue;
        }
        write_workbook(
            &multi_sheet_workbook(logical_id, &groups, &options.base_language),
            options.workbook_path(logical_id),
            report,
        );
        all_groups.extend(groups);
    }

    write_workbook(
        &merge_workbook(&all_groups, &options.base_language),
        options.workbook_path(&options.merge_stem),
        report,
    );
}

/// Flatten every language of one logical file.
///
/// The base language tree is loaded to completion first; the remaining
/// languages are then flattened in parallel against it.
fn load_groups(
    options: &ToWorkbookOptions,
    logical_id: &str,
    languages: &[String],
    report: &mut ConversionReport,
) -> Vec<SheetGroup> {
    let base_language = options.base_language.as_str();
    let path_of = |language: &str| options.input.join(language).join(format!("{logical_id}.json"));
    let load = |language: &str| {
        let path = path_of(language);
        TranslationTree::load(&path).map_err(|e| Issue::InvalidSource {
            path,
            message: e.to_string(),
        })
    };

    let mut groups = Vec::with_capacity(languages.len());

    let base_tree = if languages.iter().any(|l| l == base_language) {
        match load(base_language) {
            Ok(tree) => {
                let records = flatten(&tree, logical_id, FlattenRole::Base);
                groups.push(SheetGroup::new(logical_id, base_language).with_records(records));
                Some(tree)
            },
            Err(issue) => {
                report.issue(issue);
                None
            },
        }
    } else {
        None
    };

    let translated: Vec<Result<SheetGroup, Issue>> = languages
        .par_iter()
        .filter(|language| language.as_str() != base_language)
        .map(|language| {
            let tree = load(language.as_str())?;
            let role = FlattenRole::Translation {
                base: base_tree.as_ref(),
            };
            let records = flatten(&tree, logical_id, role);
            Ok(SheetGroup::new(logical_id, language.as_str()).with_records(records))
        })
        .collect();

    for result in translated {
        match result {
            Ok(group) => groups.push(group),
            Err(issue) => report.issue(issue),
        }
    }

    groups
}
