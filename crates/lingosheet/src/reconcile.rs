//! Rebuilding JSON files from workbook sheets.

use crate::error::SheetError;
use crate::model::FlatRecord;
use crate::report::{ConversionReport, Issue};
use crate::store::LocaleStore;
use crate::tree::TranslationTree;
use crate::unflatten::{Applied, apply_record, group_by_logical_id, is_plain_name};
use crate::workbook::{Sheet, Workbook};
use fs_err as fs;
use rayon::prelude::*;
use std::path::Path;

/// How the rows of a sheet map to output files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// The aggregate workbook: each row names its logical file in the key prefix.
    Merge,
    /// A per-file workbook: every row belongs to `logical_id`.
    Individual { logical_id: String },
}

/// Turns sheets into `<output_root>/<language>/<logical_id>.json` files,
/// merging into the locale store where it has something to offer.
#[derive(Clone, Copy, Debug)]
pub struct Reconciler<'a> {
    store: &'a LocaleStore,
    output_root: &'a Path,
    base_language: &'a str,
    indent: usize,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        store: &'a LocaleStore,
        output_root: &'a Path,
        base_language: &'a str,
        indent: usize,
    ) -> Self {
        Self {
            store,
            output_root,
            base_language,
            indent,
        }
    }

    /// Process every sheet of a workbook. Sheets run in parallel; each one
    /// only writes inside its own language directory.
    pub fn reconcile_workbook(
        &self,
        workbook_name: &str,
        workbook: &Workbook,
        strategy: &Strategy,
    ) -> ConversionReport {
        workbook
            .sheets
            .par_iter()
            .map(|sheet| self.reconcile_sheet(workbook_name, sheet, strategy))
            .reduce(ConversionReport::new, |mut acc, report| {
                acc.extend(report);
                acc
            })
    }

    /// Process one sheet, whose name is the language of its rows.
    pub fn reconcile_sheet(
        &self,
        workbook_name: &str,
        sheet: &Sheet,
        strategy: &Strategy,
    ) -> ConversionReport {
        let mut report = ConversionReport::new();
        let language = sheet.name.as_str();
        let is_base = language == self.base_language;

        if !is_plain_name(language) {
            report.issue(Issue::UnsafeName {
                workbook: workbook_name.to_string(),
                sheet: sheet.name.clone(),
                name: sheet.name.clone(),
            });
            return report;
        }

        let mut keyed: Vec<&FlatRecord> = Vec::with_capacity(sheet.records.len());
        for (index, record) in sheet.records.iter().enumerate() {
            if record.has_key() {
                keyed.push(record);
            } else {
                report.issue(Issue::MissingKey {
                    workbook: workbook_name.to_string(),
                    sheet: sheet.name.clone(),
                    row: index + 1,
                });
            }
        }

        let groups: Vec<(String, Vec<&FlatRecord>)> = match strategy {
            Strategy::Merge => group_by_logical_id(keyed).into_iter().collect(),
            Strategy::Individual { logical_id } => vec![(logical_id.clone(), keyed)],
        };

        for (logical_id, records) in groups {
            if !is_plain_name(&logical_id) {
                report.issue(Issue::UnsafeName {
                    workbook: workbook_name.to_string(),
                    sheet: sheet.name.clone(),
                    name: logical_id,
                });
                continue;
            }

            let built = self.build_group(language, &logical_id, &records, is_base, &mut report);
            let tree = match built {
                Ok(tree) => tree,
                Err(issue) => {
                    report.issue(issue);
                    continue;
                },
            };

            let path = self.output_path(language, &logical_id);
            match self.write(&tree, &path) {
                Ok(()) => report.generated(path),
                Err(e) => report.issue(Issue::WriteFailed {
                    path,
                    message: e.to_string(),
                }),
            }
        }

        report
    }

    /// Seed a group's tree from the locale store and apply its records.
    ///
    /// Rows that would overwrite an existing non-object value on their way
    /// to the leaf are skipped and recorded in `report`.
    pub fn build_group(
        &self,
        language: &str,
        logical_id: &str,
        records: &[&FlatRecord],
        is_base: bool,
        report: &mut ConversionReport,
    ) -> Result<TranslationTree, Issue> {
        let mut tree = self.store.seed(language, logical_id)?.into_tree();

        let mut applied = 0;
        for record in records {
            match apply_record(&mut tree, record, is_base) {
                Applied::Written => applied += 1,
                Applied::Skipped => {},
                Applied::Conflict => report.issue(Issue::ConflictingPath {
                    path: self.output_path(language, logical_id),
                    key: record.key.clone(),
                }),
            }
        }

        tracing::debug!(language, logical_id, applied, "built group");
        Ok(tree)
    }

    pub fn output_path(&self, language: &str, logical_id: &str) -> std::path::PathBuf {
        self.output_root
            .join(language)
            .join(format!("{logical_id}.json"))
    }

    fn write(&self, tree: &TranslationTree, path: &Path) -> Result<(), SheetError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        tree.write(path, self.indent)
    }
}
