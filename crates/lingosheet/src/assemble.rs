//! Arranging flat records into workbooks.

use crate::model::{FlatRecord, SheetGroup};
use crate::workbook::{Sheet, Workbook};
use indexmap::IndexMap;

/// One workbook holding one sheet.
pub fn single_sheet_workbook(sheet_name: &str, records: Vec<FlatRecord>) -> Workbook {
    Workbook {
        sheets: vec![Sheet::new(sheet_name, records)],
    }
}

/// One workbook for a single logical file, one sheet per language.
///
/// Only groups of `logical_id` are used. The base language sheet comes
/// first; the others keep the order of `groups`.
pub fn multi_sheet_workbook(
    logical_id: &str,
    groups: &[SheetGroup],
    base_language: &str,
) -> Workbook {
    let own = groups.iter().filter(|group| group.logical_id == logical_id);
    sheets_by_language(own, base_language)
}

/// The aggregate workbook: every logical file's records concatenated into one
/// sheet per language, base language first. A language gets a sheet as soon
/// as any file has it.
pub fn merge_workbook(groups: &[SheetGroup], base_language: &str) -> Workbook {
    sheets_by_language(groups, base_language)
}

fn sheets_by_language<'g>(
    groups: impl IntoIterator<Item = &'g SheetGroup>,
    base_language: &str,
) -> Workbook {
    let mut by_language: IndexMap<&str, Vec<FlatRecord>> = IndexMap::new();
    for group in groups {
        by_language
            .entry(group.language.as_str())
            .or_default()
            .extend(group.records.iter().cloned());
    }

    if let Some(index) = by_language.get_index_of(base_language) {
        by_language.move_index(index, 0);
    }

    Workbook {
        sheets: by_language
            .into_iter()
            .map(|(language, records)| Sheet::new(language, records))
            .collect(),
    }
}
