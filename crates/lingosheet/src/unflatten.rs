//! Flat records → JSON tree.

use crate::model::FlatRecord;
use crate::tree::TranslationTree;
use indexmap::IndexMap;

const STRIPPED_EXTENSIONS: [&str; 2] = [".xlsx", ".json"];

/// A parsed `sourceId:dotted.path` key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeKey<'a> {
    /// The first colon segment, without a `.xlsx` or `.json` suffix.
    pub logical_id: &'a str,
    /// The last colon segment split on dots.
    pub path: Vec<&'a str>,
}

impl<'a> CompositeKey<'a> {
    /// Returns `None` for an empty key.
    ///
    /// Anything between the first and the last colon segment is ignored, so
    /// `file:scope:a.b` addresses `a.b` in `file`.
    pub fn parse(key: &'a str) -> Option<Self> {
        if key.is_empty() {
            return None;
        }

        let mut segments = key.split(':');
        let first = segments.next()?;
        let last = segments.next_back().unwrap_or(first);

        Some(Self {
            logical_id: strip_extension(first),
            path: last.split('.').collect(),
        })
    }
}

/// Whether `name` is usable as one path component under an output root:
/// not empty, not `.` or `..`, and free of path separators.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn strip_extension(id: &str) -> &str {
    STRIPPED_EXTENSIONS
        .iter()
        .find_map(|ext| id.strip_suffix(ext))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(id)
}

/// What [`apply_record`] did with a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Written,
    /// The key is empty or the record carries no value for this language.
    Skipped,
    /// The path runs through an existing non-object value, which is kept.
    Conflict,
}

/// Write one record into `tree`.
pub fn apply_record(tree: &mut TranslationTree, record: &FlatRecord, is_base: bool) -> Applied {
    let Some(key) = CompositeKey::parse(&record.key) else {
        return Applied::Skipped;
    };
    let Some(value) = record.value_for(is_base) else {
        return Applied::Skipped;
    };

    if tree.insert(key.path.as_slice(), value) {
        Applied::Written
    } else {
        Applied::Conflict
    }
}

/// Apply every record on top of `tree` and return how many were written.
/// Later records win on the same leaf.
pub fn apply_records<'r>(
    tree: &mut TranslationTree,
    records: impl IntoIterator<Item = &'r FlatRecord>,
    is_base: bool,
) -> usize {
    records
        .into_iter()
        .filter(|record| apply_record(tree, record, is_base) == Applied::Written)
        .count()
}

/// Build a fresh tree from records.
pub fn unflatten<'r>(records: impl IntoIterator<Item = &'r FlatRecord>, is_base: bool) -> TranslationTree {
    let mut tree = TranslationTree::new();
    apply_records(&mut tree, records, is_base);
    tree
}

/// Bucket records by the logical file named in their key.
///
/// Buckets keep first-seen order, and records within a bucket keep input
/// order, so records of one file do not need to be contiguous. Records with
/// an empty key are left out.
pub fn group_by_logical_id<'r>(
    records: impl IntoIterator<Item = &'r FlatRecord>,
) -> IndexMap<String, Vec<&'r FlatRecord>> {
    let mut groups: IndexMap<String, Vec<&FlatRecord>> = IndexMap::new();
    for record in records {
        if let Some(key) = CompositeKey::parse(&record.key) {
            groups
                .entry(key.logical_id.to_string())
                .or_default()
                .push(record);
        }
    }
    groups
}
