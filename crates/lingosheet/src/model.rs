//! The flat record model shared by both conversion directions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Header of the composite key column.
pub const KEY_HEADER: &str = "Key";
/// Header of the base language reference column.
pub const ENGLISH_HEADER: &str = "English";
/// Header of the translated value column.
pub const TRANSLATION_HEADER: &str = "Translation";

/// Language whose values fill the `English` column unless configured otherwise.
pub const DEFAULT_BASE_LANGUAGE: &str = "en";
/// File stem of the aggregate workbook.
pub const DEFAULT_MERGE_STEM: &str = "_merge";

/// One spreadsheet row: `sourceId:dotted.path` plus its values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlatRecord {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl FlatRecord {
    /// A base language row, which has no translation column.
    pub fn base(key: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            english: Some(english.into()),
            translation: None,
        }
    }

    /// A translated row. `english` is absent when the base tree lacks the path.
    pub fn translated(
        key: impl Into<String>,
        english: Option<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            english,
            translation: Some(translation.into()),
        }
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    /// The value that lands in the JSON tree: `English` for the base language,
    /// `Translation` for every other one. Empty values count as absent.
    pub fn value_for(&self, is_base: bool) -> Option<&str> {
        let value = if is_base {
            self.english.as_deref()
        } else {
            self.translation.as_deref()
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Records of one (logical file, language) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetGroup {
    pub logical_id: String,
    pub language: String,
    pub records: Vec<FlatRecord>,
}

impl SheetGroup {
    pub fn new(logical_id: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            language: language.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(mut self, records: Vec<FlatRecord>) -> Self {
        self.records = records;
        self
    }
}

/// Which languages exist for each logical file.
///
/// The base language is always listed first so that its tree is available
/// before any other language of the same file is flattened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeConfig {
    base_language: String,
    files: IndexMap<String, Vec<String>>,
}

impl MergeConfig {
    pub fn new(base_language: impl Into<String>) -> Self {
        Self {
            base_language: base_language.into(),
            files: IndexMap::new(),
        }
    }

    pub fn base_language(&self) -> &str {
        &self.base_language
    }

    /// Register `language` for `logical_id`. Duplicates are ignored.
    pub fn add(&mut self, logical_id: &str, language: &str) {
        let languages = self.files.entry(logical_id.to_string()).or_default();
        if languages.iter().any(|l| l == language) {
            return;
        }
        if language == self.base_language {
            languages.insert(0, language.to_string());
        } else {
            languages.push(language.to_string());
        }
    }

    pub fn languages_of(&self, logical_id: &str) -> &[String] {
        self.files.get(logical_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.files.iter().map(|(id, langs)| (id.as_str(), langs.as_slice()))
    }

    /// Every language across all files, base first, then first-seen order.
    pub fn languages(&self) -> Vec<String> {
        let mut all: Vec<String> = Vec::new();
        for languages in self.files.values() {
            for language in languages {
                if !all.contains(language) {
                    all.push(language.clone());
                }
            }
        }
        if let Some(pos) = all.iter().position(|l| *l == self.base_language) {
            let base = all.remove(pos);
            all.insert(0, base);
        }
        all
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}
