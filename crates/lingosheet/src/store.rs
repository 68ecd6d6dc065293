//! Lookup of previously translated files that a conversion merges into.

use crate::report::Issue;
use crate::tree::TranslationTree;
use std::path::{Path, PathBuf};

/// Where a group's tree starts from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    /// No locale store is configured: start from nothing.
    Fresh,
    /// The store has no directory for this language yet: start from nothing.
    NewLanguage,
    /// The store holds a file for this group: merge on top of it.
    Existing(TranslationTree),
}

impl Seed {
    pub fn into_tree(self) -> TranslationTree {
        match self {
            Seed::Fresh | Seed::NewLanguage => TranslationTree::new(),
            Seed::Existing(tree) => tree,
        }
    }
}

/// Directory tree of existing `<language>/<logical_id>.json` files.
#[derive(Clone, Debug, Default)]
pub struct LocaleStore {
    root: Option<PathBuf>,
}

impl LocaleStore {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Decide how the tree for a group starts.
    ///
    /// An `Err` means the group must not be written: its language exists in the
    /// store but the file is missing, or the file does not parse.
    pub fn seed(&self, language: &str, logical_id: &str) -> Result<Seed, Issue> {
        let Some(root) = self.root() else {
            return Ok(Seed::Fresh);
        };
        let language_dir = root.join(language);
        if !language_dir.is_dir() {
            tracing::debug!(language, "no locale directory, treating as a new language");
            return Ok(Seed::NewLanguage);
        }

        let path = language_dir.join(format!("{logical_id}.json"));
        if !path.is_file() {
            return Err(Issue::MissingLocaleFile { path });
        }

        match TranslationTree::load(&path) {
            Ok(tree) => Ok(Seed::Existing(tree)),
            Err(e) => Err(Issue::InvalidLocaleFile {
                path,
                message: e.to_string(),
            }),
        }
    }
}
