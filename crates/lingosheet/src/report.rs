//! Non-fatal conditions collected while converting.

use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// Something that went wrong for one row, group or file without stopping the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Issue {
    /// A spreadsheet row without a `Key` cell. The row is skipped.
    MissingKey {
        workbook: String,
        sheet: String,
        /// 1-based position among the data rows of the sheet.
        row: usize,
    },
    /// A language (sheet name) or logical file id that is not a plain file
    /// name, such as `..` or `a/b`. Nothing is written for it.
    UnsafeName {
        workbook: String,
        sheet: String,
        name: String,
    },
    /// A row whose path runs through an existing non-object value. The
    /// existing value is kept and the row is skipped.
    ConflictingPath { path: PathBuf, key: String },
    /// The language directory exists in the locale store but the file does
    /// not. Nothing is written for the group.
    MissingLocaleFile { path: PathBuf },
    /// The existing locale file could not be parsed. Nothing is written for
    /// the group.
    InvalidLocaleFile { path: PathBuf, message: String },
    /// An input JSON file or workbook could not be read.
    InvalidSource { path: PathBuf, message: String },
    /// An output file could not be written.
    WriteFailed { path: PathBuf, message: String },
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingKey { .. } | Issue::ConflictingPath { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    fn sort_key(&self) -> (u8, String) {
        match self {
            Issue::MissingKey { workbook, sheet, row } => {
                (0, format!("{workbook}/{sheet}/{row:08}"))
            },
            Issue::ConflictingPath { path, key } => (1, format!("{}/{key}", path.display())),
            Issue::UnsafeName { workbook, sheet, name } => (2, format!("{workbook}/{sheet}/{name}")),
            Issue::MissingLocaleFile { path } => (3, path.display().to_string()),
            Issue::InvalidLocaleFile { path, .. } => (4, path.display().to_string()),
            Issue::InvalidSource { path, .. } => (5, path.display().to_string()),
            Issue::WriteFailed { path, .. } => (6, path.display().to_string()),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingKey { workbook, sheet, row } => {
                write!(f, "Missing key in excel sheet. --> {workbook} [{sheet}] row {row}")
            },
            Issue::UnsafeName { workbook, sheet, name } => {
                write!(f, "Unsafe file or language name. --> {workbook} [{sheet}] {name:?}")
            },
            Issue::ConflictingPath { path, key } => {
                write!(f, "Existing value kept, key skipped. --> {key} ({})", path.display())
            },
            Issue::MissingLocaleFile { path } => {
                write!(f, "File not exist. --> {}", path.display())
            },
            Issue::InvalidLocaleFile { path, message } => {
                write!(f, "Invalid locale file. --> {} ({message})", path.display())
            },
            Issue::InvalidSource { path, message } => {
                write!(f, "Unreadable input. --> {} ({message})", path.display())
            },
            Issue::WriteFailed { path, message } => {
                write!(f, "Failed to write. --> {} ({message})", path.display())
            },
        }
    }
}

/// Files produced by a conversion, plus everything that was skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub generated: Vec<PathBuf>,
    pub issues: Vec<Issue>,
}

impl ConversionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generated(&mut self, path: PathBuf) {
        tracing::debug!(path = %path.display(), "generated");
        self.generated.push(path);
    }

    pub fn issue(&mut self, issue: Issue) {
        tracing::warn!("{issue}");
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: ConversionReport) {
        self.generated.extend(other.generated);
        self.issues.extend(other.issues);
    }

    /// Order paths and issues so output does not depend on scheduling.
    pub fn sort(&mut self) {
        self.generated.sort();
        self.issues.sort_by_key(Issue::sort_key);
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity() == Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.issues.len() - self.warning_count()
    }
}
