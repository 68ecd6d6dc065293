//! CLI error types rendered as miette diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use lingosheet::SheetError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Error when the input directory does not exist.
#[derive(Debug, Diagnostic, Error)]
#[error("input directory not found: {}", .path.display())]
#[diagnostic(
    code(lingosheet::input::not_found),
    help("Pass an existing directory as the first argument")
)]
pub struct InputNotFoundError {
    pub path: PathBuf,
}

/// Error when the input directory has nothing to convert.
#[derive(Debug, Diagnostic, Error)]
#[error("no files to convert in {}", .path.display())]
#[diagnostic(code(lingosheet::input::empty))]
pub struct EmptyInputError {
    pub path: PathBuf,

    /// What the command expected to find.
    #[help]
    pub help: String,
}

/// Error when an explicitly given configuration file does not exist.
#[derive(Debug, Diagnostic, Error)]
#[error("configuration file not found: {}", .expected_path.display())]
#[diagnostic(
    code(lingosheet::config::not_found),
    help("Drop --config to use the defaults, or create the file")
)]
pub struct ConfigNotFoundError {
    pub expected_path: PathBuf,
}

/// Error when parsing the lingosheet.toml configuration file.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse lingosheet.toml configuration")]
#[diagnostic(code(lingosheet::config::parse_error))]
pub struct ConfigParseError {
    /// The source content of the config file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The span where the error occurred.
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// The underlying parse error message.
    #[help]
    pub help: String,
}

/// Error when the base language is not a usable language identifier.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid language identifier: {identifier}")]
#[diagnostic(
    code(lingosheet::config::invalid_language),
    help("Use a valid BCP 47 language tag without variants (e.g., 'en', 'en-US', 'zh-Hans')")
)]
pub struct InvalidLanguageError {
    pub identifier: String,
}

/// Any other configuration value that was rejected.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid configuration: {message}")]
#[diagnostic(code(lingosheet::config::invalid))]
pub struct ConfigInvalidError {
    pub message: String,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    InputNotFound(#[from] InputNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    EmptyInput(#[from] EmptyInputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidLanguage(#[from] InvalidLanguageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigInvalid(#[from] ConfigInvalidError),

    #[error("conversion failed: {0}")]
    #[diagnostic(code(lingosheet::conversion))]
    Conversion(SheetError),

    #[error("IO error: {0}")]
    #[diagnostic(code(lingosheet::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(lingosheet::other))]
    Other(String),
}

impl From<SheetError> for CliError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::MissingInputDirectory(path) => InputNotFoundError { path }.into(),
            SheetError::EmptyInputDirectory(path) => EmptyInputError {
                path,
                help: "to-sheets reads .json files, to-json reads .xlsx files".to_string(),
            }
            .into(),
            other => CliError::Conversion(other),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic as _;

    #[test]
    fn test_missing_input_maps_to_not_found_code() {
        let err = CliError::from(SheetError::MissingInputDirectory(PathBuf::from("locales")));

        assert!(matches!(err, CliError::InputNotFound(_)));
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("lingosheet::input::not_found")
        );
        assert_eq!(err.to_string(), "input directory not found: locales");
    }

    #[test]
    fn test_empty_input_maps_to_empty_code() {
        let err = CliError::from(SheetError::EmptyInputDirectory(PathBuf::from("sheets")));

        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("lingosheet::input::empty")
        );
    }

    #[test]
    fn test_other_sheet_errors_are_conversion_failures() {
        let err = CliError::from(SheetError::NotAnObject("a.json".to_string()));

        assert!(matches!(err, CliError::Conversion(_)));
    }
}
