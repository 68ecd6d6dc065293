#![doc = include_str!("../README.md")]

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// Name of the configuration file looked up in the working directory.
pub const FILE_NAME: &str = "lingosheet.toml";

#[derive(Debug, Error)]
pub enum SheetConfigError {
    /// Configuration file not found.
    #[error("{} configuration file not found", FILE_NAME)]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The base language is not a valid language identifier.
    #[error("Invalid base language identifier '{name}'")]
    InvalidBaseLanguage {
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// The base language uses an unsupported subtag combination.
    #[error("Language identifier '{name}' is not supported: {reason}")]
    UnsupportedLanguageIdentifier { name: String, reason: String },
    /// The indentation width is outside the accepted range.
    #[error("Indent must be between 0 and {max}, got {value}")]
    InvalidIndent { value: usize, max: usize },
}

/// The configuration for `lingosheet`.
///
/// Every field is optional in the file:
///
/// ```toml
/// base_language = "en"
/// json_output_dir = "excel_output"
/// sheets_output_dir = "json_output"
/// merge_file_stem = "_merge"
/// indent = 4
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Language whose values fill the `English` column.
    pub base_language: String,
    /// Where workbook → JSON conversion writes `<language>/<file>.json`.
    pub json_output_dir: PathBuf,
    /// Where JSON → workbook conversion writes the `.xlsx` files.
    pub sheets_output_dir: PathBuf,
    /// File stem of the aggregate workbook.
    pub merge_file_stem: String,
    /// Spaces per indentation level of written JSON.
    pub indent: usize,
}

const MAX_INDENT: usize = 16;

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_language: "en".to_string(),
            json_output_dir: PathBuf::from("excel_output"),
            sheets_output_dir: PathBuf::from("json_output"),
            merge_file_stem: "_merge".to_string(),
            indent: 4,
        }
    }
}

impl SheetConfig {
    /// Reads and validates the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SheetConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SheetConfigError::NotFound);
        }

        let content = fs::read_to_string(path)?;
        let config: SheetConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Reads `lingosheet.toml` from `dir`, or returns the defaults when there is none.
    pub fn load_or_default(dir: &Path) -> Result<Self, SheetConfigError> {
        match Self::read_from_path(dir.join(FILE_NAME)) {
            Err(SheetConfigError::NotFound) => Ok(Self::default()),
            other => other,
        }
    }

    /// Checks the values that serde cannot.
    pub fn validate(&self) -> Result<(), SheetConfigError> {
        self.base_language_identifier()?;
        if self.indent > MAX_INDENT {
            return Err(SheetConfigError::InvalidIndent {
                value: self.indent,
                max: MAX_INDENT,
            });
        }
        Ok(())
    }

    /// Returns the configured base language as a `LanguageIdentifier`.
    pub fn base_language_identifier(&self) -> Result<LanguageIdentifier, SheetConfigError> {
        parse_language(&self.base_language)
    }

    /// Replaces the base language, validating it first.
    pub fn with_base_language(mut self, language: &str) -> Result<Self, SheetConfigError> {
        parse_language(language)?;
        self.base_language = language.to_string();
        Ok(self)
    }
}

/// Parse a language identifier, rejecting variant subtags.
pub fn parse_language(name: &str) -> Result<LanguageIdentifier, SheetConfigError> {
    let lang = name
        .parse::<LanguageIdentifier>()
        .map_err(|source| SheetConfigError::InvalidBaseLanguage {
            name: name.to_string(),
            source,
        })?;

    if lang.variants().next().is_some() {
        return Err(SheetConfigError::UnsupportedLanguageIdentifier {
            name: name.to_string(),
            reason: "variants are not supported".to_string(),
        });
    }

    Ok(lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_from_path_success() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(FILE_NAME);

        let config_content = r#"
base_language = "zh-Hans"
json_output_dir = "locales_out"
indent = 2
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = SheetConfig::read_from_path(&config_path).unwrap();
        assert_eq!(config.base_language, "zh-Hans");
        assert_eq!(config.json_output_dir, PathBuf::from("locales_out"));
        assert_eq!(config.sheets_output_dir, PathBuf::from("json_output"));
        assert_eq!(config.merge_file_stem, "_merge");
        assert_eq!(config.indent, 2);
    }

    #[test]
    fn test_read_from_path_file_not_found() {
        let result = SheetConfig::read_from_path("/non/existent/path/lingosheet.toml");
        assert!(matches!(result, Err(SheetConfigError::NotFound)));
    }

    #[test]
    fn test_read_from_path_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(FILE_NAME);

        fs::write(&config_path, "base_language = \"en\"\nunknown_field = 1\n").unwrap();

        let result = SheetConfig::read_from_path(&config_path);
        assert!(matches!(result, Err(SheetConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp_dir = TempDir::new().unwrap();

        let config = SheetConfig::load_or_default(temp_dir.path()).unwrap();

        assert_eq!(config, SheetConfig::default());
    }

    #[test]
    fn test_load_or_default_rejects_bad_indent() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(FILE_NAME), "indent = 40\n").unwrap();

        let result = SheetConfig::load_or_default(temp_dir.path());

        assert!(matches!(
            result,
            Err(SheetConfigError::InvalidIndent { value: 40, .. })
        ));
    }

    #[rstest]
    #[case("en")]
    #[case("en-US")]
    #[case("zh-Hans")]
    #[case("pt-BR")]
    fn test_parse_language_accepts(#[case] name: &str) {
        assert_eq!(parse_language(name).unwrap().to_string(), name);
    }

    #[test]
    fn test_parse_language_invalid() {
        let result = parse_language("invalid-lang!");

        assert!(matches!(
            result,
            Err(SheetConfigError::InvalidBaseLanguage { name, .. }) if name == "invalid-lang!"
        ));
    }

    #[test]
    fn test_parse_language_rejects_variants() {
        let result = parse_language("de-DE-1901");

        assert!(matches!(
            result,
            Err(SheetConfigError::UnsupportedLanguageIdentifier { .. })
        ));
    }

    #[test]
    fn test_with_base_language_overrides() {
        let config = SheetConfig::default().with_base_language("fr").unwrap();
        assert_eq!(config.base_language, "fr");

        assert!(SheetConfig::default().with_base_language("!!").is_err());
    }
}
