use crate::core::{
    CliError, ConfigInvalidError, ConfigNotFoundError, ConfigParseError, InvalidLanguageError,
};
use crate::utils::ui::{self, OutputKind};
use anyhow::{Context as _, Result};
use clap::Args;
use fs_err as fs;
use lingosheet::ConversionReport;
use lingosheet_toml::{FILE_NAME, SheetConfig, SheetConfigError};
use miette::NamedSource;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Arguments shared by both conversion commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Output directory (overrides the configuration file).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Language whose values fill the `English` column (overrides the configuration file).
    #[arg(long)]
    pub base_language: Option<String>,

    /// Path to a configuration file (defaults to ./lingosheet.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run in E2E testing mode (deterministic output).
    #[arg(long, hide = true)]
    pub e2e: bool,
}

impl CommonArgs {
    /// Load the configuration file and apply the command line overrides.
    pub fn resolve_config(&self) -> Result<SheetConfig, CliError> {
        let (config, path) = match &self.config {
            Some(path) => (SheetConfig::read_from_path(path), path.clone()),
            None => (SheetConfig::load_or_default(Path::new(".")), PathBuf::from(FILE_NAME)),
        };
        let config = config.map_err(|e| config_error(e, &path))?;

        let config = match &self.base_language {
            Some(language) => config
                .with_base_language(language)
                .map_err(|e| config_error(e, &path))?,
            None => config,
        };
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// The `--output` flag, or the configured directory.
    pub fn output_or(&self, configured: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| configured.to_path_buf())
    }
}

fn config_error(err: SheetConfigError, path: &Path) -> CliError {
    match err {
        SheetConfigError::NotFound => ConfigNotFoundError {
            expected_path: path.to_path_buf(),
        }
        .into(),
        SheetConfigError::ParseError(e) => match config_source(path) {
            Ok(source) => ConfigParseError {
                src: NamedSource::new(path.display().to_string(), source),
                span: e.span().map(Into::into),
                help: e.message().to_string(),
            }
            .into(),
            Err(read_err) => read_err.into(),
        },
        SheetConfigError::InvalidBaseLanguage { name, .. }
        | SheetConfigError::UnsupportedLanguageIdentifier { name, .. } => {
            InvalidLanguageError { identifier: name }.into()
        },
        other => ConfigInvalidError {
            message: other.to_string(),
        }
        .into(),
    }
}

fn config_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Print every generated file, every issue, and a one-line summary.
pub fn render_report(report: &ConversionReport, kind: OutputKind, duration: Duration) {
    for path in &report.generated {
        ui::print_generated(kind, path);
    }
    for issue in &report.issues {
        ui::print_issue(issue);
    }
    if report.generated.is_empty() {
        ui::print_nothing_generated();
    }
    ui::print_summary(
        report.generated.len(),
        report.warning_count(),
        report.error_count(),
        duration,
    );
}
