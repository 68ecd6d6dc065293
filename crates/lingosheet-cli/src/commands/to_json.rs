//! `lingosheet to-json`: workbooks back to JSON translation files.

use crate::commands::{CommonArgs, render_report};
use crate::core::CliError;
use crate::utils::ui::{self, OutputKind};
use clap::Parser;
use lingosheet::{ToJsonOptions, workbooks_to_json};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the to-json command.
#[derive(Debug, Parser)]
pub struct ToJsonArgs {
    /// Directory holding the `.xlsx` workbooks.
    pub input: PathBuf,

    /// Existing `<language>/<file>.json` translations to merge the rows into.
    pub locales: Option<PathBuf>,

    /// Read only the aggregate workbook; each row's key prefix picks its file.
    #[arg(short, long)]
    pub merge: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run the to-json command.
pub fn run_to_json(args: ToJsonArgs) -> Result<(), CliError> {
    ui::set_e2e_mode(args.common.e2e);
    let config = args.common.resolve_config()?;

    if let Some(locales) = &args.locales
        && !locales.is_dir()
    {
        ui::print_locales_not_found(locales);
    }

    let mut options = ToJsonOptions::new(args.input, args.common.output_or(&config.json_output_dir))
        .with_locales(args.locales)
        .with_merge(args.merge);
    options.base_language = config.base_language;
    options.merge_stem = config.merge_file_stem;
    options.indent = config.indent;

    ui::print_generating(args.merge);
    let start = Instant::now();
    let pb = ui::create_spinner("Writing translations...");
    let result = workbooks_to_json(&options);
    pb.finish_and_clear();

    let report = result?;
    render_report(&report, OutputKind::Json, start.elapsed());
    Ok(())
}
