//! `lingosheet to-sheets`: JSON translation files to workbooks.

use crate::commands::{CommonArgs, render_report};
use crate::core::CliError;
use crate::utils::ui::{self, OutputKind};
use clap::Parser;
use lingosheet::{ToWorkbookOptions, json_to_workbooks};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the to-sheets command.
#[derive(Debug, Parser)]
pub struct ToSheetsArgs {
    /// Directory of base language `.json` files, or of `<language>/` directories holding them.
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run the to-sheets command.
pub fn run_to_sheets(args: ToSheetsArgs) -> Result<(), CliError> {
    ui::set_e2e_mode(args.common.e2e);
    let config = args.common.resolve_config()?;

    let mut options = ToWorkbookOptions::new(
        args.input,
        args.common.output_or(&config.sheets_output_dir),
    );
    options.base_language = config.base_language;
    options.merge_stem = config.merge_file_stem;

    ui::print_generating(false);
    let start = Instant::now();
    let pb = ui::create_spinner("Building workbooks...");
    let result = json_to_workbooks(&options);
    pb.finish_and_clear();

    let report = result?;
    render_report(&report, OutputKind::Workbook, start.elapsed());
    Ok(())
}
