use clap::{Parser, Subcommand};
use lingosheet_cli::commands::{ToJsonArgs, ToSheetsArgs, run_to_json, run_to_sheets};
use miette::Result as MietteResult;

#[derive(Parser)]
#[command(name = "lingosheet")]
#[command(about = "Convert JSON translation files to xlsx workbooks and back")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build workbooks from JSON translation files
    ToSheets(ToSheetsArgs),

    /// Write JSON translation files from workbooks
    ToJson(ToJsonArgs),
}

fn main() -> MietteResult<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    lingosheet_cli::utils::ui::init_logging();

    let result = match cli.command {
        Commands::ToSheets(args) => run_to_sheets(args),
        Commands::ToJson(args) => run_to_json(args),
    };

    result.map_err(miette::Report::new)
}
