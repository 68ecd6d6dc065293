// CLI output formatting with consistent styling using indicatif and colored.
// Console output goes through println!/eprintln!; tracing is reserved for diagnostics.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use lingosheet::{Issue, Severity};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding the log filter, e.g. `LINGOSHEET_LOG=lingosheet=debug`.
pub const LOG_ENV: &str = "LINGOSHEET_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, fixed durations, hidden spinners).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

fn format_duration(duration: Duration) -> String {
    if is_e2e() {
        "[DURATION]".to_string()
    } else {
        // Millisecond precision is plenty for a console summary.
        let rounded = Duration::from_secs(duration.as_secs())
            + Duration::from_millis(u64::from(duration.subsec_millis()));
        humantime::format_duration(rounded).to_string()
    }
}

/// Install a stderr subscriber filtered by `LINGOSHEET_LOG`. Logging is off when unset.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

/// What a command produces, used to word the per-file line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    Workbook,
    Json,
}

pub fn print_generating(merge: bool) {
    if merge {
        println!("{}", "Generating file... (w/ merge option)".dimmed());
    } else {
        println!("{}", "Generating file...".dimmed());
    }
}

pub fn print_generated(kind: OutputKind, path: &Path) {
    let label = match kind {
        OutputKind::Workbook => "Excel file generated.",
        OutputKind::Json => "Translated json file generated.",
    };
    println!("{} --> {}", label.green(), path.display());
}

pub fn print_issue(issue: &Issue) {
    match issue.severity() {
        Severity::Warning => eprintln!("{}", issue.to_string().yellow()),
        Severity::Error => eprintln!("{}", issue.to_string().red()),
    }
}

pub fn print_nothing_generated() {
    println!("{}", "No files were generated.".yellow());
}

pub fn print_summary(generated: usize, warnings: usize, errors: usize, duration: Duration) {
    let done = if errors > 0 {
        "Done with errors:".red()
    } else if warnings > 0 {
        "Done:".yellow()
    } else {
        "Done:".green()
    };
    println!(
        "{} {} file(s) generated, {} warning(s), {} error(s) in {}",
        done,
        generated,
        warnings,
        errors,
        format_duration(duration).green()
    );
}

pub fn print_locales_not_found(path: &Path) {
    eprintln!(
        "{} {}",
        "Locale directory not found, every language is treated as new:".yellow(),
        path.display()
    );
}
