//! CLI command implementations.

mod common;
mod to_json;
mod to_sheets;

pub use common::{CommonArgs, render_report};
pub use to_json::{ToJsonArgs, run_to_json};
pub use to_sheets::{ToSheetsArgs, run_to_sheets};
