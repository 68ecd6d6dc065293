use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    /// The input directory does not exist.
    #[error("input directory not found: {0}")]
    MissingInputDirectory(PathBuf),

    /// The input directory holds nothing this conversion can read.
    #[error("nothing inside the input directory: {0}")]
    EmptyInputDirectory(PathBuf),

    /// A JSON document whose root is not an object.
    #[error("expected a JSON object at the root of {0}")]
    NotAnObject(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read workbook: {0}")]
    WorkbookRead(#[from] calamine::XlsxError),

    #[error("failed to write workbook: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),
}
