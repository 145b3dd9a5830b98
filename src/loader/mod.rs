//! Table loading from CSV and spreadsheet exports
//!
//! Spreadsheet extensions go through calamine, everything else is read as
//! delimited text.

mod delimited;
mod excel;

pub use delimited::CsvImporter;
pub use excel::ExcelImporter;

use crate::error::{QuizgramError, QuizgramResult};
use crate::types::Table;
use std::path::Path;
use tracing::info;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loader options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub sheet: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            sheet: None,
        }
    }
}

pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SPREADSHEET_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Load the whole input table into memory.
///
/// A path that does not resolve is reported as `InputNotFound` rather than a
/// generic IO error.
pub fn load_table(path: &Path, options: &LoadOptions) -> QuizgramResult<Table> {
    if !path.is_file() {
        return Err(QuizgramError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let table = if is_spreadsheet(path) {
        ExcelImporter::new(path)
            .with_sheet(options.sheet.clone())
            .import(&source)?
    } else {
        CsvImporter::new(path)
            .with_delimiter(options.delimiter)
            .import(&source)?
    };

    info!(
        source = %table.source,
        columns = table.column_count(),
        rows = table.row_count(),
        "loaded table"
    );
    Ok(table)
}
