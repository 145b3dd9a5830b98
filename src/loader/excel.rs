//! Spreadsheet importer - .xlsx/.xlsm/.xls/.ods → Table

use crate::error::{QuizgramError, QuizgramResult};
use crate::types::{Cell, Table};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads one worksheet of a workbook into a `Table`.
///
/// The first row is the header; every following row is a respondent.
pub struct ExcelImporter {
    path: PathBuf,
    sheet: Option<String>,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet: None,
        }
    }

    /// Read this worksheet instead of the first one
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn import(&self, source: &str) -> QuizgramResult<Table> {
        let mut workbook = open_workbook_auto(&self.path)?;
        let sheet_names = workbook.sheet_names().to_vec();

        let sheet_name = match &self.sheet {
            Some(name) if sheet_names.contains(name) => name.clone(),
            Some(name) => {
                return Err(QuizgramError::Config(format!(
                    "Worksheet '{}' not found. Available worksheets: {}",
                    name,
                    sheet_names.join(", ")
                )))
            }
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| QuizgramError::Config("Workbook has no worksheets".to_string()))?,
        };

        debug!(sheet = %sheet_name, path = %self.path.display(), "reading worksheet");
        let range = workbook.worksheet_range(&sheet_name)?;
        Ok(self.range_to_table(source, &range))
    }

    fn range_to_table(&self, source: &str, range: &Range<Data>) -> Table {
        let mut rows = range.rows();

        // Header row; unlabeled headers get a positional name
        let columns: Vec<String> = match rows.next() {
            Some(header) => header
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Data::Empty => format!("col_{}", col),
                    other => other.to_string(),
                })
                .collect(),
            None => Vec::new(),
        };

        let mut table = Table::new(source, columns);
        for row in rows {
            table.push_row(row.iter().map(convert_cell).collect());
        }
        table
    }
}

/// Map a calamine cell to a `Cell`; blanks and error cells carry no content,
/// numbers, booleans and dates are non-text values
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Missing,
        Data::String(s) => Cell::from_field(s),
        other => Cell::Value(other.to_string()),
    }
}
