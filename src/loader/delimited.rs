//! Delimited text importer - CSV/TSV → Table

use crate::error::QuizgramResult;
use crate::types::{Cell, Table};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};

pub struct CsvImporter {
    path: PathBuf,
    delimiter: u8,
}

impl CsvImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read the whole file. The first record is the header; ragged rows are
    /// padded with `Missing`. Field values are kept verbatim.
    pub fn import(&self, source: &str) -> QuizgramResult<Table> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(&self.path)?;

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_matches('\u{feff}').to_string())
            .collect();

        let mut table = Table::new(source, columns);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(Cell::from_field).collect());
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_import_basic() {
        let file = write_temp("Name,Q1\nAda,\"A --&gt; B\"\nBob,\n");
        let table = CsvImporter::new(file.path()).import("quiz.csv").unwrap();

        assert_eq!(table.columns(), ["Name", "Q1"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 1).as_text(), Some("A --&gt; B"));
        assert!(table.cell(1, 1).is_missing());
        assert_eq!(table.source, "quiz.csv");
    }

    #[test]
    fn test_import_strips_bom_from_header() {
        let file = write_temp("\u{feff}Name,Q1\nAda,x\n");
        let table = CsvImporter::new(file.path()).import("quiz.csv").unwrap();
        assert_eq!(table.columns()[0], "Name");
    }

    #[test]
    fn test_import_multiline_quoted_field() {
        let file = write_temp("Name,Q1\nAda,\"```mermaid\nA --> B\n```\"\n");
        let table = CsvImporter::new(file.path()).import("quiz.csv").unwrap();
        assert_eq!(table.cell(0, 1).as_text(), Some("```mermaid\nA --> B\n```"));
    }

    #[test]
    fn test_import_ragged_rows() {
        let file = write_temp("Name,Q1,Q2\nAda\nBob,a,b,c\n");
        let table = CsvImporter::new(file.path()).import("quiz.csv").unwrap();
        assert!(table.cell(0, 2).is_missing());
        assert_eq!(table.cell(1, 2).as_text(), Some("b"));
    }

    #[test]
    fn test_import_tab_delimited() {
        let file = write_temp("Name\tQ1\nAda\tA-->B\n");
        let table = CsvImporter::new(file.path())
            .with_delimiter(b'\t')
            .import("quiz.tsv")
            .unwrap();
        assert_eq!(table.cell(0, 1).as_text(), Some("A-->B"));
    }
}
