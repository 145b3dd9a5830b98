//==============================================================================
// Cell Values
//==============================================================================

/// A single cell as it arrives from the loader.
///
/// Spreadsheet exports mix text, numbers and blanks. Only `Text` can carry
/// diagram source; `Value` keeps the rendered form of numbers, booleans and
/// dates so they still work as respondent names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    Text(String),
    /// Non-text scalar (number, boolean, date), rendered
    Value(String),
    #[default]
    Missing,
}

impl Cell {
    /// Build a cell from a raw field, mapping the empty string to `Missing`
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(field.to_string())
        }
    }

    /// Textual content only; non-text values read as `None`
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Value(_) | Cell::Missing => None,
        }
    }

    /// Printable form of text and non-text values alike
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) | Cell::Value(s) => Some(s),
            Cell::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

//==============================================================================
// Table
//==============================================================================

/// Column-labelled rows loaded from a CSV or spreadsheet file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Label shown in document titles (usually the input file name)
    pub source: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(source: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            source: source.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with `Missing` and dropping
    /// cells beyond the header width.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Missing);
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of the first column with this label
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Cell at (row, column); out-of-range lookups read as `Missing`
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        const MISSING: &Cell = &Cell::Missing;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(MISSING)
    }
}
