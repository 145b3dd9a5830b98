use std::path::PathBuf;
use thiserror::Error;

pub type QuizgramResult<T> = Result<T, QuizgramError>;

#[derive(Error, Debug)]
pub enum QuizgramError {
    #[error("The specified input file was not found at {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Column index {index} is out of bounds. The file has {count} columns.")]
    ColumnIndexOutOfRange { index: i64, count: usize },

    #[error("Column '{name}' not found in the input file. Available columns are: {}", available.join(", "))]
    ColumnNotFound { name: String, available: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet parsing error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuizgramError {
    /// True for errors raised while validating user input before any output
    /// is produced (missing input, bad column selection).
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            QuizgramError::InputNotFound { .. }
                | QuizgramError::ColumnIndexOutOfRange { .. }
                | QuizgramError::ColumnNotFound { .. }
        )
    }
}
