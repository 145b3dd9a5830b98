//! Quizgram - Mermaid diagram extraction from quiz exports
//!
//! Quiz and survey platforms export free-text answers with HTML escaping and
//! markup mixed in. This library cleans the MermaidJS source found in the
//! selected columns and writes one Markdown file per respondent.
//!
//! # Example
//!
//! ```no_run
//! use royalbit_quizgram::config::PipelineConfig;
//! use royalbit_quizgram::loader::LoadOptions;
//! use royalbit_quizgram::report::MemoryReporter;
//! use royalbit_quizgram::writer::{run, ExtractRequest};
//! use std::path::PathBuf;
//!
//! let request = ExtractRequest {
//!     input: PathBuf::from("quiz_export.csv"),
//!     columns: vec!["Q3".to_string(), "5".to_string()],
//!     output_dir: PathBuf::from("mermaid_diagrams"),
//!     load: LoadOptions::default(),
//!     config: PipelineConfig::default(),
//! };
//!
//! let mut reporter = MemoryReporter::default();
//! let summary = run(&request, &mut reporter)?;
//! println!("Wrote {} files", summary.files.len());
//! # Ok::<(), royalbit_quizgram::error::QuizgramError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod report;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::{CollisionPolicy, PipelineConfig};
pub use error::{QuizgramError, QuizgramResult};
pub use types::{Cell, Table};
