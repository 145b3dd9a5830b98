//! Core pipeline: cell cleaning, column selection and document assembly

pub mod columns;
pub mod document;
pub mod entities;
pub mod sanitizer;

pub use columns::{resolve_columns, ColumnSelection, ResolvedColumn};
pub use document::{assemble, DocumentStyle, RespondentDocument};
pub use entities::EntityDecoder;
pub use sanitizer::Sanitizer;
