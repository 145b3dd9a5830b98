//! Column selection - user identifiers (index or name) → validated labels

use crate::error::{QuizgramError, QuizgramResult};
use tracing::debug;

/// A column picked by the user, with its position in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub index: usize,
    pub label: String,
}

/// Ordered, validated column selection (duplicates kept as given)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSelection {
    columns: Vec<ResolvedColumn>,
}

impl ColumnSelection {
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedColumn> {
        self.columns.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Resolve a single identifier.
///
/// Anything that parses as a base-10 integer is a zero-based index,
/// everything else is a literal column name.
pub fn resolve_column(identifier: &str, available: &[String]) -> QuizgramResult<ResolvedColumn> {
    if let Ok(index) = identifier.parse::<i64>() {
        let position = usize::try_from(index)
            .ok()
            .filter(|&i| i < available.len())
            .ok_or(QuizgramError::ColumnIndexOutOfRange {
                index,
                count: available.len(),
            })?;
        debug!(identifier, label = %available[position], "resolved column by index");
        return Ok(ResolvedColumn {
            index: position,
            label: available[position].clone(),
        });
    }

    match available.iter().position(|c| c == identifier) {
        Some(position) => {
            debug!(identifier, position, "resolved column by name");
            Ok(ResolvedColumn {
                index: position,
                label: identifier.to_string(),
            })
        }
        None => Err(QuizgramError::ColumnNotFound {
            name: identifier.to_string(),
            available: available.to_vec(),
        }),
    }
}

/// Resolve every identifier in order; the first failure aborts.
pub fn resolve_columns<S: AsRef<str>>(
    identifiers: &[S],
    available: &[String],
) -> QuizgramResult<ColumnSelection> {
    if identifiers.is_empty() {
        return Err(QuizgramError::Config(
            "At least one column (name or index) is required".to_string(),
        ));
    }

    let columns = identifiers
        .iter()
        .map(|id| resolve_column(id.as_ref(), available))
        .collect::<QuizgramResult<Vec<_>>>()?;

    Ok(ColumnSelection { columns })
}
