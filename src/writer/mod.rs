//! Row iteration and per-respondent file output

use crate::config::{CollisionPolicy, PipelineConfig};
use crate::core::{assemble, resolve_columns, ColumnSelection, DocumentStyle, RespondentDocument, Sanitizer};
use crate::error::QuizgramResult;
use crate::loader::{load_table, LoadOptions};
use crate::report::Reporter;
use crate::types::Table;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Placeholder display name for rows without a usable name
pub fn placeholder_name(row: usize) -> String {
    format!("respondent_{}", row)
}

/// Longest file stem in bytes, leaving room for `_row<N>.md` under the
/// usual 255-byte file name limit
pub const MAX_STEM_BYTES: usize = 200;

/// Keep alphanumerics and spaces, cap the length on a char boundary, drop
/// trailing whitespace.
///
/// Lossy: "Jo! Smith" and "Jo Smith" both become "Jo Smith".
pub fn sanitize_file_stem(display_name: &str) -> String {
    let mut stem: String = display_name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();

    if stem.len() > MAX_STEM_BYTES {
        let mut end = MAX_STEM_BYTES;
        while !stem.is_char_boundary(end) {
            end -= 1;
        }
        stem.truncate(end);
    }

    stem.trim_end().to_string()
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub files: Vec<PathBuf>,
    /// Rows whose selected cells were all empty after cleaning
    pub skipped_rows: usize,
    pub collisions: usize,
}

/// Drives cleaning and assembly over every row of a table
pub struct RowWriter {
    sanitizer: Sanitizer,
    style: DocumentStyle,
    name_column: String,
    on_collision: CollisionPolicy,
}

impl RowWriter {
    pub fn new(config: &PipelineConfig) -> QuizgramResult<Self> {
        config.validate()?;

        let keyword = config.diagram_type.trim();
        let sanitizer = if config.strip_type_keyword {
            Sanitizer::new(Some(keyword))?
        } else {
            Sanitizer::new(None)?
        };

        let style = DocumentStyle {
            diagram_header: config.strip_type_keyword.then(|| keyword.to_string()),
            render_url: config.render_links.then(|| config.render_url.clone()),
            headings: config.multi_question_mode,
        };

        Ok(Self {
            sanitizer,
            style,
            name_column: config.name_column.clone(),
            on_collision: config.on_collision,
        })
    }

    /// Display name for a row: the name column when it has text, else a
    /// positional placeholder.
    pub fn display_name(&self, table: &Table, row: usize) -> String {
        table
            .column_index(&self.name_column)
            .and_then(|col| table.cell(row, col).display_text())
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_name(row))
    }

    /// Clean the selected cells of one row and assemble its document
    pub fn document_for_row(
        &self,
        table: &Table,
        selection: &ColumnSelection,
        row: usize,
    ) -> RespondentDocument {
        let questions: Vec<(&str, String)> = selection
            .iter()
            .map(|col| {
                (
                    col.label.as_str(),
                    self.sanitizer.clean_cell(table.cell(row, col.index)),
                )
            })
            .collect();

        assemble(&table.source, &self.display_name(table, row), &questions, &self.style)
    }

    /// Write one `.md` file per respondent with content.
    ///
    /// `output_dir` must already exist.
    pub fn write_all(
        &self,
        table: &Table,
        selection: &ColumnSelection,
        output_dir: &Path,
        reporter: &mut dyn Reporter,
    ) -> QuizgramResult<RunSummary> {
        let mut summary = RunSummary {
            rows: table.row_count(),
            ..Default::default()
        };
        let mut used_stems: HashSet<String> = HashSet::new();

        for row in 0..table.row_count() {
            let document = self.document_for_row(table, selection, row);
            if !document.has_content() {
                debug!(row, respondent = %document.respondent, "no diagram content, skipping");
                summary.skipped_rows += 1;
                continue;
            }

            let mut stem = sanitize_file_stem(&document.respondent);
            if stem.is_empty() {
                stem = placeholder_name(row);
            }

            // Case-insensitive filesystems treat "Ada" and "ada" as one file
            if !used_stems.insert(stem.to_lowercase()) {
                summary.collisions += 1;
                if self.on_collision == CollisionPolicy::Suffix {
                    stem = format!("{}_row{}", stem, row);
                    used_stems.insert(stem.to_lowercase());
                }
                let path = output_dir.join(format!("{}.md", stem));
                warn!(row, respondent = %document.respondent, path = %path.display(), "file name collision");
                reporter.name_collision(&document.respondent, &path);
            }

            let path = output_dir.join(format!("{}.md", stem));
            fs::write(&path, document.into_text())?;
            reporter.file_written(&path);
            summary.files.push(path);
        }

        reporter.finished(summary.files.len(), summary.rows);
        Ok(summary)
    }
}

/// Everything a single extraction run needs
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub input: PathBuf,
    pub columns: Vec<String>,
    pub output_dir: PathBuf,
    pub load: LoadOptions,
    pub config: PipelineConfig,
}

/// Load, resolve, then write.
///
/// Every validation error surfaces before the output directory is created,
/// so a failed run leaves nothing behind.
pub fn run(request: &ExtractRequest, reporter: &mut dyn Reporter) -> QuizgramResult<RunSummary> {
    let writer = RowWriter::new(&request.config)?;
    let table = load_table(&request.input, &request.load)?;
    let selection = resolve_columns(&request.columns, table.columns())?;
    info!(columns = ?selection.labels(), "resolved columns");

    fs::create_dir_all(&request.output_dir)?;
    writer.write_all(&table, &selection, &request.output_dir, reporter)
}
