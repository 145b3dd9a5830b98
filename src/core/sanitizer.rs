//! Cell text cleaning - HTML-escaped Mermaid source → plain diagram text

use super::entities::EntityDecoder;
use crate::error::{QuizgramError, QuizgramResult};
use crate::types::Cell;
use regex::{Regex, RegexBuilder};

/// Cleans raw cell values into Mermaid source text.
///
/// Steps run in a fixed order because each pattern assumes the previous
/// normalization already happened:
/// 1. decode HTML character references
/// 2. `<br>` variants → newline
/// 3. strip remaining tags
/// 4. strip "```mermaid" and "```" fences
/// 5. strip the diagram keyword (optional)
/// 6. trim
#[derive(Debug, Clone)]
pub struct Sanitizer {
    entities: EntityDecoder,
    line_break: Regex,
    tag: Regex,
    keyword: Option<Regex>,
}

impl Sanitizer {
    /// Build a sanitizer; `strip_keyword` removes every case-insensitive
    /// occurrence of that keyword.
    pub fn new(strip_keyword: Option<&str>) -> QuizgramResult<Self> {
        let entities = EntityDecoder::new()?;
        let line_break = RegexBuilder::new(r"<br\s*/?>")
            .case_insensitive(true)
            .build()
            .map_err(|e| QuizgramError::Config(format!("Regex error: {}", e)))?;
        let tag = Regex::new(r"</?\w+(?:\s+[^>]*?)?>")
            .map_err(|e| QuizgramError::Config(format!("Regex error: {}", e)))?;

        let keyword = match strip_keyword.map(str::trim) {
            Some(kw) if !kw.is_empty() => Some(
                RegexBuilder::new(&regex::escape(kw))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| QuizgramError::Config(format!("Invalid diagram type: {}", e)))?,
            ),
            _ => None,
        };

        Ok(Self {
            entities,
            line_break,
            tag,
            keyword,
        })
    }

    /// Clean one cell; `Missing` and non-text values yield the empty string
    pub fn clean_cell(&self, cell: &Cell) -> String {
        cell.as_text().map(|s| self.clean(s)).unwrap_or_default()
    }

    pub fn clean(&self, raw: &str) -> String {
        let text = self.entities.decode(raw);
        let text = self.line_break.replace_all(&text, "\n");
        let text = self.tag.replace_all(&text, "");
        let mut text = text.replace("```mermaid", "").replace("```", "");

        if let Some(keyword) = &self.keyword {
            text = keyword.replace_all(&text, "").into_owned();
        }

        text.trim().to_string()
    }
}
