//! Per-respondent Markdown assembly

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// How question sections are laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStyle {
    /// Keyword written as the first line of every fenced block
    pub diagram_header: Option<String>,
    /// Rendering service prefix; `None` disables image links
    pub render_url: Option<String>,
    /// Title and question headings (off: bare fenced blocks only)
    pub headings: bool,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            diagram_header: Some(crate::config::DEFAULT_DIAGRAM_TYPE.to_string()),
            render_url: None,
            headings: true,
        }
    }
}

/// One question with content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSection {
    pub label: String,
    pub diagram: String,
    pub render_link: Option<String>,
}

/// Assembled document for one respondent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentDocument {
    pub source: String,
    pub respondent: String,
    pub sections: Vec<QuestionSection>,
    text: String,
}

impl RespondentDocument {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_content(&self) -> bool {
        !self.sections.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Rendering-service URL for a diagram: prefix + base-64 of its UTF-8 bytes
pub fn render_url(prefix: &str, diagram: &str) -> String {
    format!("{}{}", prefix, STANDARD.encode(diagram.as_bytes()))
}

/// Build the document for one respondent.
///
/// `questions` pairs each column label with its already-cleaned text;
/// empty text is skipped without a heading.
pub fn assemble<L, T>(
    source: &str,
    respondent: &str,
    questions: &[(L, T)],
    style: &DocumentStyle,
) -> RespondentDocument
where
    L: AsRef<str>,
    T: AsRef<str>,
{
    let sections: Vec<QuestionSection> = questions
        .iter()
        .filter(|(_, text)| !text.as_ref().is_empty())
        .map(|(label, text)| QuestionSection {
            label: label.as_ref().to_string(),
            diagram: text.as_ref().to_string(),
            render_link: style
                .render_url
                .as_deref()
                .map(|prefix| render_url(prefix, text.as_ref())),
        })
        .collect();

    let text = render_markdown(source, respondent, &sections, style);

    RespondentDocument {
        source: source.to_string(),
        respondent: respondent.to_string(),
        sections,
        text,
    }
}

fn render_markdown(
    source: &str,
    respondent: &str,
    sections: &[QuestionSection],
    style: &DocumentStyle,
) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if style.headings {
        blocks.push(format!("# {}", source));
        blocks.push(format!("## {}", respondent));
    }

    for section in sections {
        if style.headings {
            blocks.push(format!("### {}", section.label));
        }
        if let Some(link) = &section.render_link {
            blocks.push(format!("![{}]({})", section.label, link));
        }
        blocks.push(fenced_block(&section.diagram, style.diagram_header.as_deref()));
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn fenced_block(diagram: &str, header: Option<&str>) -> String {
    match header {
        Some(h) => format!("```mermaid\n{}\n{}\n```", h, diagram),
        None => format!("```mermaid\n{}\n```", diagram),
    }
}
