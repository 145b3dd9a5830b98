//! Pipeline configuration
//!
//! Defaults can be overridden from a YAML file (`--config`) and then by
//! command-line flags.

use crate::error::{QuizgramError, QuizgramResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_NAME_COLUMN: &str = "Name";
pub const DEFAULT_DIAGRAM_TYPE: &str = "classDiagram";
pub const DEFAULT_RENDER_URL: &str = "https://mermaid.ink/img/";
pub const DEFAULT_OUTPUT_DIR: &str = "mermaid_diagrams";

/// What to do when two respondents sanitize to the same file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Append `_row<N>` to later respondents with an already-used name
    #[default]
    Suffix,
    /// Later respondent replaces the earlier file
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Column holding the respondent's display name
    pub name_column: String,
    /// Mermaid diagram keyword re-added as the first line of each block
    pub diagram_type: String,
    /// Strip the diagram keyword from cell text (and re-add it on output)
    pub strip_type_keyword: bool,
    /// Emit title and per-question headings around the diagram blocks
    pub multi_question_mode: bool,
    /// Emit an image link to the rendering service before each block
    pub render_links: bool,
    pub render_url: String,
    pub on_collision: CollisionPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            diagram_type: DEFAULT_DIAGRAM_TYPE.to_string(),
            strip_type_keyword: true,
            multi_question_mode: true,
            render_links: false,
            render_url: DEFAULT_RENDER_URL.to_string(),
            on_collision: CollisionPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a config file; absent keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> QuizgramResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> QuizgramResult<()> {
        if self.strip_type_keyword && self.diagram_type.trim().is_empty() {
            return Err(QuizgramError::Config(
                "diagram_type must not be empty when strip_type_keyword is enabled".to_string(),
            ));
        }
        if self.render_links && self.render_url.trim().is_empty() {
            return Err(QuizgramError::Config(
                "render_url must not be empty when render_links is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
