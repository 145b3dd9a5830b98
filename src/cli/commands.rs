use crate::config::{CollisionPolicy, PipelineConfig, DEFAULT_OUTPUT_DIR};
use crate::error::{QuizgramError, QuizgramResult};
use crate::loader::{load_table, LoadOptions};
use crate::report::ConsoleReporter;
use crate::writer::{self, ExtractRequest, RunSummary};
use colored::Colorize;
use std::path::PathBuf;

/// Arguments of the extract command
#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Path to the quiz export (.csv, .tsv, .xlsx, .xls, .ods)
    pub input: PathBuf,

    /// Column(s) holding MermaidJS answers, by name or zero-based index
    #[arg(required = true)]
    pub columns: Vec<String>,

    /// Directory for the generated .md files (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, env = "QUIZGRAM_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Add a rendered-image link before each diagram
    #[arg(short, long)]
    pub render: bool,

    /// Rendering service prefix for image links
    #[arg(long, env = "QUIZGRAM_RENDER_URL")]
    pub render_url: Option<String>,

    /// Column holding the respondent's name
    #[arg(short, long)]
    pub name_column: Option<String>,

    /// Mermaid diagram keyword stripped from answers and re-added on output
    #[arg(short = 't', long)]
    pub diagram_type: Option<String>,

    /// Leave the diagram keyword in the answer text (no header line added)
    #[arg(long)]
    pub keep_diagram_type: bool,

    /// Write bare diagram blocks without title or question headings
    #[arg(long)]
    pub single: bool,

    /// What to do when two respondents map to the same file name
    #[arg(long, value_enum)]
    pub on_collision: Option<CollisionPolicy>,

    /// YAML file with pipeline defaults (flags override it)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Worksheet to read from spreadsheet inputs (default: first)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Field delimiter for delimited text inputs
    #[arg(short, long, default_value = ",")]
    pub delimiter: char,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExtractArgs {
    /// Config file (or defaults) with command-line overrides applied
    pub fn pipeline_config(&self) -> QuizgramResult<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_yaml_file(path)?,
            None => PipelineConfig::default(),
        };

        if self.render {
            config.render_links = true;
        }
        if let Some(url) = &self.render_url {
            config.render_url = url.clone();
        }
        if let Some(name) = &self.name_column {
            config.name_column = name.clone();
        }
        if let Some(kw) = &self.diagram_type {
            config.diagram_type = kw.clone();
        }
        if self.keep_diagram_type {
            config.strip_type_keyword = false;
        }
        if self.single {
            config.multi_question_mode = false;
        }
        if let Some(policy) = self.on_collision {
            config.on_collision = policy;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load_options(&self) -> QuizgramResult<LoadOptions> {
        Ok(LoadOptions {
            delimiter: delimiter_byte(self.delimiter)?,
            sheet: self.sheet.clone(),
        })
    }
}

fn delimiter_byte(delimiter: char) -> QuizgramResult<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            QuizgramError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                delimiter
            ))
        })
}

/// Install the tracing subscriber; `RUST_LOG` wins over `verbose`
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "royalbit_quizgram=debug"
    } else {
        "royalbit_quizgram=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

/// Execute the extract command
pub fn extract(args: ExtractArgs) -> QuizgramResult<RunSummary> {
    println!("{}", "🧜 Quizgram - Extracting Mermaid diagrams".bold().green());
    println!("   Input:   {}", args.input.display());
    println!("   Columns: {}", args.columns.join(", ").bright_blue());
    println!("   Output:  {}", args.output_dir.display());
    if args.render {
        println!("   {}", "Rendering links enabled".cyan());
    }
    println!();

    let request = ExtractRequest {
        input: args.input.clone(),
        columns: args.columns.clone(),
        output_dir: args.output_dir.clone(),
        load: args.load_options()?,
        config: args.pipeline_config()?,
    };

    let mut reporter = ConsoleReporter::new(args.verbose);
    writer::run(&request, &mut reporter)
}

/// Execute the columns command - list headers with their indices
pub fn columns(input: PathBuf, sheet: Option<String>, delimiter: char) -> QuizgramResult<()> {
    let options = LoadOptions {
        delimiter: delimiter_byte(delimiter)?,
        sheet,
    };
    let table = load_table(&input, &options)?;

    println!("{}", "📋 Quizgram - Columns".bold().green());
    println!("   File: {} ({} rows)\n", input.display(), table.row_count());
    for (idx, name) in table.columns().iter().enumerate() {
        println!("   {:>3}  {}", idx.to_string().cyan(), name);
    }
    Ok(())
}

/// Print a setup error for the user; other errors print nothing here
pub fn print_setup_error(err: &QuizgramError) {
    match err {
        QuizgramError::ColumnNotFound { name, available } => {
            eprintln!(
                "{}",
                format!("❌ Column '{}' not found in the input file.", name)
                    .bold()
                    .red()
            );
            eprintln!("Available columns are:");
            for col in available {
                eprintln!("- '{}'", col);
            }
        }
        err if err.is_setup_error() => {
            eprintln!("{}", format!("❌ {}", err).bold().red());
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
