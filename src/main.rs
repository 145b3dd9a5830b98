use clap::{Parser, Subcommand};
use royalbit_quizgram::cli::{self, ExtractArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quizgram")]
#[command(about = "Extract MermaidJS diagrams from quiz exports into one Markdown file per respondent.")]
#[command(long_about = "Quizgram - MermaidJS diagrams from quiz and survey exports

Quiz platforms export free-text answers with HTML escaping, <br> tags and
stray markup. Quizgram cleans the selected answer columns and writes one
Markdown file per respondent, ready for any Mermaid-aware viewer.

COMMANDS:
  extract   - Clean diagram answers and write one .md per respondent
  columns   - List the columns of an export with their indices

EXAMPLES:
  quizgram columns quiz_export.csv
  quizgram extract quiz_export.csv 7                 # By column index
  quizgram extract quiz_export.csv \"Q3 Class model\" 9 --render
  quizgram extract results.xlsx Q1 Q2 -o diagrams --sheet Responses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Clean diagram answers and write one Markdown file per respondent.

CLEANING (per cell, in order):
  1. Decode HTML character references (&gt; &lt; &quot; &#39; ...)
  2. <br>, <br/>, <br /> → newline
  3. Strip remaining HTML tags
  4. Strip ```mermaid / ``` fences
  5. Strip the diagram keyword (default: classDiagram)
  6. Trim whitespace

OUTPUT:
  <output-dir>/<respondent name>.md containing a title, the respondent's
  name and one section per answered question. Respondents without any
  diagram text get no file. Names are reduced to letters, digits and
  spaces; duplicate names get a _row<N> suffix (--on-collision overwrite
  keeps the last respondent instead).

RENDERING:
  --render adds ![question](https://mermaid.ink/img/<base64>) before each
  diagram block.

COLUMNS:
  Integers are zero-based column indices, anything else is a column name.
  Several columns can be given; they appear in the order supplied.")]
    /// Extract diagrams into per-respondent Markdown files
    Extract(ExtractArgs),

    /// List the columns of an export with their indices
    Columns {
        /// Path to the quiz export
        input: PathBuf,

        /// Worksheet to read from spreadsheet inputs
        #[arg(long)]
        sheet: Option<String>,

        /// Field delimiter for delimited text inputs
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract(args) => {
            cli::init_tracing(args.verbose);
            cli::extract(args).map(|_| ())
        }

        Commands::Columns {
            input,
            sheet,
            delimiter,
        } => {
            cli::init_tracing(false);
            cli::columns(input, sheet, delimiter)
        }
    };

    match result {
        // Setup errors get their own formatting and are printed once
        Err(err) if err.is_setup_error() => {
            cli::print_setup_error(&err);
            std::process::exit(1);
        }
        other => Ok(other?),
    }
}
