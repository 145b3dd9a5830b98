//! Progress reporting
//!
//! The writer never prints; it tells a `Reporter` what happened. The CLI
//! uses `ConsoleReporter`, tests use `MemoryReporter`.

use colored::Colorize;
use std::path::{Path, PathBuf};

pub trait Reporter {
    /// A respondent document was written
    fn file_written(&mut self, path: &Path);

    /// Two respondents mapped to the same file name
    fn name_collision(&mut self, respondent: &str, path: &Path);

    /// All rows have been processed
    fn finished(&mut self, files_written: usize, rows: usize);
}

/// Colored terminal output
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn file_written(&mut self, path: &Path) {
        println!("   {} {}", "Created".green(), path.display());
    }

    fn name_collision(&mut self, respondent: &str, path: &Path) {
        if self.verbose {
            println!(
                "   {} '{}' shares a file name, writing {}",
                "⚠️".yellow(),
                respondent,
                path.display()
            );
        }
    }

    fn finished(&mut self, files_written: usize, rows: usize) {
        println!();
        println!(
            "{} ({} files from {} rows)",
            "✅ Processing complete.".bold().green(),
            files_written,
            rows
        );
    }
}

/// Event captured by `MemoryReporter`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    FileWritten(PathBuf),
    NameCollision { respondent: String, path: PathBuf },
    Finished { files_written: usize, rows: usize },
}

/// Records events in order
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub events: Vec<ReportEvent>,
}

impl MemoryReporter {
    pub fn written(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::FileWritten(p) => Some(p.as_path()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn file_written(&mut self, path: &Path) {
        self.events.push(ReportEvent::FileWritten(path.to_path_buf()));
    }

    fn name_collision(&mut self, respondent: &str, path: &Path) {
        self.events.push(ReportEvent::NameCollision {
            respondent: respondent.to_string(),
            path: path.to_path_buf(),
        });
    }

    fn finished(&mut self, files_written: usize, rows: usize) {
        self.events.push(ReportEvent::Finished {
            files_written,
            rows,
        });
    }
}
