//! End-to-end pipeline tests through the library API

use pretty_assertions::assert_eq;
use royalbit_quizgram::config::{CollisionPolicy, PipelineConfig};
use royalbit_quizgram::loader::LoadOptions;
use royalbit_quizgram::report::{MemoryReporter, ReportEvent};
use royalbit_quizgram::writer::{run, ExtractRequest};
use royalbit_quizgram::QuizgramError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn request(input: PathBuf, columns: &[&str], output_dir: PathBuf) -> ExtractRequest {
    ExtractRequest {
        input,
        columns: columns.iter().map(|c| c.to_string()).collect(),
        output_dir,
        load: LoadOptions::default(),
        config: PipelineConfig::default(),
    }
}

#[test]
fn e2e_one_file_per_respondent_with_content() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        dir.path(),
        "quiz.csv",
        "Name,Diagram,Unused\nAda,A --&gt; B,\nBob,,\nCy,C --&gt; D,\n",
    );
    let out = dir.path().join("out");

    let mut reporter = MemoryReporter::default();
    let summary = run(&request(input, &["Diagram", "Unused"], out.clone()), &mut reporter).unwrap();

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.files, vec![out.join("Ada.md"), out.join("Cy.md")]);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);

    for file in &summary.files {
        let content = fs::read_to_string(file).unwrap();
        assert_eq!(content.matches("### ").count(), 1);
        assert!(content.contains("### Diagram"));
        assert!(!content.contains("### Unused"));
    }

    assert_eq!(
        reporter.events.last(),
        Some(&ReportEvent::Finished {
            files_written: 2,
            rows: 3
        })
    );
}

#[test]
fn e2e_full_document_text() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        dir.path(),
        "week3.csv",
        "Name,Q1,Q2\nAda Lovelace,\"```mermaid\nclassDiagram\nA --> B\n```\",\"X --&gt; Y&lt;br&gt;Y --&gt; Z\"\n",
    );
    let out = dir.path().join("out");

    run(&request(input, &["Q1", "2"], out.clone()), &mut MemoryReporter::default()).unwrap();

    let content = fs::read_to_string(out.join("Ada Lovelace.md")).unwrap();
    assert_eq!(
        content,
        "# week3.csv\n\n\
         ## Ada Lovelace\n\n\
         ### Q1\n\n\
         ```mermaid\nclassDiagram\nA --> B\n```\n\n\
         ### Q2\n\n\
         ```mermaid\nclassDiagram\nX --> Y\nY --> Z\n```\n"
    );
}

#[test]
fn e2e_render_links() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "quiz.csv", "Name,Q1\nAda,A-->B\n");
    let out = dir.path().join("out");

    let mut req = request(input, &["Q1"], out.clone());
    req.config.render_links = true;
    run(&req, &mut MemoryReporter::default()).unwrap();

    let content = fs::read_to_string(out.join("Ada.md")).unwrap();
    assert!(content.contains("### Q1\n\n![Q1](https://mermaid.ink/img/QS0tPkI=)\n\n```mermaid"));
}

#[test]
fn e2e_single_question_layout_keeps_keyword() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        dir.path(),
        "quiz.csv",
        "Name,Q1\nAda,\"flowchart LR<br>A --&gt; B\"\n",
    );
    let out = dir.path().join("out");

    let mut req = request(input, &["Q1"], out.clone());
    req.config.multi_question_mode = false;
    req.config.strip_type_keyword = false;
    run(&req, &mut MemoryReporter::default()).unwrap();

    assert_eq!(
        fs::read_to_string(out.join("Ada.md")).unwrap(),
        "```mermaid\nflowchart LR\nA --> B\n```\n"
    );
}

#[test]
fn e2e_collision_overwrite_is_last_wins() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        dir.path(),
        "quiz.csv",
        "Name,Q1\nJo! Smith,First --> One\nJo Smith,Second --> Two\n",
    );
    let out = dir.path().join("out");

    let mut req = request(input, &["Q1"], out.clone());
    req.config.on_collision = CollisionPolicy::Overwrite;
    let summary = run(&req, &mut MemoryReporter::default()).unwrap();

    assert_eq!(summary.collisions, 1);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 1);
    let content = fs::read_to_string(out.join("Jo Smith.md")).unwrap();
    assert!(content.contains("## Jo Smith\n"));
    assert!(content.contains("Second --> Two"));
}

#[test]
fn e2e_rerun_overwrites_previous_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let input = write_input(dir.path(), "quiz.csv", "Name,Q1\nAda,Old --> Answer\n");
    run(&request(input, &["Q1"], out.clone()), &mut MemoryReporter::default()).unwrap();

    let input = write_input(dir.path(), "quiz.csv", "Name,Q1\nAda,New --> Answer\n");
    run(&request(input, &["Q1"], out.clone()), &mut MemoryReporter::default()).unwrap();

    let content = fs::read_to_string(out.join("Ada.md")).unwrap();
    assert!(content.contains("New --> Answer"));
    assert!(!content.contains("Old"));
}

#[test]
fn e2e_missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let result = run(
        &request(dir.path().join("missing.csv"), &["Q1"], out.clone()),
        &mut MemoryReporter::default(),
    );

    assert!(matches!(result, Err(QuizgramError::InputNotFound { .. })));
    assert!(!out.exists());
}

#[test]
fn e2e_tab_delimited_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "quiz.tsv", "Name\tQ1\nAda\tA --&gt; B\n");
    let out = dir.path().join("out");

    let mut req = request(input, &["Q1"], out.clone());
    req.load.delimiter = b'\t';
    let summary = run(&req, &mut MemoryReporter::default()).unwrap();

    assert_eq!(summary.files, vec![out.join("Ada.md")]);
}
