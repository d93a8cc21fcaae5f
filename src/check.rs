//! Consistency checks for rendered reference documents.
//!
//! The checker renders a document, parses the markdown back with comrak
//! (GFM tables enabled) and compares what a markdown reader would see
//! against the records: section and task headings, table headers and
//! cells, and fenced code blocks. It can also compare against an output
//! file on disk to catch stale generated files.

use anyhow::{Context, Result};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::markdown::{CELL_BREAK, Layout, MarkdownRenderer, code_lines};
use crate::model::Document;

/// Inconsistency found by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// Level two headings differ from section titles.
    SectionHeadings {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// Level three headings differ from entry tasks.
    TaskHeadings {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// Number of tables differs from number of entries.
    TableCount { expected: usize, found: usize },
    /// Table header cells differ from the entry's languages.
    TableHeader {
        task: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// Table body cells differ from the entry's snippets.
    TableRow {
        task: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// Number of fenced code blocks differs from number of snippets.
    CodeBlockCount { expected: usize, found: usize },
    /// Fenced code block differs from its snippet.
    CodeBlock { task: String, language: String },
    /// Output file does not exist.
    MissingOutput { path: PathBuf },
    /// Output file content differs from a fresh render.
    StaleOutput { path: PathBuf },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionHeadings { expected, found } => write!(
                f,
                "section headings {:?} do not match sections {:?}",
                found, expected
            ),
            Self::TaskHeadings { expected, found } => write!(
                f,
                "task headings {:?} do not match entries {:?}",
                found, expected
            ),
            Self::TableCount { expected, found } => {
                write!(f, "found {} tables for {} entries", found, expected)
            }
            Self::TableHeader {
                task,
                expected,
                found,
            } => write!(
                f,
                "\"{}\": table header {:?} does not match languages {:?}",
                task, found, expected
            ),
            Self::TableRow {
                task,
                expected,
                found,
            } => write!(
                f,
                "\"{}\": table row has {} cells {:?}, expected {} {:?}",
                task,
                found.len(),
                found,
                expected.len(),
                expected
            ),
            Self::CodeBlockCount { expected, found } => write!(
                f,
                "found {} code blocks for {} snippets",
                found, expected
            ),
            Self::CodeBlock { task, language } => {
                write!(f, "\"{}\": {} code block does not match snippet", task, language)
            }
            Self::MissingOutput { path } => {
                write!(f, "{} does not exist", path.display())
            }
            Self::StaleOutput { path } => {
                write!(f, "{} is out of date", path.display())
            }
        }
    }
}

/// Outcome of a consistency check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    problems: Vec<Problem>,
}

impl CheckReport {
    /// True when no problems were found.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    fn push(&mut self, problem: Problem) {
        debug!("check problem: {}", problem);
        self.problems.push(problem);
    }
}

/// Inline content of a parsed cell or heading.
///
/// Code spans contribute their literal, `<br>` becomes a newline, soft
/// breaks become spaces.
fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::HtmlInline(html) if html.as_str() == CELL_BREAK => text.push('\n'),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Heading text as a reader sees it after escaping.
fn plain(text: &str) -> String {
    text.replace('\r', "").replace('\n', " ")
}

struct ParsedTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

struct ParsedCodeBlock {
    info: String,
    literal: String,
}

#[derive(Default)]
struct Parsed {
    sections: Vec<String>,
    tasks: Vec<String>,
    tables: Vec<ParsedTable>,
    code_blocks: Vec<ParsedCodeBlock>,
}

fn parse(markdown: &str) -> Parsed {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.table = true;

    let root = comrak::parse_document(&arena, markdown, &options);
    let mut parsed = Parsed::default();

    for node in root.descendants() {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) if heading.level == 2 => {
                parsed.sections.push(inline_text(node));
            }
            NodeValue::Heading(heading) if heading.level == 3 => {
                parsed.tasks.push(inline_text(node));
            }
            NodeValue::Table(..) => {
                let mut table = ParsedTable {
                    header: Vec::new(),
                    rows: Vec::new(),
                };
                for row in node.children() {
                    let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
                    let cells: Vec<String> = row.children().map(inline_text).collect();
                    if is_header {
                        table.header = cells;
                    } else {
                        table.rows.push(cells);
                    }
                }
                parsed.tables.push(table);
            }
            NodeValue::CodeBlock(block) if block.fenced => {
                parsed.code_blocks.push(ParsedCodeBlock {
                    info: block.info.clone(),
                    literal: block.literal.clone(),
                });
            }
            _ => {}
        }
    }

    parsed
}

/// Renders the document and verifies the markdown parses back to it.
///
/// Checks section and task headings for every layout. For the table
/// layout, every entry must produce one table whose header lists its
/// languages and whose single row holds its snippets, in order. For the
/// blocks layout, every snippet must produce a fenced code block tagged
/// with its language.
pub fn check_document(doc: &Document, renderer: &MarkdownRenderer) -> CheckReport {
    let markdown = renderer.render(doc);
    let parsed = parse(&markdown);
    let mut report = CheckReport::default();

    let sections: Vec<String> = doc.sections().iter().map(|s| plain(s.title())).collect();
    if parsed.sections != sections {
        report.push(Problem::SectionHeadings {
            expected: sections,
            found: parsed.sections,
        });
    }

    let tasks: Vec<String> = doc.entries().map(|e| plain(e.task())).collect();
    if parsed.tasks != tasks {
        report.push(Problem::TaskHeadings {
            expected: tasks,
            found: parsed.tasks,
        });
    }

    match renderer.options().layout {
        Layout::Table => check_tables(doc, parsed.tables, &mut report),
        Layout::Blocks => check_code_blocks(doc, parsed.code_blocks, &mut report),
    }

    report
}

fn check_tables(doc: &Document, tables: Vec<ParsedTable>, report: &mut CheckReport) {
    let entries = doc.entries().count();
    if tables.len() != entries {
        report.push(Problem::TableCount {
            expected: entries,
            found: tables.len(),
        });
        return;
    }

    for (entry, table) in doc.entries().zip(tables) {
        let languages: Vec<String> = entry.languages().map(plain).collect();
        if table.header != languages {
            report.push(Problem::TableHeader {
                task: entry.task().to_string(),
                expected: languages,
                found: table.header,
            });
        }

        let cells: Vec<String> = entry
            .snippets()
            .iter()
            .map(|s| code_lines(s.code()).collect::<Vec<_>>().join("\n"))
            .collect();
        let found = table.rows.into_iter().next().unwrap_or_default();
        if found != cells {
            report.push(Problem::TableRow {
                task: entry.task().to_string(),
                expected: cells,
                found,
            });
        }
    }
}

fn check_code_blocks(doc: &Document, blocks: Vec<ParsedCodeBlock>, report: &mut CheckReport) {
    let snippets = doc.snippet_count();
    if blocks.len() != snippets {
        report.push(Problem::CodeBlockCount {
            expected: snippets,
            found: blocks.len(),
        });
        return;
    }

    let expected = doc
        .entries()
        .flat_map(|entry| entry.snippets().iter().map(move |s| (entry, s)));
    for ((entry, snippet), block) in expected.zip(blocks) {
        let mut literal = code_lines(snippet.code()).collect::<Vec<_>>().join("\n");
        literal.push('\n');
        if block.info != snippet.language() || block.literal != literal {
            report.push(Problem::CodeBlock {
                task: entry.task().to_string(),
                language: snippet.language().to_string(),
            });
        }
    }
}

/// Runs [`check_document`] and compares the render with a file on disk.
///
/// # Errors
///
/// Returns error if the output file exists but cannot be read.
pub fn check_output(
    doc: &Document,
    renderer: &MarkdownRenderer,
    path: impl AsRef<Path>,
) -> Result<CheckReport> {
    let path = path.as_ref();
    let mut report = check_document(doc, renderer);

    match std::fs::read_to_string(path) {
        Ok(existing) => {
            if existing != renderer.render(doc) {
                report.push(Problem::StaleOutput {
                    path: path.to_path_buf(),
                });
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            report.push(Problem::MissingOutput {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read output file: {}", path.display()));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::RenderOptions;
    use crate::store::{RawEntry, RawSection, load_document};
    use tempfile::TempDir;

    fn tricky_document() -> Document {
        load_document(
            "Reference",
            vec![
                RawSection::new("Basics")
                    .entry(
                        RawEntry::new("Print to console")
                            .snippet("python", "print(\"x\")")
                            .snippet("go", "fmt.Println(\"x\")"),
                    )
                    .entry(
                        RawEntry::new("Logical or")
                            .description("Pipes must not split cells.")
                            .snippet("javascript", "a || b")
                            .snippet("shell", "cat file | grep x")
                            .snippet("c#", "a ?? b"),
                    ),
                RawSection::new("Strings").entry(
                    RawEntry::new("Command substitution")
                        .snippet("bash", "now=`date`")
                        .snippet("python", "if x:\n    run()\n\n    done()\n"),
                ),
            ],
        )
        .expect("Document should be valid")
    }

    #[test]
    fn test_check_table_layout_clean() {
        // Arrange
        let doc = tricky_document();
        let renderer = MarkdownRenderer::new();

        // Act
        let report = check_document(&doc, &renderer);

        // Assert
        assert!(
            report.is_clean(),
            "Rendered tables should parse back to the records: {:?}",
            report.problems()
        );
    }

    #[test]
    fn test_check_blocks_layout_clean() {
        let doc = tricky_document();
        let renderer = MarkdownRenderer::with_options(RenderOptions {
            layout: Layout::Blocks,
            toc: true,
        });

        let report = check_document(&doc, &renderer);

        assert!(report.is_clean(), "{:?}", report.problems());
    }

    #[test]
    fn test_row_cells_follow_insertion_order() {
        // Arrange
        let doc = tricky_document();
        let parsed = parse(&MarkdownRenderer::new().render(&doc));

        // Act
        let table = &parsed.tables[1];

        // Assert
        assert_eq!(table.header, vec!["javascript", "shell", "c#"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(
            table.rows[0],
            vec!["a || b", "cat file | grep x", "a ?? b"],
            "Row should hold exactly one cell per language"
        );
    }

    #[test]
    fn test_check_empty_document_clean() {
        let doc = load_document("Empty", Vec::new()).expect("Should load");

        let report = check_document(&doc, &MarkdownRenderer::new());

        assert!(report.is_clean());
    }

    #[test]
    fn test_description_table_reported() {
        // Arrange: a description carrying its own table shifts the count
        let doc = load_document(
            "R",
            vec![RawSection::new("Basics").entry(
                RawEntry::new("Print")
                    .description("| a |\n| - |\n| b |")
                    .snippet("go", "x"),
            )],
        )
        .expect("Should load");

        // Act
        let report = check_document(&doc, &MarkdownRenderer::new());

        // Assert
        assert_eq!(
            report.problems(),
            &[Problem::TableCount {
                expected: 1,
                found: 2
            }]
        );
    }

    #[test]
    fn test_check_output_fresh_file() -> Result<()> {
        // Arrange
        let dir = TempDir::new()?;
        let path = dir.path().join("REFERENCE.md");
        let doc = tricky_document();
        let renderer = MarkdownRenderer::new();
        std::fs::write(&path, renderer.render(&doc))?;

        // Act
        let report = check_output(&doc, &renderer, &path)?;

        // Assert
        assert!(report.is_clean(), "{:?}", report.problems());
        Ok(())
    }

    #[test]
    fn test_check_output_stale_file() -> Result<()> {
        // Arrange
        let dir = TempDir::new()?;
        let path = dir.path().join("REFERENCE.md");
        let doc = tricky_document();
        let renderer = MarkdownRenderer::new();
        std::fs::write(&path, "# Old content\n")?;

        // Act
        let report = check_output(&doc, &renderer, &path)?;

        // Assert
        assert_eq!(report.problems(), &[Problem::StaleOutput { path }]);
        Ok(())
    }

    #[test]
    fn test_check_output_missing_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("missing.md");
        let doc = tricky_document();

        let report = check_output(&doc, &MarkdownRenderer::new(), &path)?;

        assert_eq!(report.problems(), &[Problem::MissingOutput { path }]);
        Ok(())
    }

    #[test]
    fn test_problem_display() {
        let problem = Problem::TableRow {
            task: "Print".to_string(),
            expected: vec!["a".to_string(), "b".to_string()],
            found: vec!["a".to_string()],
        };

        let message = problem.to_string();

        assert!(message.contains("Print"), "{}", message);
        assert!(message.contains("1 cells"), "{}", message);
        assert!(message.contains("expected 2"), "{}", message);
    }
}
