//! Markdown rendering of comparison documents.

use clap::ValueEnum;
use serde::Deserialize;
use std::iter;

use super::anchors::Anchors;
use super::escape::{code_fence, code_lines, escape_text};
use super::table::entry_table;
use crate::model::{ComparisonEntry, Document, Section};

/// How each entry's snippets are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One table per entry: a header row of languages and a row of snippets.
    #[default]
    Table,
    /// A `####` heading and fenced code block per language.
    Blocks,
}

/// Rendering settings shared by every render of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub layout: Layout,
    /// Emit a table of contents linking each section after the title.
    pub toc: bool,
}

/// Group of lines rendered without blank lines between them.
type Block = Vec<String>;

/// Renders a [`Document`] to GitHub Flavored Markdown.
///
/// Output layout:
/// - `# Title`, then an optional table of contents
/// - `## Section` per section
/// - `### Task` per entry, followed by its description paragraph
/// - the entry's snippets, as a table or as fenced code blocks
///
/// Blocks are separated by one blank line. Rendering holds no state, so
/// one renderer can serve many documents and repeated renders of the same
/// document are identical.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Creates renderer with table layout and no table of contents.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Returns a lazy iterator over the rendered lines.
    ///
    /// Lines carry no trailing newline. An empty document yields nothing,
    /// not even the title. Each call starts a fresh pass.
    pub fn lines<'a>(&self, doc: &'a Document) -> Lines<'a> {
        if doc.is_empty() {
            return Lines {
                inner: Box::new(iter::empty()),
            };
        }

        let RenderOptions { layout, toc } = self.options;

        let title = iter::once(vec![format!("# {}", escape_text(doc.title()))]);
        let contents = iter::once(())
            .filter(move |_| toc)
            .map(move |_| toc_block(doc, layout));
        let body = doc
            .sections()
            .iter()
            .flat_map(move |section| section_blocks(section, layout));

        let lines = title
            .chain(contents)
            .chain(body)
            .enumerate()
            .flat_map(|(index, block)| (index > 0).then(String::new).into_iter().chain(block));

        Lines {
            inner: Box::new(lines),
        }
    }

    /// Renders the whole document to a string.
    ///
    /// Lines are joined with `\n` and a non-empty result ends with a
    /// single newline.
    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::new();
        for line in self.lines(doc) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// Lazy sequence of rendered markdown lines.
pub struct Lines<'a> {
    inner: Box<dyn Iterator<Item = String> + 'a>,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }
}

fn section_blocks(section: &Section, layout: Layout) -> impl Iterator<Item = Block> + '_ {
    iter::once(vec![format!("## {}", escape_text(section.title()))]).chain(
        section
            .entries()
            .iter()
            .flat_map(move |entry| entry_blocks(entry, layout)),
    )
}

fn entry_blocks(entry: &ComparisonEntry, layout: Layout) -> Vec<Block> {
    let mut blocks = vec![vec![format!("### {}", escape_text(entry.task()))]];

    if !entry.description().is_empty() {
        blocks.push(entry.description().lines().map(String::from).collect());
    }

    match layout {
        Layout::Table => blocks.push(entry_table(entry)),
        Layout::Blocks => {
            for snippet in entry.snippets() {
                blocks.push(vec![format!("#### {}", escape_text(snippet.language()))]);

                let fence = code_fence(snippet.code());
                let mut block = vec![format!("{}{}", fence, snippet.language())];
                block.extend(code_lines(snippet.code()).map(String::from));
                block.push(fence);
                blocks.push(block);
            }
        }
    }

    blocks
}

/// Bullet list linking every section heading.
///
/// Anchors are assigned over all headings in emission order so that
/// repeated heading text resolves to the same suffix GitHub assigns.
fn toc_block(doc: &Document, layout: Layout) -> Block {
    let mut anchors = Anchors::new();
    anchors.next(doc.title());

    let mut block = Vec::with_capacity(doc.sections().len());
    for section in doc.sections() {
        let anchor = anchors.next(section.title());
        block.push(format!("- [{}](#{})", escape_text(section.title()), anchor));

        for entry in section.entries() {
            anchors.next(entry.task());
            if layout == Layout::Blocks {
                for language in entry.languages() {
                    anchors.next(language);
                }
            }
        }
    }
    block
}
