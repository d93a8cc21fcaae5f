//! Markdown rendering with GitHub Flavored Markdown output.
//!
//! This module turns a validated document into markdown text: headings
//! for the title, sections and tasks, GFM tables or fenced code blocks for
//! snippets, and an optional table of contents using GitHub anchors.

mod anchors;
mod escape;
mod renderer;
mod table;

pub use anchors::{Anchors, slugify};
pub use escape::{code_lines, escape_text};
pub use renderer::{Layout, Lines, MarkdownRenderer, RenderOptions};
pub use table::{CELL_BREAK, code_cell, row};
