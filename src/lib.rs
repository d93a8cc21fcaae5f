//! Cross-language syntax reference builder.
//!
//! Loads comparison records (one TOML file per topic), validates them into
//! an immutable [`Document`], and renders GitHub Flavored Markdown with a
//! consistency checker and an optional HTML preview.

mod check;
mod config;
mod error;
mod generators;
mod html;
mod loader;
pub mod logging;
mod markdown;
mod model;
mod store;

pub use check::{CheckReport, Problem, check_document, check_output};
pub use config::{Config, MANIFEST_FILE, Manifest};
pub use error::ValidationError;
pub use generators::{Prepared, generate, load_input, run, verify};
pub use html::{markdown_to_html, render_html};
pub use loader::{parse_section, read_sections, section_files};
pub use markdown::{
    Anchors, Layout, Lines, MarkdownRenderer, RenderOptions, code_cell, escape_text, row, slugify,
};
pub use model::{ComparisonEntry, Document, Section, Snippet};
pub use store::{EntryStore, RawEntry, RawSection, RawSnippet, load_document};
