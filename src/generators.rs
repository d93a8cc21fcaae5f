//! Reference generation pipeline: load, render, write or verify.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::check::{CheckReport, check_output};
use crate::config::{Config, Manifest};
use crate::html::render_html;
use crate::loader::read_sections;
use crate::markdown::MarkdownRenderer;
use crate::model::Document;
use crate::store::load_document;

/// Validated document paired with the renderer configured for it.
#[derive(Debug)]
pub struct Prepared {
    pub document: Document,
    pub renderer: MarkdownRenderer,
}

/// Loads manifest and section files, validates them, and configures rendering.
///
/// # Errors
///
/// Returns error if the manifest or a section file cannot be read or
/// parsed, or the records fail validation.
pub fn load_input(config: &Config) -> Result<Prepared> {
    let manifest = Manifest::load(&config.input)?;
    let title = config.document_title(&manifest)?;
    let sections = read_sections(&config.input, &manifest.sections)?;

    let document = load_document(title, sections).context("Invalid comparison records")?;
    if document.is_empty() {
        warn!(input = %config.input.display(), "no sections found");
    }

    info!(
        sections = document.sections().len(),
        entries = document.entries().count(),
        "loaded records"
    );

    Ok(Prepared {
        document,
        renderer: MarkdownRenderer::with_options(config.render_options(&manifest)),
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Writes the markdown output and, when configured, the HTML preview.
///
/// # Returns
///
/// Paths written, markdown first
///
/// # Errors
///
/// Returns error if an output file cannot be written.
pub fn generate(prepared: &Prepared, config: &Config) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let markdown = prepared.renderer.render(&prepared.document);
    write_file(&config.output, &markdown)?;
    written.push(config.output.clone());

    if let Some(html_path) = &config.html {
        let page = render_html(&prepared.document, &prepared.renderer);
        write_file(html_path, &page)?;
        written.push(html_path.clone());
    }

    Ok(written)
}

/// Checks rendered markdown shape and the freshness of the output file.
///
/// # Errors
///
/// Returns error if the output file exists but cannot be read.
pub fn verify(prepared: &Prepared, config: &Config) -> Result<CheckReport> {
    check_output(&prepared.document, &prepared.renderer, &config.output)
}

/// Runs the command selected by the configuration.
///
/// # Errors
///
/// Returns error on any load, validation or write failure, and in check
/// mode when the report lists problems.
pub fn run(config: &Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;
    let prepared = load_input(config)?;

    if config.check {
        let report = verify(&prepared, config)?;
        if !report.is_clean() {
            for problem in report.problems() {
                warn!("{}", problem);
            }
            bail!("Check failed with {} problem(s)", report.problems().len());
        }
        info!(output = %config.output.display(), "check passed");
        return Ok(());
    }

    for path in generate(&prepared, config)? {
        println!("Generated: {}", path.display());
    }

    Ok(())
}
