//! Command line configuration and the input manifest.

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::markdown::{Layout, RenderOptions};

/// Manifest file name looked up in the input directory.
pub const MANIFEST_FILE: &str = "langref.toml";

/// Command line configuration for langref.
#[derive(Debug, Clone, Parser)]
#[command(name = "langref", version, about, long_about = None)]
pub struct Config {
    /// Directory holding one TOML file per section
    #[arg(default_value = ".")]
    pub input: PathBuf,

    /// Markdown output file
    #[arg(short, long, default_value = "REFERENCE.md")]
    pub output: PathBuf,

    /// Document title (defaults to manifest title, then directory name)
    #[arg(long)]
    pub title: Option<String>,

    /// Snippet layout
    #[arg(long, value_enum)]
    pub layout: Option<Layout>,

    /// Emit a table of contents after the title
    #[arg(long)]
    pub toc: bool,

    /// Also write an HTML preview to this path
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Verify records and output without writing; fails when out of date
    #[arg(long)]
    pub check: bool,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input path does not exist or is not a directory.
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            bail!("Input directory does not exist: {}", self.input.display());
        }
        if !self.input.is_dir() {
            bail!("Input path is not a directory: {}", self.input.display());
        }

        Ok(())
    }

    /// Returns document title from flags, manifest, or input directory.
    ///
    /// # Errors
    ///
    /// Returns error if no title is configured and the input path has no
    /// name component or contains invalid UTF8.
    pub fn document_title(&self, manifest: &Manifest) -> Result<String> {
        let configured = self.title.as_deref().or(manifest.title.as_deref());
        if let Some(title) = configured.map(str::trim).filter(|t| !t.is_empty()) {
            return Ok(title.to_string());
        }

        let path = self
            .input
            .canonicalize()
            .unwrap_or_else(|_| self.input.clone());

        path.file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Cannot derive a title from path: {}", path.display()))
            .map(String::from)
    }

    /// Merges render settings: flags override the manifest.
    pub fn render_options(&self, manifest: &Manifest) -> RenderOptions {
        RenderOptions {
            layout: self.layout.or(manifest.layout).unwrap_or_default(),
            toc: self.toc || manifest.toc.unwrap_or(false),
        }
    }
}

/// Optional document settings stored next to the section files.
///
/// ```toml
/// title = "Language Reference"
/// sections = ["basics", "loops", "errors"]
/// layout = "table"
/// toc = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub title: Option<String>,
    /// Section file stems in document order. Empty means file name order.
    pub sections: Vec<String>,
    pub layout: Option<Layout>,
    pub toc: Option<bool>,
}

impl Manifest {
    /// Parses manifest text.
    ///
    /// # Errors
    ///
    /// Returns error if the text is not valid TOML or has unknown keys.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse manifest")
    }

    /// Loads the manifest from an input directory.
    ///
    /// Returns the default manifest when the directory has none.
    ///
    /// # Errors
    ///
    /// Returns error if the manifest exists but cannot be read or parsed.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(MANIFEST_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no manifest, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid manifest: {}", path.display()))
    }
}
