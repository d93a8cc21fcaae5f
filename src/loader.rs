//! Reads section records from an input directory.
//!
//! Each `*.toml` file other than the manifest holds one section:
//!
//! ```toml
//! title = "Basics"
//!
//! [[entries]]
//! task = "Print to console"
//! description = "Write a line to standard output."
//! snippets = [
//!     { language = "python", code = 'print("x")' },
//!     { language = "go", code = 'fmt.Println("x")' },
//! ]
//! ```

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::MANIFEST_FILE;
use crate::store::RawSection;

/// Parses one section file.
///
/// # Errors
///
/// Returns error if the text is not valid TOML or does not match the
/// section record shape.
pub fn parse_section(text: &str) -> Result<RawSection> {
    toml::from_str(text).context("Failed to parse section record")
}

/// Lists section files in the input directory, sorted by file name.
///
/// # Errors
///
/// Returns error if the directory cannot be read.
pub fn section_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?
            .path();

        let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
        let is_manifest = path.file_name().and_then(|n| n.to_str()) == Some(MANIFEST_FILE);

        if path.is_file() && is_toml && !is_manifest {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Reads every section in document order.
///
/// With an empty `order`, sections follow file name order. Otherwise
/// `order` lists file stems: listed stems must exist and files left out
/// of the list are skipped with a warning.
///
/// # Errors
///
/// Returns error if a listed section is missing or any file cannot be
/// read or parsed. Errors name the offending file.
pub fn read_sections(dir: impl AsRef<Path>, order: &[String]) -> Result<Vec<RawSection>> {
    let dir = dir.as_ref();
    let files = section_files(dir)?;

    let selected = if order.is_empty() {
        files
    } else {
        let stem = |path: &Path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(String::from)
                .unwrap_or_default()
        };

        for file in &files {
            if !order.contains(&stem(file)) {
                warn!(file = %file.display(), "section file not listed in manifest, skipping");
            }
        }

        let mut selected = Vec::with_capacity(order.len());
        for name in order {
            match files.iter().find(|f| stem(f) == *name) {
                Some(file) => selected.push(file.clone()),
                None => bail!(
                    "Manifest lists section \"{}\" but {} does not exist",
                    name,
                    dir.join(format!("{}.toml", name)).display()
                ),
            }
        }
        selected
    };

    selected
        .iter()
        .map(|path| {
            debug!(file = %path.display(), "reading section");
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read section file: {}", path.display()))?;
            parse_section(&text).with_context(|| format!("Invalid section file: {}", path.display()))
        })
        .collect()
}
