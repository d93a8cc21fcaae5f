//! Shared test utilities for integration tests.
//!
//! Provides helpers for creating temporary record directories used across
//! multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;

/// Section record comparing console output.
pub const BASICS: &str = r##"
title = "Basics"

[[entries]]
task = "Print to console"
description = "Write a line to standard output."
snippets = [
    { language = "python", code = 'print("x")' },
    { language = "go", code = 'fmt.Println("x")' },
]

[[entries]]
task = "Comments"
snippets = [
    { language = "python", code = "# comment" },
    { language = "go", code = "// comment" },
    { language = "sql", code = "-- comment" },
]
"##;

/// Section record with multi-line snippets and pipes.
pub const ERRORS: &str = r#"
title = "Error Handling"

[[entries]]
task = "Catch an error"

[[entries.snippets]]
language = "python"
code = """
try:
    risky()
except ValueError as e:
    print(e)
"""

[[entries.snippets]]
language = "rust"
code = """
match risky() {
    Ok(v) | Err(v) => v,
}
"""
"#;

/// Creates temporary directory holding a `records` input directory.
///
/// # Returns
///
/// Temporary directory; records live in its `records` subdirectory
///
/// # Errors
///
/// Returns error if directory creation fails
pub fn create_records_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join("records"))?;
    Ok(dir)
}

/// Writes file under the records directory.
///
/// # Errors
///
/// Returns error if the file write fails
pub fn write_record(dir: &TempDir, name: &str, content: &str) -> Result<()> {
    write_file(&dir.path().join("records"), name, content)
}

/// Writes file, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
