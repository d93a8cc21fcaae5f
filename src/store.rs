//! Entry store: validates raw comparison records into a [`Document`].

use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

use crate::error::ValidationError;
use crate::model::{ComparisonEntry, Document, Section, Snippet};

/// Unvalidated section record, as read from one topic file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSection {
    pub title: String,
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

/// Unvalidated comparison entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEntry {
    pub task: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub snippets: Vec<RawSnippet>,
}

/// Unvalidated language snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSnippet {
    pub language: String,
    pub code: String,
}

impl RawSnippet {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
        }
    }
}

impl RawEntry {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn snippet(mut self, language: impl Into<String>, code: impl Into<String>) -> Self {
        self.snippets.push(RawSnippet::new(language, code));
        self
    }
}

impl RawSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, entry: RawEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// Accumulates validated sections for one document.
///
/// Sections are validated as they are pushed; a rejected section leaves
/// the store unchanged. [`EntryStore::into_document`] freezes the result.
#[derive(Debug)]
pub struct EntryStore {
    title: String,
    sections: Vec<Section>,
    seen_titles: HashSet<String>,
}

impl EntryStore {
    /// Creates an empty store for a document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            seen_titles: HashSet::new(),
        }
    }

    /// Validates a raw section and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the title is blank or already used,
    /// the section has no entries, or any entry breaks an entry invariant.
    pub fn push_section(&mut self, raw: RawSection) -> Result<(), ValidationError> {
        let title = raw.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptySectionTitle {
                position: self.sections.len() + 1,
            });
        }
        if self.seen_titles.contains(title) {
            return Err(ValidationError::DuplicateSection {
                section: title.to_string(),
            });
        }
        if raw.entries.is_empty() {
            return Err(ValidationError::EmptySection {
                section: title.to_string(),
            });
        }

        let entries = raw
            .entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| validate_entry(title, index + 1, entry))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(section = title, entries = entries.len(), "accepted section");

        self.seen_titles.insert(title.to_string());
        self.sections.push(Section::new(title.to_string(), entries));
        Ok(())
    }

    /// Number of sections accepted so far.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Freezes the store into an immutable document.
    pub fn into_document(self) -> Document {
        Document::new(self.title, self.sections)
    }
}

fn validate_entry(
    section: &str,
    position: usize,
    raw: RawEntry,
) -> Result<ComparisonEntry, ValidationError> {
    let task = raw.task.trim();
    if task.is_empty() {
        return Err(ValidationError::EmptyTask {
            section: section.to_string(),
            position,
        });
    }
    if raw.snippets.is_empty() {
        return Err(ValidationError::MissingSnippets {
            section: section.to_string(),
            position,
            task: task.to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(raw.snippets.len());
    let mut snippets = Vec::with_capacity(raw.snippets.len());

    for (index, snippet) in raw.snippets.into_iter().enumerate() {
        let language = snippet.language.trim();
        if language.is_empty() {
            return Err(ValidationError::EmptyLanguage {
                section: section.to_string(),
                position,
                task: task.to_string(),
                snippet: index + 1,
            });
        }
        // Language keys are identifiers: "Python" and "python" collide.
        if !seen.insert(language.to_lowercase()) {
            return Err(ValidationError::DuplicateLanguage {
                section: section.to_string(),
                position,
                task: task.to_string(),
                language: language.to_string(),
            });
        }
        snippets.push(Snippet::new(language.to_string(), snippet.code));
    }

    Ok(ComparisonEntry::new(
        task.to_string(),
        raw.description.trim().to_string(),
        snippets,
    ))
}

/// Validates raw sections in order and builds the document.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn load_document(
    title: impl Into<String>,
    sections: impl IntoIterator<Item = RawSection>,
) -> Result<Document, ValidationError> {
    let mut store = EntryStore::new(title);
    for section in sections {
        store.push_section(section)?;
    }
    Ok(store.into_document())
}
