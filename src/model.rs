//! Validated reference document model.
//!
//! Values in this module are only constructed by [`crate::EntryStore`], so
//! every [`Document`] observed outside the crate already satisfies the
//! record invariants: non-empty sections, at least one snippet per entry,
//! and unique languages within an entry.

/// Code text for one language within a comparison entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    language: String,
    code: String,
}

impl Snippet {
    pub(crate) fn new(language: String, code: String) -> Self {
        Self { language, code }
    }

    /// Language name as written in the record, trimmed.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Code text, kept verbatim.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// One task expressed in several languages.
///
/// Snippets keep the order they were declared in; that order becomes the
/// column order of the rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonEntry {
    task: String,
    description: String,
    snippets: Vec<Snippet>,
}

impl ComparisonEntry {
    pub(crate) fn new(task: String, description: String, snippets: Vec<Snippet>) -> Self {
        Self {
            task,
            description,
            snippets,
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    /// Free-form description; may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    /// Language names in declaration order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.snippets.iter().map(Snippet::language)
    }

    /// Returns the snippet for a language, matched case insensitively.
    pub fn snippet(&self, language: &str) -> Option<&Snippet> {
        self.snippets
            .iter()
            .find(|s| s.language.eq_ignore_ascii_case(language))
    }
}

/// Titled group of comparison entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    title: String,
    entries: Vec<ComparisonEntry>,
}

impl Section {
    pub(crate) fn new(title: String, entries: Vec<ComparisonEntry>) -> Self {
        Self { title, entries }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }
}

/// Complete reference manual: a title and its ordered sections.
///
/// Immutable once built. Rendering borrows it, so any number of renders
/// may share one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    sections: Vec<Section>,
}

impl Document {
    pub(crate) fn new(title: String, sections: Vec<Section>) -> Self {
        Self { title, sections }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// True when the document holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates over every entry across all sections in document order.
    pub fn entries(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    /// Total number of snippets across all entries.
    pub fn snippet_count(&self) -> usize {
        self.entries().map(|e| e.snippets.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> ComparisonEntry {
        ComparisonEntry::new(
            "Print to console".to_string(),
            String::new(),
            vec![
                Snippet::new("python".to_string(), "print(\"x\")".to_string()),
                Snippet::new("go".to_string(), "fmt.Println(\"x\")".to_string()),
            ],
        )
    }

    #[test]
    fn test_entry_languages_keep_declaration_order() {
        // Arrange
        let entry = sample_entry();

        // Act
        let languages: Vec<&str> = entry.languages().collect();

        // Assert
        assert_eq!(languages, vec!["python", "go"]);
    }

    #[test]
    fn test_entry_snippet_lookup_ignores_case() {
        // Arrange
        let entry = sample_entry();

        // Act
        let snippet = entry.snippet("Go");

        // Assert
        assert_eq!(
            snippet.map(Snippet::code),
            Some("fmt.Println(\"x\")"),
            "Lookup should match language regardless of case"
        );
        assert!(entry.snippet("rust").is_none());
    }

    #[test]
    fn test_document_counts_across_sections() {
        // Arrange
        let doc = Document::new(
            "Reference".to_string(),
            vec![
                Section::new("Basics".to_string(), vec![sample_entry()]),
                Section::new("More".to_string(), vec![sample_entry(), sample_entry()]),
            ],
        );

        // Act & Assert
        assert!(!doc.is_empty());
        assert_eq!(doc.entries().count(), 3);
        assert_eq!(doc.snippet_count(), 6);
    }

    #[test]
    fn test_document_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
    }
}
