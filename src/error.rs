//! Validation errors raised while loading comparison records.

/// Malformed input detected by [`crate::EntryStore`].
///
/// Each variant names the offending record: the section title, and for
/// problems inside an entry, its 1-based position and task name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Section title is blank.
    #[error("section {position}: title is empty")]
    EmptySectionTitle { position: usize },

    /// Another section already uses this title.
    #[error("section \"{section}\": title is used by an earlier section")]
    DuplicateSection { section: String },

    /// Section contains no entries.
    #[error("section \"{section}\": no entries")]
    EmptySection { section: String },

    /// Entry task name is blank.
    #[error("section \"{section}\", entry {position}: task is empty")]
    EmptyTask { section: String, position: usize },

    /// Entry has no snippets at all.
    #[error("section \"{section}\", entry {position} \"{task}\": no snippets")]
    MissingSnippets {
        section: String,
        position: usize,
        task: String,
    },

    /// Snippet language name is blank.
    #[error("section \"{section}\", entry {position} \"{task}\": snippet {snippet} has no language")]
    EmptyLanguage {
        section: String,
        position: usize,
        task: String,
        snippet: usize,
    },

    /// Two snippets in one entry share a language.
    #[error("section \"{section}\", entry {position} \"{task}\": language \"{language}\" appears more than once")]
    DuplicateLanguage {
        section: String,
        position: usize,
        task: String,
        language: String,
    },
}

impl ValidationError {
    /// Title of the section holding the offending record, when it has one.
    pub fn section(&self) -> Option<&str> {
        match self {
            Self::EmptySectionTitle { .. } => None,
            Self::DuplicateSection { section }
            | Self::EmptySection { section }
            | Self::EmptyTask { section, .. }
            | Self::MissingSnippets { section, .. }
            | Self::EmptyLanguage { section, .. }
            | Self::DuplicateLanguage { section, .. } => Some(section),
        }
    }
}
