//! Heading anchors following GitHub's slug rules.

use std::collections::HashMap;

/// Converts heading text to its base GitHub anchor.
///
/// Lowercases, keeps letters, digits, `-` and `_`, turns spaces into `-`
/// and drops everything else.
pub fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Assigns unique anchors to headings in document order.
///
/// Repeated slugs get `-1`, `-2`, ... suffixes the way GitHub numbers
/// them.
#[derive(Debug, Default)]
pub struct Anchors {
    seen: HashMap<String, usize>,
}

impl Anchors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the anchor for the next heading with this text.
    pub fn next(&mut self, heading: &str) -> String {
        let base = slugify(heading);
        let mut anchor = base.clone();
        // A suffixed slug can collide with a literal heading like "x-1".
        while self.seen.contains_key(&anchor) {
            let count = self.seen.entry(base.clone()).or_insert(0);
            *count += 1;
            anchor = format!("{}-{}", base, count);
        }
        self.seen.insert(anchor.clone(), 0);
        anchor
    }
}
