//! Localization string table
//!
//! Insertion-ordered map from ID to trimmed text, mirroring the order texts
//! were found in so exported tables are deterministic.

use indexmap::IndexMap;

/// Collected ID → text entries for one run
#[derive(Debug, Clone, Default)]
pub struct LocalizationStore {
    entries: IndexMap<String, String>,
    duplicates: Vec<String>,
}

impl LocalizationStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` with the trimmed `text`.
    ///
    /// A repeated ID keeps the first text and is recorded as a duplicate.
    ///
    /// # Returns
    /// `true` if the entry was added, `false` if the ID was already present
    pub fn add(&mut self, id: impl Into<String>, text: &str) -> bool {
        let id = id.into();
        if self.entries.contains_key(&id) {
            tracing::warn!(
                "Unexpected behaviour - trying to add content for a string named {}, but one already exists? Have you duplicated a tag?",
                id
            );
            self.duplicates.push(id);
            return false;
        }

        self.entries.insert(id, text.trim().to_string());
        true
    }

    /// Text for an ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Entries in first-insertion order
    #[must_use]
    pub fn entries(&self) -> &IndexMap<String, String> {
        &self.entries
    }

    /// Iterate `(id, text)` pairs in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, text)| (id.as_str(), text.as_str()))
    }

    /// IDs that were added more than once, in the order they were rejected
    #[must_use]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Get the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_keeps_order() {
        let mut store = LocalizationStore::new();
        assert!(store.add("b_1", "  Second  "));
        assert!(store.add("a_1", "First\t"));

        let ids: Vec<&str> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["b_1", "a_1"]);
        assert_eq!(store.get("b_1"), Some("Second"));
        assert_eq!(store.get("a_1"), Some("First"));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut store = LocalizationStore::new();
        assert!(store.add("A1", "original"));
        assert!(!store.add("A1", "replacement"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("A1"), Some("original"));
        assert_eq!(store.duplicates(), ["A1".to_string()]);
    }

    #[test]
    fn test_ids_are_case_sensitive() {
        let mut store = LocalizationStore::new();
        assert!(store.add("intro_AB12", "one"));
        assert!(store.add("INTRO_AB12", "two"));
        assert_eq!(store.len(), 2);
        assert!(store.duplicates().is_empty());
    }
}
