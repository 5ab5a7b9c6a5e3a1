//! Turn free-form "word definition" text into the candidate list
//!
//! Each non-blank line of the input holds one word followed by its definition:
//!
//! ```text
//! cat small feline
//! dog man's best friend
//! ```
//!
//! The parsing logic:
//! - Lines are trimmed; lines that are empty after trimming are skipped.
//! - The first whitespace-separated token is the word, lowercased.
//! - The remaining tokens, rejoined with single spaces, are the definition
//!   (empty if the line holds only a word).
//! - A word seen again (in any case) keeps its first position in the candidate
//!   list but takes the later line's definition.
//!
//! Like the rest of the crate this is WASM-friendly: `parse_from_str` never
//! touches the filesystem, and `load_from_path` only exists on native builds.

use std::collections::HashMap;

use crate::errors::CompositionError;

/// Mapping from lowercase word to definition, plus the first-occurrence order
/// of the words (the placement generator may care about input order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordDefinitions {
    /// Distinct lowercase words, in first-occurrence order.
    words: Vec<String>,
    /// Lowercase word -> definition (possibly empty).
    definitions: HashMap<String, String>,
}

impl WordDefinitions {
    /// Parse raw multi-line text.
    ///
    /// # Example
    /// ```
    /// use crossword::normalizer::WordDefinitions;
    ///
    /// let defs = WordDefinitions::parse_from_str("Cat small  feline\n\n  dog\n");
    /// assert_eq!(defs.words(), ["cat", "dog"]);
    /// assert_eq!(defs.definition("CAT"), Some("small feline"));
    /// assert_eq!(defs.definition("dog"), Some(""));
    /// ```
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordDefinitions {
        let mut parsed = WordDefinitions::default();

        for raw_line in contents.lines() {
            let mut tokens = raw_line.split_whitespace();
            // `split_whitespace` already ignores leading/trailing whitespace,
            // so a blank line simply yields no first token.
            let Some(word_raw) = tokens.next() else {
                continue;
            };
            let word = word_raw.to_lowercase();
            let definition = tokens.collect::<Vec<_>>().join(" ");
            parsed.insert(word, definition);
        }

        log::debug!("normalized {} distinct words", parsed.words.len());
        parsed
    }

    /// Native-only convenience method: read a word/definition file and parse it.
    ///
    /// # Errors
    ///
    /// Will return `CompositionError::Io` if unable to read a file at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<WordDefinitions, CompositionError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|source| CompositionError::Io {
            context: format!("failed to read word list from '{}'", path_ref.display()),
            source,
        })?;
        Ok(Self::parse_from_str(&data))
    }

    fn insert(&mut self, word: String, definition: String) {
        if let Some(existing) = self.definitions.get_mut(&word) {
            log::debug!("duplicate word \"{word}\": later definition wins");
            *existing = definition;
        } else {
            self.words.push(word.clone());
            self.definitions.insert(word, definition);
        }
    }

    /// The candidate list passed to the placement generator.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Case-insensitive definition lookup.
    #[must_use]
    pub fn definition(&self, word: &str) -> Option<&str> {
        self.definitions.get(&word.to_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.definitions.contains_key(&word.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate `(word, definition)` pairs in candidate order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(|w| {
            let def = self.definitions.get(w).map_or("", String::as_str);
            (w.as_str(), def)
        })
    }
}
