//! Fixed-vocabulary word lookup.
//!
//! Maps whitespace-separated words to dense token ids. A word absent from
//! the vocabulary maps to the sentinel [`OOV_ID`]; the embedding table turns
//! that sentinel into an all-zero row rather than failing, so unknown words
//! contribute a neutral term to the similarity scores.

use std::collections::HashMap;

/// Sentinel token id for out-of-vocabulary words.
pub const OOV_ID: i64 = -1;

/// A fixed word-to-id mapping.
///
/// Ids are assigned densely in insertion order, so a `Vocabulary` built from
/// the rows of an embedding table indexes that table directly.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a vocabulary from an iterator of words, in order.
    /// Duplicates keep their first id.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::new();
        for word in words {
            vocab.insert(word.as_ref());
        }
        vocab
    }

    /// Inserts a word and returns its id; an already-known word keeps its id.
    pub fn insert(&mut self, word: &str) -> usize {
        let next_id = self.index.len();
        *self.index.entry(normalize(word)).or_insert(next_id)
    }

    /// Returns the id of a word, if known.
    pub fn id(&self, word: &str) -> Option<usize> {
        self.index.get(&normalize(word)).copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Tokenizes `text` into ids, one per whitespace-separated word.
    ///
    /// Words are lowercased and stripped of surrounding punctuation before
    /// lookup; unknown words yield [`OOV_ID`]. Tokens that are pure
    /// punctuation are skipped.
    pub fn token_ids(&self, text: &str) -> Vec<i64> {
        text.split_whitespace()
            .filter_map(|word| {
                let word = normalize(word);
                if word.is_empty() {
                    return None;
                }
                Some(match self.index.get(&word) {
                    Some(&id) => id as i64,
                    None => OOV_ID,
                })
            })
            .collect()
    }
}

fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}
