// Copyright (C) 2020-2024 Andy Kurnia.

use std::collections::HashSet;

// lowercase words, read-only once loaded.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    // a missing word list is not an error, it just accepts nothing.
    pub fn load(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(data) => {
                let dictionary = Self::from_words(data.lines());
                tracing::info!(path = %path.display(), words = dictionary.len(), "loaded word list");
                dictionary
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cannot load word list, no word will validate");
                Self::default()
            }
        }
    }

    #[inline(always)]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
