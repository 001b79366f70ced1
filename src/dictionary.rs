use crate::debug_log;
use crate::error::DictionaryError;
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_DICTIONARY: &str = include_str!("resources/dictionary.txt");

/// The set of valid words. Never empty, never mutated after loading.
///
/// Words are lowercase ASCII letters, kept sorted and unique so lookups are a
/// binary search and random draws only depend on the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

fn normalize(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    if word.is_empty() {
        return None;
    }
    if !word.chars().all(|c| c.is_ascii_lowercase()) {
        debug_log!("Skipping dictionary entry with non-letter characters: {:?}", word);
        return None;
    }
    Some(word)
}

impl Dictionary {
    /// Build a dictionary from raw entries. Entries are trimmed and lowercased;
    /// blank entries and entries with anything but letters are skipped.
    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .filter_map(|w| normalize(w.as_ref()))
            .collect();
        words.sort_unstable();
        words.dedup();

        if words.is_empty() {
            return Err(DictionaryError::Empty);
        }
        log::info!("Loaded dictionary with {} words", words.len());
        Ok(Self { words })
    }

    pub fn load_from_str(data: &str) -> Result<Self, DictionaryError> {
        Self::from_words(data.lines())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Self::from_words(lines)
    }

    /// The word list compiled into the binary.
    pub fn embedded() -> Result<Self, DictionaryError> {
        Self::load_from_str(EMBEDDED_DICTIONARY)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn words_of_length(&self, len: usize) -> impl Iterator<Item = &str> {
        self.iter().filter(move |w| w.len() == len)
    }

    /// Draw a word uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }
}
