//! The adversary's pool of still-possible secret words.
//!
//! Each guess splits the pool into buckets by the feedback every candidate
//! would produce. The adversary keeps the largest bucket and reports that
//! bucket's pattern, so the reported feedback is true for every word that is
//! still in play.

use crate::debug_log;
use crate::dictionary::Dictionary;
use crate::error::{DictionaryError, GuessError};
use crate::feedback::{FeedbackPattern, feedback};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Candidates grouped by the pattern they produce against one guess.
pub type Partition<'a> = BTreeMap<FeedbackPattern, Vec<&'a str>>;

#[derive(Debug, Clone)]
pub struct CandidateSet {
    dictionary: Arc<Dictionary>,
    word_length: usize,
    // sorted, unique, all of `word_length`
    words: Vec<String>,
}

impl CandidateSet {
    /// Start from every dictionary word of `word_length` letters.
    pub fn new(dictionary: Arc<Dictionary>, word_length: usize) -> Result<Self, DictionaryError> {
        let words: Vec<String> = dictionary
            .words_of_length(word_length)
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            return Err(DictionaryError::NoWordsOfLength(word_length));
        }
        Ok(Self {
            dictionary,
            word_length,
            words,
        })
    }

    /// Start from every dictionary word as long as `reference`, which must
    /// itself come from the dictionary.
    pub(crate) fn from_reference(dictionary: Arc<Dictionary>, reference: &str) -> Self {
        debug_assert!(dictionary.contains(reference));
        let word_length = reference.len();
        let words = dictionary
            .words_of_length(word_length)
            .map(str::to_string)
            .collect();
        Self {
            dictionary,
            word_length,
            words,
        }
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// The single remaining word, once the set has collapsed.
    pub fn sole_candidate(&self) -> Option<&str> {
        match self.words.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.words.is_empty() {
            return None;
        }
        Some(&self.words[rng.gen_range(0..self.words.len())])
    }

    /// Check that `guess` may be played against this set.
    pub fn validate(&self, guess: &str) -> Result<(), GuessError> {
        if guess.len() != self.word_length {
            return Err(GuessError::LengthMismatch {
                expected: self.word_length,
                actual: guess.len(),
            });
        }
        if !self.dictionary.contains(guess) {
            return Err(GuessError::NotInDictionary(guess.to_string()));
        }
        Ok(())
    }

    /// Group every candidate by the feedback it would give for `guess`.
    pub fn partition(&self, guess: &str) -> Partition<'_> {
        let mut buckets = Partition::new();
        for word in &self.words {
            buckets
                .entry(feedback(guess, word))
                .or_default()
                .push(word.as_str());
        }
        buckets
    }

    /// Narrow the set to the largest bucket for `guess` and return its pattern.
    ///
    /// Ties between equally large buckets go to a non-winning bucket first,
    /// then to the pattern whose `G`/`Y`/`N` string sorts first. A rejected
    /// guess leaves the set untouched.
    pub fn partition_and_keep_largest(&mut self, guess: &str) -> Result<FeedbackPattern, GuessError> {
        self.validate(guess)?;

        let buckets = self.partition(guess);
        debug_log!(
            "Guess {:?} splits {} candidates into {} buckets",
            guess,
            self.words.len(),
            buckets.len()
        );

        // constructors never build an empty set and the kept bucket is never empty
        let Some((pattern, kept)) = buckets.into_iter().max_by(|a, b| compare_buckets(a, b)) else {
            unreachable!("no candidates left to score {guess:?} against");
        };

        let kept: Vec<String> = kept.into_iter().map(str::to_string).collect();
        log::info!(
            "Adversary keeps {} of {} candidates with pattern {}",
            kept.len(),
            self.words.len(),
            pattern
        );
        self.words = kept;
        Ok(pattern)
    }
}

/// Larger buckets win; then non-winning over winning; then the smaller
/// pattern string.
fn compare_buckets(a: &(FeedbackPattern, Vec<&str>), b: &(FeedbackPattern, Vec<&str>)) -> Ordering {
    a.1.len()
        .cmp(&b.1.len())
        .then_with(|| b.0.is_win().cmp(&a.0.is_win()))
        .then_with(|| pattern_chars(&b.0).cmp(pattern_chars(&a.0)))
}

fn pattern_chars(pattern: &FeedbackPattern) -> impl Iterator<Item = char> + '_ {
    pattern.as_slice().iter().map(|f| f.to_char())
}
