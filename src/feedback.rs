//! Feedback calculation for guesses.
//!
//! A guess is scored against a target one position at a time. Exact matches
//! are found first, and only the letters of the target left unmatched can turn
//! other guess letters yellow, so a repeated letter in the guess lights up at
//! most as many times as it still occurs in the target.

use std::fmt;

/// Verdict for a single letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feedback {
    /// Right letter, right position (green).
    Correct,
    /// Letter occurs elsewhere in the target (yellow).
    Present,
    /// Letter not in the target, or all its occurrences already used (gray).
    Absent,
}

impl Feedback {
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'N',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Correct),
            'Y' => Some(Self::Present),
            'N' => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Per-position feedback for a whole guess. Always as long as the guess.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedbackPattern(Vec<Feedback>);

impl FeedbackPattern {
    pub fn new(feedback: Vec<Feedback>) -> Self {
        Self(feedback)
    }

    /// Parse a `G`/`Y`/`N` string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        s.chars()
            .map(Feedback::from_char)
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    pub fn all_correct(len: usize) -> Self {
        Self(vec![Feedback::Correct; len])
    }

    pub fn as_slice(&self) -> &[Feedback] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every position is green.
    pub fn is_win(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|f| *f == Feedback::Correct)
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feedback in &self.0 {
            write!(f, "{}", feedback.to_char())?;
        }
        Ok(())
    }
}

fn letter_index(letter: u8) -> usize {
    debug_assert!(letter.is_ascii_lowercase(), "non-lowercase letter {letter}");
    usize::from(letter - b'a')
}

/// Score `guess` against `target`.
///
/// Both words must be lowercase ASCII and of equal length; callers validate
/// guesses before they get here.
#[must_use]
pub fn feedback(guess: &str, target: &str) -> FeedbackPattern {
    let guess = guess.as_bytes();
    let target = target.as_bytes();
    debug_assert_eq!(guess.len(), target.len());

    let mut result = vec![Feedback::Absent; guess.len()];
    let mut remaining = [0u8; 26];

    // First pass: greens, and count the target letters they did not use
    for (i, (&g, &t)) in guess.iter().zip(target).enumerate() {
        if g == t {
            result[i] = Feedback::Correct;
        } else {
            remaining[letter_index(t)] += 1;
        }
    }

    // Second pass: yellows consume whatever is left
    for (i, &g) in guess.iter().enumerate() {
        if result[i] == Feedback::Correct {
            continue;
        }
        let idx = letter_index(g);
        if remaining[idx] > 0 {
            result[i] = Feedback::Present;
            remaining[idx] -= 1;
        }
    }

    FeedbackPattern(result)
}
