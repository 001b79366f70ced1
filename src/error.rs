use thiserror::Error;

/// Reasons a guess is rejected. A rejected guess never changes the session.
///
/// The `Display` output is the message shown to the player, and always starts
/// with `Error:`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Error: Guessed word length does not match the correct word length (expected {expected}, got {actual}).")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Error: Guessed word \"{0}\" is not in the dictionary.")]
    NotInDictionary(String),

    #[error("Error: The game is over. Start a new game to keep playing.")]
    GameOver,
}

/// Failures while building a dictionary or a candidate set from one.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("could not read dictionary: {0}")]
    Io(#[from] std::io::Error),

    #[error("dictionary contains no words")]
    Empty,

    #[error("dictionary contains no words of length {0}")]
    NoWordsOfLength(usize),
}
