use crate::error::GuessError;
use crate::game_state::{
    CORRECT_GUESS_MESSAGE, DEFAULT_MAX_GUESSES, GameInterface, GameMode, GameStatus, GuessOutcome,
    UserAction, WelcomeInfo, response_text,
};
use clap::Parser;
use std::io::BufRead;

/// Classic and adversarial word-guessing game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited dictionary file
    #[arg(short = 'i', long = "input")]
    pub dictionary_path: Option<String>,

    /// Which game to play
    #[arg(short, long, value_enum, default_value_t = GameMode::Adversarial)]
    pub mode: GameMode,

    /// Number of guesses per game
    #[arg(short = 'g', long, default_value_t = DEFAULT_MAX_GUESSES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_guesses: u32,

    /// Seed for reproducible word draws
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Play on the terminal board instead of the line prompt
    #[arg(long)]
    pub tui: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Typed at the guess prompt; the leading slash keeps them apart from words.
const EXIT_COMMAND: &str = "/quit";
const NEW_GAME_COMMAND: &str = "/new";

// UI Input/Output functions

pub enum GuessInput {
    Valid(String),
    Invalid,
    Exit,
    NewGame,
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Read one line; `None` at end of input or on a read error.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            None
        }
    }
}

pub fn display_welcome(info: &WelcomeInfo) {
    println!("Welcome to the game of Wordle! The computer has picked its word,");
    println!("please begin guessing.");
    if info.mode == GameMode::Adversarial {
        println!("(Careful: this computer does not play fair.)");
    }
    println!();
    println!(
        "The word has {} letters. You have {} guesses.",
        info.word_length, info.max_guesses
    );
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> GuessInput {
    println!("\nWhat is your next guess? ('{NEW_GAME_COMMAND}' for a new game, '{EXIT_COMMAND}' to quit)");
    let Some(input) = read_trimmed_line(reader) else {
        return GuessInput::Exit;
    };
    let input = input.to_lowercase();

    match input.as_str() {
        EXIT_COMMAND => GuessInput::Exit,
        NEW_GAME_COMMAND => GuessInput::NewGame,
        _ if is_valid_word(&input) => GuessInput::Valid(input),
        _ => {
            println!("Invalid guess. Please enter letters only.");
            GuessInput::Invalid
        }
    }
}

pub fn display_response(response: &Result<GuessOutcome, GuessError>, guesses_remaining: u32) {
    println!();
    println!("{}", response_text(response));
    if let Ok(GuessOutcome::Feedback(_)) = response {
        println!("({guesses_remaining} guesses remaining)");
    }
}

pub fn display_game_over(status: GameStatus, word: &str) {
    println!();
    match status {
        GameStatus::Won => println!("{CORRECT_GUESS_MESSAGE} You found it."),
        GameStatus::Lost => println!("Out of guesses."),
        GameStatus::InProgress => {}
    }
    println!("Game Over! The word was: {word}");
}

pub fn read_play_again<R: BufRead>(reader: &mut R) -> bool {
    println!("Would you like to play again? y/yes or n/no?");
    match read_trimmed_line(reader) {
        Some(answer) => !answer.to_lowercase().starts_with('n'),
        None => false,
    }
}

pub fn display_exit_message() {
    println!("Goodbye.");
}

/// CLI implementation of the `GameInterface` trait.
/// Wraps a `BufRead` so games can be scripted from any input.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_welcome(&mut self, info: &WelcomeInfo) {
        display_welcome(info);
    }

    fn read_guess(&mut self) -> Option<UserAction> {
        match read_guess(&mut self.reader) {
            GuessInput::Valid(guess) => Some(UserAction::Guess(guess)),
            GuessInput::Exit => Some(UserAction::Exit),
            GuessInput::NewGame => Some(UserAction::NewGame),
            GuessInput::Invalid => None,
        }
    }

    fn display_response(
        &mut self,
        _guess: &str,
        response: &Result<GuessOutcome, GuessError>,
        guesses_remaining: u32,
    ) {
        display_response(response, guesses_remaining);
    }

    fn display_game_over(&mut self, status: GameStatus, word: &str) {
        display_game_over(status, word);
    }

    fn read_play_again(&mut self) -> bool {
        read_play_again(&mut self.reader)
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["absurdle"]).unwrap();
        assert_eq!(cli.dictionary_path, None);
        assert_eq!(cli.mode, GameMode::Adversarial);
        assert_eq!(cli.max_guesses, 6);
        assert_eq!(cli.seed, None);
        assert!(!cli.tui);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_cli_all_options() {
        let cli = Cli::try_parse_from([
            "absurdle", "-i", "words.txt", "--mode", "classic", "-g", "8", "--seed", "42", "--tui",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.dictionary_path.as_deref(), Some("words.txt"));
        assert_eq!(cli.mode, GameMode::Classic);
        assert_eq!(cli.max_guesses, 8);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.tui);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_cli_rejects_zero_guesses() {
        assert!(Cli::try_parse_from(["absurdle", "-g", "0"]).is_err());
    }

    #[test]
    fn test_parse_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["absurdle", "--mode", "easy"]).is_err());
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("crane"));
        assert!(is_valid_word("CRANE"));
        assert!(is_valid_word("abc"));
        assert!(!is_valid_word("cr4ne"));
        assert!(!is_valid_word("cra ne"));
        assert!(!is_valid_word(""));
    }

    #[test]
    fn test_read_guess_lowercases() {
        let mut reader = Cursor::new("  CRANE  \n");
        match read_guess(&mut reader) {
            GuessInput::Valid(word) => assert_eq!(word, "crane"),
            _ => panic!("Expected Valid guess"),
        }
    }

    #[test]
    fn test_read_guess_commands() {
        let mut reader = Cursor::new("/quit\n/NEW\n");
        assert!(matches!(read_guess(&mut reader), GuessInput::Exit));
        assert!(matches!(read_guess(&mut reader), GuessInput::NewGame));
    }

    #[test]
    fn test_read_guess_plain_words_are_guesses() {
        // words that look like commands are still words
        let mut reader = Cursor::new("next\nexit\n");
        assert!(matches!(read_guess(&mut reader), GuessInput::Valid(w) if w == "next"));
        assert!(matches!(read_guess(&mut reader), GuessInput::Valid(w) if w == "exit"));
    }

    #[test]
    fn test_read_guess_invalid() {
        let mut reader = Cursor::new("cr4ne\n\n");
        assert!(matches!(read_guess(&mut reader), GuessInput::Invalid));
        assert!(matches!(read_guess(&mut reader), GuessInput::Invalid));
    }

    #[test]
    fn test_read_guess_end_of_input_exits() {
        let mut reader = Cursor::new("");
        assert!(matches!(read_guess(&mut reader), GuessInput::Exit));
    }

    #[test]
    fn test_read_play_again() {
        let mut reader = Cursor::new("y\nyes\nNo\nn\nmaybe\n");
        assert!(read_play_again(&mut reader));
        assert!(read_play_again(&mut reader));
        assert!(!read_play_again(&mut reader));
        assert!(!read_play_again(&mut reader));
        assert!(read_play_again(&mut reader));
        // nothing left to read
        assert!(!read_play_again(&mut reader));
    }
}
