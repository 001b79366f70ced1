// Integration tests for absurdle
// These tests verify that all modules work together correctly

use absurdle::cli::CliInterface;
use absurdle::*;
use std::io::Cursor;
use std::sync::Arc;

fn dictionary(words: &[&str]) -> Arc<Dictionary> {
    Arc::new(Dictionary::from_words(words).unwrap())
}

#[test]
fn test_end_to_end_adversary_withholds_the_win() {
    // Dictionary from the classic example: the player names a real word on the
    // first try, but the adversary keeps a word that is not the guess
    let dict = dictionary(&["abcde", "abcdf", "bbbbb"]);
    let mut session = GameSession::with_seed(dict, GameMode::Adversarial, GameConfig::default(), 11);
    assert_eq!(session.candidates().unwrap().len(), 3);

    let outcome = session.make_guess("abcde").unwrap();
    let GuessOutcome::Feedback(pattern) = outcome else {
        panic!("adversary must not concede on the first guess");
    };
    assert_ne!(pattern.to_string(), "Correct Guess!");
    assert!(!session.game_over());

    for word in session.candidates().unwrap().iter() {
        assert_eq!(feedback("abcde", word), pattern);
    }
}

#[test]
fn test_end_to_end_console_game_classic() {
    let dict = dictionary(&["apple"]);
    let mut session = GameSession::with_seed(dict, GameMode::Classic, GameConfig::default(), 5);

    // one bad guess, then the answer, then decline another game
    let input = "grape\napple\nn\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let summary = game_loop(&mut session, &mut interface);

    assert_eq!(summary, PlaySummary { games_played: 1, games_won: 1 });
    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.guesses_remaining(), 5);
}

#[test]
fn test_console_game_lost_after_budget() {
    let words = [
        "aaaaa", "bbbbb", "ccccc", "ddddd", "eeeee", "fffff", "ggggg", "hhhhh",
    ];
    let mut session =
        GameSession::with_seed(dictionary(&words), GameMode::Adversarial, GameConfig::default(), 2);

    let input = "aaaaa\nbbbbb\nccccc\nddddd\neeeee\nfffff\nno\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let summary = game_loop(&mut session, &mut interface);

    assert_eq!(summary, PlaySummary { games_played: 1, games_won: 0 });
    assert_eq!(session.status(), GameStatus::Lost);
    assert_eq!(session.guesses_remaining(), 0);
    // the adversary never had to give up a word it still held
    assert_eq!(session.candidates().unwrap().len(), 2);
}

#[test]
fn test_console_rejected_guesses_cost_nothing() {
    let dict = dictionary(&["crane", "slate", "trace"]);
    let mut session = GameSession::with_seed(dict, GameMode::Classic, GameConfig::default(), 8);

    // wrong length, unknown word, non-letters, then end of input
    let input = "cranes\nzzzzz\ncr4ne\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let summary = game_loop(&mut session, &mut interface);

    assert_eq!(summary.games_played, 0);
    assert_eq!(session.guesses_remaining(), 6);
    assert_eq!(session.current_guess(), None);
    assert_eq!(session.status(), GameStatus::InProgress);
}

#[test]
fn test_console_play_again_resets_session() {
    let dict = dictionary(&["crane"]);
    let mut session = GameSession::with_seed(dict, GameMode::Adversarial, GameConfig::default(), 4);

    let input = "crane\ny\ncrane\nn\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let summary = game_loop(&mut session, &mut interface);

    assert_eq!(summary, PlaySummary { games_played: 2, games_won: 2 });
}

#[test]
fn test_console_new_game_command() {
    let dict = dictionary(&["crane", "slate", "trace", "grace"]);
    let mut session = GameSession::with_seed(dict, GameMode::Adversarial, GameConfig::default(), 4);

    let input = "crane\n/new\n/quit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let summary = game_loop(&mut session, &mut interface);

    assert_eq!(summary.games_played, 0);
    assert_eq!(session.guesses_remaining(), 6);
    assert_eq!(session.candidates().unwrap().len(), 4);
}

#[test]
fn test_termination_within_budget() {
    // whatever the player does, six accepted guesses end the game
    let dict = Arc::new(Dictionary::embedded().unwrap());
    let mut session = GameSession::with_seed(dict, GameMode::Adversarial, GameConfig::default(), 99);
    let length = session.word_length();
    let guesses: Vec<String> = session
        .candidates()
        .unwrap()
        .iter()
        .take(6)
        .map(str::to_string)
        .collect();
    assert_eq!(guesses.len(), 6, "embedded list has at least six words of length {length}");

    for guess in &guesses {
        if session.game_over() {
            break;
        }
        session.make_guess(guess).unwrap();
    }
    assert!(session.game_over());
}

#[test]
fn test_adversarial_candidates_shrink_monotonically() {
    let dict = Arc::new(Dictionary::embedded().unwrap());
    let mut session = GameSession::with_seed(
        Arc::clone(&dict),
        GameMode::Adversarial,
        GameConfig { max_guesses: 10 },
        7,
    );
    let length = session.word_length();
    let guesses: Vec<String> = dict.words_of_length(length).step_by(7).take(10).map(str::to_string).collect();

    let mut previous = session.candidates().unwrap().len();
    for guess in &guesses {
        if session.game_over() {
            break;
        }
        let outcome = session.make_guess(guess).unwrap();
        let set = session.candidates().unwrap();
        assert!(set.len() <= previous);
        assert!(!set.is_empty());
        if let GuessOutcome::Feedback(pattern) = outcome {
            assert!(set.iter().all(|w| feedback(guess, w) == pattern));
        }
        previous = set.len();
    }
}

#[test]
fn test_custom_dictionary_file_to_game() {
    use std::fs::File;
    use std::io::Write;

    let path = std::env::temp_dir().join("absurdle_integration_dictionary.txt");
    {
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Apple").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  grape  ").unwrap();
        writeln!(file, "lemon").unwrap();
    }

    let dict = Arc::new(Dictionary::load_from_file(&path).unwrap());
    assert_eq!(dict.len(), 3);
    assert!(dict.contains("apple"));

    let mut session = GameSession::with_seed(dict, GameMode::Classic, GameConfig::default(), 3);
    let secret = session.correct_word();
    let input = format!("{}\nn\n", secret.to_uppercase());
    let mut interface = CliInterface::new(Cursor::new(input));
    let summary = game_loop(&mut session, &mut interface);
    assert_eq!(summary.games_won, 1);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_empty_dictionary_refuses_to_start() {
    assert!(matches!(
        Dictionary::load_from_str("\n\n  \n"),
        Err(DictionaryError::Empty)
    ));
}

#[test]
fn test_sessions_share_one_dictionary() {
    let dict = dictionary(&["crane", "slate", "trace", "grace"]);
    let mut first = GameSession::with_seed(Arc::clone(&dict), GameMode::Adversarial, GameConfig::default(), 1);
    let second = GameSession::with_seed(Arc::clone(&dict), GameMode::Adversarial, GameConfig::default(), 1);

    first.make_guess("crane").unwrap();
    assert!(first.candidates().unwrap().len() < 4);
    assert_eq!(second.candidates().unwrap().len(), 4);
    assert_eq!(dict.len(), 4);
}
