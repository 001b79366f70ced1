use absurdle::cli::{CliInterface, parse_cli};
use absurdle::dictionary::Dictionary;
use absurdle::game_state::{GameConfig, GameSession, game_loop};
use absurdle::logging::init_logging;
use absurdle::tui::TuiInterface;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = parse_cli();

    match init_logging(cli.verbose, cli.tui) {
        Ok(Some(path)) => log::info!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Failed to set up log file: {e}"),
    }

    let dictionary = match &cli.dictionary_path {
        Some(path) => Dictionary::load_from_file(path).map_err(|e| (path.as_str(), e)),
        None => Dictionary::embedded().map_err(|e| ("<embedded>", e)),
    };
    let dictionary = match dictionary {
        Ok(dictionary) => Arc::new(dictionary),
        Err((path, e)) => {
            log::error!("Dictionary load failed: {e}");
            eprintln!("Failed to load dictionary from '{path}': {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = GameConfig {
        max_guesses: cli.max_guesses,
    };
    let mut session = match cli.seed {
        Some(seed) => GameSession::with_seed(dictionary, cli.mode, config, seed),
        None => GameSession::new(dictionary, cli.mode, config),
    };

    let summary = if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&mut session, &mut interface),
            Err(e) => {
                eprintln!("Failed to start the terminal UI: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut session, &mut interface)
    };

    if summary.games_played > 0 {
        println!(
            "You won {} of {} games.",
            summary.games_won, summary.games_played
        );
    }
    ExitCode::SUCCESS
}
