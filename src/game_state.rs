use crate::candidates::CandidateSet;
use crate::dictionary::Dictionary;
use crate::error::GuessError;
use crate::feedback::{FeedbackPattern, feedback};
use crate::{debug_log, info_log};
use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_MAX_GUESSES: u32 = 6;

/// Message shown when the player pins down the secret word.
pub const CORRECT_GUESS_MESSAGE: &str = "Correct Guess!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameMode {
    /// One secret word is fixed when the game starts.
    Classic,
    /// The secret is never committed; every guess keeps the largest group of
    /// words still consistent with the feedback.
    Adversarial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub max_guesses: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_guesses: DEFAULT_MAX_GUESSES,
        }
    }
}

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Feedback(FeedbackPattern),
    Correct,
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feedback(pattern) => write!(f, "{pattern}"),
            Self::Correct => f.write_str(CORRECT_GUESS_MESSAGE),
        }
    }
}

/// Text for the player: a pattern, `Correct Guess!`, or an `Error:` line.
pub fn response_text(response: &Result<GuessOutcome, GuessError>) -> String {
    match response {
        Ok(outcome) => outcome.to_string(),
        Err(e) => e.to_string(),
    }
}

#[derive(Debug, Clone)]
enum Secret {
    Fixed(String),
    Candidates(CandidateSet),
}

/// One player's game over a shared dictionary.
#[derive(Debug, Clone)]
pub struct GameSession {
    dictionary: Arc<Dictionary>,
    mode: GameMode,
    config: GameConfig,
    rng: StdRng,
    secret: Secret,
    guesses_remaining: u32,
    current_guess: Option<String>,
    status: GameStatus,
}

impl GameSession {
    /// New session drawing its words from OS entropy.
    #[must_use]
    pub fn new(dictionary: Arc<Dictionary>, mode: GameMode, config: GameConfig) -> Self {
        Self::with_rng(dictionary, mode, config, StdRng::from_entropy())
    }

    /// New session whose word draws are reproducible for `seed`.
    #[must_use]
    pub fn with_seed(dictionary: Arc<Dictionary>, mode: GameMode, config: GameConfig, seed: u64) -> Self {
        Self::with_rng(dictionary, mode, config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(dictionary: Arc<Dictionary>, mode: GameMode, config: GameConfig, mut rng: StdRng) -> Self {
        let secret = draw_secret(&dictionary, mode, &mut rng);
        let session = Self {
            dictionary,
            mode,
            config,
            rng,
            secret,
            guesses_remaining: config.max_guesses,
            current_guess: None,
            status: opening_status(config),
        };
        log::info!(
            "New {:?} game: {} letters, {} guesses",
            session.mode,
            session.word_length(),
            session.guesses_remaining
        );
        session
    }

    /// Start a fresh game on the same dictionary.
    pub fn reset(&mut self) {
        self.secret = draw_secret(&self.dictionary, self.mode, &mut self.rng);
        self.guesses_remaining = self.config.max_guesses;
        self.current_guess = None;
        self.status = opening_status(self.config);
        log::info!("Game reset: {} letters", self.word_length());
    }

    /// Play `word`. Case is ignored and surrounding whitespace trimmed.
    ///
    /// A rejected guess returns an error and changes nothing.
    pub fn make_guess(&mut self, word: &str) -> Result<GuessOutcome, GuessError> {
        if self.game_over() {
            return Err(GuessError::GameOver);
        }
        let guess = word.trim().to_lowercase();

        if self.is_resolved_secret(&guess) {
            info_log!("Exact match on {:?}", guess);
            self.accept(guess);
            self.status = GameStatus::Won;
            return Ok(GuessOutcome::Correct);
        }

        let pattern = match &mut self.secret {
            Secret::Fixed(secret) => {
                if guess.len() != secret.len() {
                    return Err(GuessError::LengthMismatch {
                        expected: secret.len(),
                        actual: guess.len(),
                    });
                }
                if !self.dictionary.contains(&guess) {
                    return Err(GuessError::NotInDictionary(guess));
                }
                feedback(&guess, secret)
            }
            Secret::Candidates(candidates) => candidates.partition_and_keep_largest(&guess)?,
        };
        debug_log!("Guess {:?} -> {}", guess, pattern);

        self.accept(guess);
        if pattern.is_win() {
            self.status = GameStatus::Won;
            return Ok(GuessOutcome::Correct);
        }
        if self.guesses_remaining == 0 {
            self.status = GameStatus::Lost;
            log::info!("Out of guesses");
        }
        Ok(GuessOutcome::Feedback(pattern))
    }

    fn accept(&mut self, guess: String) {
        self.guesses_remaining = self.guesses_remaining.saturating_sub(1);
        self.current_guess = Some(guess);
    }

    /// True when `guess` is the secret and the secret is pinned down. An
    /// adversarial game only has a secret once a single candidate is left.
    fn is_resolved_secret(&self, guess: &str) -> bool {
        match &self.secret {
            Secret::Fixed(secret) => secret == guess,
            Secret::Candidates(candidates) => candidates.sole_candidate() == Some(guess),
        }
    }

    pub fn game_over(&self) -> bool {
        self.status != GameStatus::InProgress || self.guesses_remaining == 0
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn guesses_remaining(&self) -> u32 {
        self.guesses_remaining
    }

    pub fn current_guess(&self) -> Option<&str> {
        self.current_guess.as_deref()
    }

    pub fn word_length(&self) -> usize {
        match &self.secret {
            Secret::Fixed(secret) => secret.len(),
            Secret::Candidates(candidates) => candidates.word_length(),
        }
    }

    /// The adversary's remaining words; `None` in classic mode.
    pub fn candidates(&self) -> Option<&CandidateSet> {
        match &self.secret {
            Secret::Fixed(_) => None,
            Secret::Candidates(candidates) => Some(candidates),
        }
    }

    /// The word to reveal. Classic mode returns the secret; adversarial mode
    /// draws one of the remaining candidates at random.
    pub fn correct_word(&mut self) -> String {
        match &self.secret {
            Secret::Fixed(secret) => secret.clone(),
            Secret::Candidates(candidates) => candidates
                .choose(&mut self.rng)
                .map(str::to_string)
                .unwrap_or_default(),
        }
    }
}

/// A game with no guesses to spend is lost before it starts.
fn opening_status(config: GameConfig) -> GameStatus {
    if config.max_guesses == 0 {
        GameStatus::Lost
    } else {
        GameStatus::InProgress
    }
}

fn draw_secret(dictionary: &Arc<Dictionary>, mode: GameMode, rng: &mut StdRng) -> Secret {
    let reference = dictionary.choose(rng);
    match mode {
        GameMode::Classic => {
            debug_log!("Secret word drawn: {:?}", reference);
            Secret::Fixed(reference.to_string())
        }
        GameMode::Adversarial => {
            let candidates = CandidateSet::from_reference(Arc::clone(dictionary), reference);
            debug_log!(
                "Adversary starts with {} words of length {}",
                candidates.len(),
                candidates.word_length()
            );
            Secret::Candidates(candidates)
        }
    }
}

// Front-end boundary

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    NewGame,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeInfo {
    pub mode: GameMode,
    pub word_length: usize,
    pub max_guesses: u32,
}

/// Totals reported when the player leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaySummary {
    pub games_played: u32,
    pub games_won: u32,
}

/// Everything the game loop needs from a front end.
pub trait GameInterface {
    fn display_welcome(&mut self, info: &WelcomeInfo);

    /// `None` means the input was unusable and should be asked for again.
    fn read_guess(&mut self) -> Option<UserAction>;

    fn display_response(
        &mut self,
        guess: &str,
        response: &Result<GuessOutcome, GuessError>,
        guesses_remaining: u32,
    );

    fn display_game_over(&mut self, status: GameStatus, word: &str);

    /// Whether the player wants another game.
    fn read_play_again(&mut self) -> bool;

    fn display_exit_message(&mut self);
}

fn welcome_info(session: &GameSession) -> WelcomeInfo {
    WelcomeInfo {
        mode: session.mode(),
        word_length: session.word_length(),
        max_guesses: session.config().max_guesses,
    }
}

/// Play games on `session` until the player leaves.
pub fn game_loop<I: GameInterface>(session: &mut GameSession, interface: &mut I) -> PlaySummary {
    let mut summary = PlaySummary::default();

    'games: loop {
        interface.display_welcome(&welcome_info(session));

        while !session.game_over() {
            match interface.read_guess() {
                None => {}
                Some(UserAction::Exit) => break 'games,
                Some(UserAction::NewGame) => {
                    session.reset();
                    continue 'games;
                }
                Some(UserAction::Guess(guess)) => {
                    let response = session.make_guess(&guess);
                    if let Err(e) = &response {
                        debug_log!("Rejected guess {:?}: {}", guess, e);
                    }
                    interface.display_response(&guess, &response, session.guesses_remaining());
                }
            }
        }

        summary.games_played += 1;
        if session.status() == GameStatus::Won {
            summary.games_won += 1;
        }
        let word = session.correct_word();
        interface.display_game_over(session.status(), &word);

        if !interface.read_play_again() {
            break;
        }
        session.reset();
    }

    interface.display_exit_message();
    log::info!(
        "Leaving after {} games ({} won)",
        summary.games_played,
        summary.games_won
    );
    summary
}
