// Library interface for absurdle
// This allows integration tests to access internal modules

pub mod candidates;
pub mod cli;
pub mod dictionary;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod tui;

// Re-export commonly used items for easier testing
pub use candidates::CandidateSet;
pub use dictionary::Dictionary;
pub use error::{DictionaryError, GuessError};
pub use feedback::{Feedback, FeedbackPattern, feedback};
pub use game_state::{
    GameConfig, GameInterface, GameMode, GameSession, GameStatus, GuessOutcome, PlaySummary,
    UserAction, game_loop,
};
