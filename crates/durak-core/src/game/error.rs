use crate::model::player::Seat;
use thiserror::Error;

/// Fatal game failures. "No card to play" and "deck empty" are ordinary
/// control flow and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("wrong players number: {found} (supported {min}..={max})")]
    InvalidPlayerCount { found: usize, min: usize, max: usize },
    #[error("player name '{0}' is used more than once")]
    DuplicatePlayer(String),
    #[error("invalid rules: {field}: {message}")]
    InvalidRules { field: String, message: String },
    #[error("trump has not been revealed")]
    TrumpNotRevealed,
    #[error("round outcome is missing for the previous round")]
    UnresolvedRound,
    #[error("failed to find a player holding cards after {0}")]
    NoEligiblePlayer(Seat),
    #[error("too many exchanges in a round (limit {limit})")]
    RoundExchangeLimit { limit: u32 },
    #[error("too many rounds (limit {limit})")]
    RoundLimit { limit: u32 },
}

impl GameError {
    /// Setup or wiring defects, as opposed to the runaway-loop guards.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            GameError::RoundExchangeLimit { .. } | GameError::RoundLimit { .. }
        )
    }
}
