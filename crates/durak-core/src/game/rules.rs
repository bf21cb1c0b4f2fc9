use crate::game::error::GameError;
use crate::model::deck::Deck;
use serde::{Deserialize, Serialize};

/// Result string reported when nobody is left holding cards.
pub const DRAW_SENTINEL: &str = "-";

const DEFAULT_HAND_SIZE: usize = 6;
const DEFAULT_MIN_PLAYERS: usize = 2;
const DEFAULT_MAX_PLAYERS: usize = 4;
const DEFAULT_SHUFFLE_ITERATIONS: u32 = 1_000;
const DEFAULT_MAX_EXCHANGES: u32 = 100;
const DEFAULT_MAX_ROUNDS: u32 = 100;

/// Immutable rule parameters for a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub hand_size: usize,
    pub min_players: usize,
    pub max_players: usize,
    pub shuffle_iterations: u32,
    pub max_exchanges_per_round: u32,
    pub max_rounds: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            shuffle_iterations: DEFAULT_SHUFFLE_ITERATIONS,
            max_exchanges_per_round: DEFAULT_MAX_EXCHANGES,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl RulesConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.hand_size == 0 {
            return Err(invalid("hand_size", "hand size must be greater than zero"));
        }

        if self.min_players < 2 {
            return Err(invalid("min_players", "at least two players are required"));
        }

        if self.min_players > self.max_players {
            return Err(invalid(
                "max_players",
                "max_players must not be smaller than min_players",
            ));
        }

        if self.max_players.saturating_mul(self.hand_size) >= Deck::SIZE {
            return Err(invalid(
                "hand_size",
                format!(
                    "{} players with {} cards each leave no card to reveal as trump",
                    self.max_players, self.hand_size
                ),
            ));
        }

        if self.max_exchanges_per_round == 0 {
            return Err(invalid(
                "max_exchanges_per_round",
                "exchange cap must be greater than zero",
            ));
        }

        if self.max_rounds == 0 {
            return Err(invalid("max_rounds", "round cap must be greater than zero"));
        }

        Ok(())
    }

    pub fn supports_player_count(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }
}

fn invalid(field: &str, message: impl Into<String>) -> GameError {
    GameError::InvalidRules {
        field: field.to_string(),
        message: message.into(),
    }
}
