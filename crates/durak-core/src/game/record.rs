use super::engine::GameEngine;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// Summary of a game suitable for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub seed: u64,
    pub players: Vec<String>,
    pub trump: Option<Suit>,
    pub trump_card: Option<String>,
    pub rounds: u32,
    pub discarded: usize,
    /// Loser's name, the draw sentinel, or `None` while the game is running.
    pub result: Option<String>,
}

impl GameRecord {
    pub fn capture(engine: &GameEngine) -> Self {
        GameRecord {
            seed: engine.deck().seed(),
            players: engine
                .players()
                .iter()
                .map(|player| player.name().to_string())
                .collect(),
            trump: engine.trump(),
            trump_card: engine.trump_card().map(|card| card.to_string()),
            rounds: engine.rounds_played(),
            discarded: engine.discarded(),
            result: engine.outcome().map(|outcome| outcome.to_string()),
        }
    }

    pub fn to_json(engine: &GameEngine) -> serde_json::Result<String> {
        serde_json::to_string(&Self::capture(engine))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
