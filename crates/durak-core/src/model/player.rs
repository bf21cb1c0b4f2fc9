use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Position of a player in the fixed seating order of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(usize);

impl Seat {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// A named participant. The name is unique within a game and doubles as
/// the player's identity in results.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    hand: Hand,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_hand(name, Hand::new())
    }

    pub fn with_hand(name: impl Into<String>, hand: Hand) -> Self {
        Self {
            name: name.into(),
            hand,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// A player with cards is still in the game.
    pub fn has_cards(&self) -> bool {
        !self.hand.is_empty()
    }
}
