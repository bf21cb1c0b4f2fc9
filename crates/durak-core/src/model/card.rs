use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};

pub const WEIGHT_TRUMP_BONUS: u16 = 1000;
pub const WEIGHT_RANK_STEP: u16 = 10;

/// A playing card. Identity is the (rank, suit) pair; the weight is cached
/// once trump is known and does not take part in equality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    weight: u16,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            weight: 0,
        }
    }

    /// Builds a card whose weight is already assigned for `trump`.
    pub const fn weighted(rank: Rank, suit: Suit, trump: Suit) -> Self {
        let mut card = Self::new(rank, suit);
        card.weight = card.calculate_weight(trump);
        card
    }

    pub const fn is_trump(self, trump: Suit) -> bool {
        self.suit as u8 == trump as u8
    }

    pub const fn calculate_weight(self, trump: Suit) -> u16 {
        let bonus = if self.is_trump(trump) {
            WEIGHT_TRUMP_BONUS
        } else {
            0
        };
        bonus + self.suit.index() as u16 + self.rank.index() as u16 * WEIGHT_RANK_STEP
    }

    pub fn assign_weight(&mut self, trump: Suit) {
        self.weight = self.calculate_weight(trump);
    }

    pub const fn weight(self) -> u16 {
        self.weight
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
