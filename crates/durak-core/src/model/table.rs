use crate::model::card::Card;
use crate::model::rank::Rank;

/// Cards played during the current round, in play order
/// (attack, defence, attack, defence, ...).
#[derive(Debug, Clone, Default)]
pub struct TableStack {
    cards: Vec<Card>,
}

impl TableStack {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(12),
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn ranks(&self) -> Vec<Rank> {
        self.cards.iter().map(|card| card.rank).collect()
    }

    pub fn contains_rank(&self, rank: Rank) -> bool {
        self.cards.iter().any(|card| card.rank == rank)
    }

    /// Clears the table, handing back whatever was on it.
    pub fn purify(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn has_cards(&self) -> bool {
        !self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
