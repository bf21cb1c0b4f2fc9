use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::collections::VecDeque;

/// The 36-card stock. Cards leave from the front only; the revealed trump
/// card sits at the back until it is the last one drawn.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
    seed: u64,
    trump: Option<Suit>,
}

impl Deck {
    pub const SIZE: usize = Suit::ALL.len() * Rank::ORDERED.len();

    /// Canonical build order: suits outer, ranks inner.
    pub fn standard() -> Self {
        let mut cards = VecDeque::with_capacity(Self::SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push_back(Card::new(rank, suit));
            }
        }
        Self {
            cards,
            seed: 0,
            trump: None,
        }
    }

    pub fn shuffled_with_seed(seed: u64, iterations: u32) -> Self {
        let mut deck = Self::standard();
        deck.seed = seed;
        deck.shuffle_in_place(iterations);
        deck
    }

    /// Rebuilds a deck mid-game from explicit cards, e.g. for scenario setups.
    /// Weights are assigned against `trump`.
    pub fn from_cards(seed: u64, cards: impl IntoIterator<Item = Card>, trump: Suit) -> Self {
        let mut deck = Self {
            cards: cards.into_iter().collect(),
            seed,
            trump: Some(trump),
        };
        deck.assign_weights();
        deck
    }

    /// Repeatedly moves the card at `(seed + 2i) mod len` to the front.
    /// The permutation is part of the game's reproducibility contract.
    pub fn shuffle_in_place(&mut self, iterations: u32) {
        let len = self.cards.len() as u64;
        if len == 0 {
            return;
        }
        let base = self.seed % len;
        for i in 0..u64::from(iterations) {
            let index = ((base + (i * 2) % len) % len) as usize;
            if let Some(card) = self.cards.remove(index) {
                self.cards.push_front(card);
            }
        }
    }

    /// Moves the front card to the back and makes its suit trump.
    pub fn reveal_trump(&mut self) -> Option<Suit> {
        let card = self.cards.pop_front()?;
        self.cards.push_back(card);
        self.trump = Some(card.suit);
        self.trump
    }

    pub fn assign_weights(&mut self) {
        if let Some(trump) = self.trump {
            for card in self.cards.iter_mut() {
                card.assign_weight(trump);
            }
        }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
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

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    /// The face-up card at the bottom of the stock, while it is still there.
    pub fn trump_card(&self) -> Option<&Card> {
        self.trump.and_then(|_| self.cards.back())
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
