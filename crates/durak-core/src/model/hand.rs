use crate::model::card::Card;
use crate::model::suit::Suit;
use crate::model::table::TableStack;
use core::fmt;
use std::vec::Vec;

/// A player's holdings, kept sorted ascending by weight after every mutation.
///
/// Selection policies return an index into [`Hand::cards`]; that index is the
/// handle passed back to [`Hand::take`]. Cards within a hand are unique.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    /// Removes and returns the card at `index`, as handed out by a selection policy.
    pub fn take(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Removes `card` if held. Absent cards are ignored.
    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn assign_weights(&mut self, trump: Suit) {
        for card in self.cards.iter_mut() {
            card.assign_weight(trump);
        }
        self.sort();
    }

    /// Picks the next attacking card.
    ///
    /// On an empty table this is the cheapest card. Otherwise it is the cheapest
    /// card whose rank is already on the table, never spending the hand's top
    /// card when that card is a trump.
    pub fn attacking_card(&self, table: &TableStack, trump: Suit) -> Option<usize> {
        if !table.has_cards() {
            return if self.cards.is_empty() { None } else { Some(0) };
        }

        let last = self.cards.len().checked_sub(1)?;
        self.cards
            .iter()
            .enumerate()
            .filter(|&(index, card)| !(index == last && card.is_trump(trump)))
            .find(|(_, card)| table.contains_rank(card.rank))
            .map(|(index, _)| index)
    }

    /// Picks the cheapest card that beats `attacking`, if any.
    pub fn defending_card(&self, attacking: &Card, trump: Suit) -> Option<usize> {
        let same_suit = self
            .cards
            .iter()
            .position(|card| card.suit == attacking.suit && card.weight() > attacking.weight());
        if same_suit.is_some() {
            return same_suit;
        }

        if !attacking.is_trump(trump) {
            return self.cards.iter().position(|card| card.is_trump(trump));
        }

        self.cards
            .iter()
            .position(|card| card.is_trump(trump) && card.weight() > attacking.weight())
    }

    /// After a failed defence the attacker hands over every non-trump card
    /// whose rank is already on the table. Returns how many cards moved.
    pub fn dump_matching_to(&mut self, table: &mut TableStack, trump: Suit) -> usize {
        let ranks = table.ranks();
        let (dumped, kept): (Vec<Card>, Vec<Card>) = self
            .cards
            .drain(..)
            .partition(|card| !card.is_trump(trump) && ranks.contains(&card.rank));
        self.cards = kept;
        let moved = dumped.len();
        for card in dumped {
            table.add(card);
        }
        moved
    }

    /// Picks up every card on the table. The caller clears the table afterwards.
    pub fn take_table(&mut self, table: &TableStack) {
        self.cards.extend_from_slice(table.cards());
        self.sort();
    }

    fn sort(&mut self) {
        self.cards.sort_by_key(|card| card.weight());
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, card) in self.cards.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::model::table::TableStack;

    const TRUMP: Suit = Suit::Hearts;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::weighted(rank, suit, TRUMP)
    }

    fn hand(cards: &[(Rank, Suit)]) -> Hand {
        Hand::with_cards(cards.iter().map(|&(r, s)| card(r, s)).collect())
    }

    fn is_sorted(hand: &Hand) -> bool {
        hand.cards().windows(2).all(|w| w[0].weight() <= w[1].weight())
    }

    #[test]
    fn add_and_remove_keep_weight_order() {
        let mut hand = Hand::new();
        hand.add(card(Rank::Six, Suit::Hearts));
        hand.add(card(Rank::Ace, Suit::Spades));
        hand.add(card(Rank::Seven, Suit::Clubs));
        assert!(is_sorted(&hand));
        assert_eq!(hand.cards()[2], Card::new(Rank::Six, Suit::Hearts));

        assert!(hand.remove(Card::new(Rank::Ace, Suit::Spades)));
        assert!(is_sorted(&hand));
        assert!(!hand.remove(Card::new(Rank::Ace, Suit::Spades)));
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn take_out_of_range_is_none() {
        let mut hand = hand(&[(Rank::Six, Suit::Spades)]);
        assert_eq!(hand.take(3), None);
        assert_eq!(hand.take(0), Some(Card::new(Rank::Six, Suit::Spades)));
        assert!(hand.is_empty());
    }

    #[test]
    fn opening_attack_is_cheapest_card() {
        let hand = hand(&[
            (Rank::King, Suit::Spades),
            (Rank::Six, Suit::Hearts),
            (Rank::Eight, Suit::Diamonds),
        ]);
        let table = TableStack::new();
        let index = hand.attacking_card(&table, TRUMP).unwrap();
        assert_eq!(hand.cards()[index], Card::new(Rank::Eight, Suit::Diamonds));
        assert_eq!(Hand::new().attacking_card(&table, TRUMP), None);
    }

    #[test]
    fn follow_up_attack_matches_table_rank() {
        let hand = hand(&[
            (Rank::Seven, Suit::Spades),
            (Rank::Nine, Suit::Clubs),
            (Rank::Nine, Suit::Diamonds),
        ]);
        let mut table = TableStack::new();
        table.add(card(Rank::Nine, Suit::Spades));
        table.add(card(Rank::Ten, Suit::Spades));
        let index = hand.attacking_card(&table, TRUMP).unwrap();
        assert_eq!(hand.cards()[index], Card::new(Rank::Nine, Suit::Clubs));
    }

    #[test]
    fn follow_up_attack_keeps_top_trump() {
        let hand = hand(&[(Rank::Seven, Suit::Spades), (Rank::Ten, Suit::Hearts)]);
        let mut table = TableStack::new();
        table.add(card(Rank::Ten, Suit::Clubs));
        assert_eq!(hand.attacking_card(&table, TRUMP), None);
    }

    #[test]
    fn follow_up_attack_may_use_lower_trump() {
        let hand = hand(&[(Rank::Ten, Suit::Hearts), (Rank::Ace, Suit::Hearts)]);
        let mut table = TableStack::new();
        table.add(card(Rank::Ten, Suit::Clubs));
        let index = hand.attacking_card(&table, TRUMP).unwrap();
        assert_eq!(hand.cards()[index], Card::new(Rank::Ten, Suit::Hearts));
    }

    #[test]
    fn follow_up_attack_may_use_top_card_when_not_trump() {
        let hand = hand(&[(Rank::Six, Suit::Clubs), (Rank::Queen, Suit::Spades)]);
        let mut table = TableStack::new();
        table.add(card(Rank::Queen, Suit::Diamonds));
        let index = hand.attacking_card(&table, TRUMP).unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn defence_prefers_cheapest_same_suit() {
        let hand = hand(&[
            (Rank::Six, Suit::Hearts),
            (Rank::Jack, Suit::Clubs),
            (Rank::Queen, Suit::Clubs),
        ]);
        let attack = card(Rank::Ten, Suit::Clubs);
        let index = hand.defending_card(&attack, TRUMP).unwrap();
        assert_eq!(hand.cards()[index], Card::new(Rank::Jack, Suit::Clubs));
    }

    #[test]
    fn defence_falls_back_to_lowest_trump() {
        let hand = hand(&[
            (Rank::Six, Suit::Clubs),
            (Rank::Ace, Suit::Hearts),
            (Rank::Seven, Suit::Hearts),
        ]);
        let attack = card(Rank::Ten, Suit::Clubs);
        let index = hand.defending_card(&attack, TRUMP).unwrap();
        assert_eq!(hand.cards()[index], Card::new(Rank::Seven, Suit::Hearts));
    }

    #[test]
    fn trump_attack_needs_higher_trump() {
        let low = hand(&[(Rank::Six, Suit::Hearts), (Rank::Ace, Suit::Spades)]);
        let attack = card(Rank::Eight, Suit::Hearts);
        assert_eq!(low.defending_card(&attack, TRUMP), None);

        let high = hand(&[(Rank::Six, Suit::Hearts), (Rank::Nine, Suit::Hearts)]);
        let index = high.defending_card(&attack, TRUMP).unwrap();
        assert_eq!(high.cards()[index], Card::new(Rank::Nine, Suit::Hearts));
    }

    #[test]
    fn defence_fails_without_beating_card() {
        let hand = hand(&[(Rank::Six, Suit::Clubs), (Rank::Ace, Suit::Spades)]);
        let attack = card(Rank::Ten, Suit::Clubs);
        assert_eq!(hand.defending_card(&attack, TRUMP), None);
    }

    #[test]
    fn dump_moves_matching_plain_cards_only() {
        let mut hand = hand(&[
            (Rank::Seven, Suit::Clubs),
            (Rank::Seven, Suit::Hearts),
            (Rank::Nine, Suit::Diamonds),
            (Rank::Jack, Suit::Spades),
        ]);
        let mut table = TableStack::new();
        table.add(card(Rank::Seven, Suit::Spades));
        table.add(card(Rank::Nine, Suit::Spades));

        let moved = hand.dump_matching_to(&mut table, TRUMP);
        assert_eq!(moved, 2);
        assert_eq!(table.len(), 4);
        assert!(table.cards().contains(&Card::new(Rank::Seven, Suit::Clubs)));
        assert!(table.cards().contains(&Card::new(Rank::Nine, Suit::Diamonds)));
        assert!(hand.contains(Card::new(Rank::Seven, Suit::Hearts)));
        assert!(hand.contains(Card::new(Rank::Jack, Suit::Spades)));
        assert!(is_sorted(&hand));
    }

    #[test]
    fn take_table_collects_everything_in_order() {
        let mut hand = hand(&[(Rank::King, Suit::Spades)]);
        let mut table = TableStack::new();
        table.add(card(Rank::Six, Suit::Hearts));
        table.add(card(Rank::Six, Suit::Clubs));
        hand.take_table(&table);
        assert_eq!(hand.len(), 3);
        assert!(is_sorted(&hand));
        assert_eq!(hand.to_string(), "6♣, K♠, 6♥");
    }
}
