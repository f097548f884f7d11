//! Deck composition policy.

use crate::card::{Card, Rank, Suit};
use crate::error::DeckError;

/// Builds decks of a fixed composition.
///
/// A factory pins down which cards a deck contains: every suited card whose
/// rank is at least `lowest_rank`, plus a number of jokers. The same factory
/// always generates the same deck, in the same order.
///
/// # Example
///
/// ```
/// use durakrs::DeckFactory;
///
/// let factory = DeckFactory::new(6, 0).unwrap();
/// assert_eq!(factory.card_count(), 36);
/// assert_eq!(factory.generate().len(), 36);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckFactory {
    lowest_rank: u8,
    jokers: usize,
}

impl DeckFactory {
    /// Creates a factory for decks starting at `lowest_rank` (an ordering
    /// key, 2 through 11) with `jokers` jokers.
    ///
    /// At 11 the deck holds only face cards and aces.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidLowestRank`] when `lowest_rank` is
    /// outside 2..=11.
    pub const fn new(lowest_rank: u8, jokers: usize) -> Result<Self, DeckError> {
        if lowest_rank < 2 || lowest_rank > 11 {
            return Err(DeckError::InvalidLowestRank);
        }
        Ok(Self {
            lowest_rank,
            jokers,
        })
    }

    /// The lowest rank key included in generated decks.
    #[must_use]
    pub const fn lowest_rank(self) -> u8 {
        self.lowest_rank
    }

    /// The number of jokers in generated decks.
    #[must_use]
    pub const fn jokers(self) -> usize {
        self.jokers
    }

    /// The number of cards a generated deck will contain, computed without
    /// generating one.
    #[must_use]
    pub const fn card_count(self) -> usize {
        4 * (15 - self.lowest_rank as usize) + self.jokers
    }

    /// Generates a fresh, unshuffled deck.
    ///
    /// Suited cards come first, grouped by suit in [`Suit::ALL`] order with
    /// ranks ascending, followed by the jokers.
    #[must_use]
    pub fn generate(self) -> Vec<Card> {
        let mut deck = Vec::with_capacity(self.card_count());
        for suit in Suit::ALL {
            for rank in Rank::SUITED {
                if rank.key().is_some_and(|key| key >= self.lowest_rank) {
                    deck.push(Card::suited(rank, suit));
                }
            }
        }
        for _ in 0..self.jokers {
            deck.push(Card::joker());
        }
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_rank_is_range_checked() {
        assert_eq!(DeckFactory::new(1, 0), Err(DeckError::InvalidLowestRank));
        assert_eq!(DeckFactory::new(12, 0), Err(DeckError::InvalidLowestRank));
        assert!(DeckFactory::new(11, 0).is_ok());
    }

    #[test]
    fn card_count_matches_generation() {
        for lowest_rank in 2..=11 {
            for jokers in 0..3 {
                let factory = DeckFactory::new(lowest_rank, jokers).unwrap();
                assert_eq!(factory.generate().len(), factory.card_count());
            }
        }
    }

    #[test]
    fn suited_cards_are_unique() {
        let mut deck = DeckFactory::new(6, 0).unwrap().generate();
        deck.sort_unstable_by_key(|card| card.code());
        let before = deck.len();
        deck.dedup();
        assert_eq!(deck.len(), before);
        assert!(deck.iter().all(|card| !card.is_joker()));
    }

    #[test]
    fn face_card_deck_starts_at_the_jack() {
        let deck = DeckFactory::new(11, 0).unwrap().generate();
        assert_eq!(deck.len(), 16);
        assert!(deck
            .iter()
            .all(|card| card.rank().key().is_some_and(|key| key >= 11)));
    }
}
