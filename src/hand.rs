//! A player's hand, kept sorted for display and search.

use crate::card::{Card, Suit};
use crate::error::HandError;

/// Display order of the suit partitions.
const SUIT_ORDER: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Clubs, Suit::Hearts];

const fn slot(suit: Suit) -> usize {
    match suit {
        Suit::Spades => 0,
        Suit::Diamonds => 1,
        Suit::Clubs => 2,
        Suit::Hearts => 3,
    }
}

// Partition cards never carry a joker, so every rank has a key.
fn rank_key(card: &Card) -> u8 {
    card.rank().key().unwrap_or(0)
}

/// A hand of suited cards.
///
/// Cards are partitioned by suit (spades, diamonds, clubs, hearts) and kept
/// in ascending rank order within each partition; [`Hand::iter`] yields them
/// in that fixed order. A hand never holds duplicates or jokers. Two hands
/// are equal iff they hold the same cards, regardless of how they got them.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    by_suit: [Vec<Card>; 4],
    mod_count: u64,
}

// The modification counter is iteration bookkeeping, not card state.
impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.by_suit == other.by_suit
    }
}

impl Eq for Hand {}

impl Hand {
    /// Creates an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a card to the hand.
    pub(crate) fn receive(&mut self, card: Card) -> Result<(), HandError> {
        let Some(suit) = card.suit() else {
            return Err(HandError::Unsuited);
        };
        let partition = &mut self.by_suit[slot(suit)];
        match partition.binary_search_by_key(&rank_key(&card), rank_key) {
            Ok(_) => Err(HandError::DuplicateCard),
            Err(pos) => {
                partition.insert(pos, card);
                self.mod_count += 1;
                Ok(())
            }
        }
    }

    /// Removes a card from the hand; returns whether it was held.
    pub(crate) fn discard(&mut self, card: &Card) -> bool {
        let Some(suit) = card.suit() else {
            return false;
        };
        let partition = &mut self.by_suit[slot(suit)];
        match partition.binary_search_by_key(&rank_key(card), rank_key) {
            Ok(pos) => {
                partition.remove(pos);
                self.mod_count += 1;
                true
            }
            Err(_) => false,
        }
    }

    /// The number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_suit.iter().map(Vec::len).sum()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_suit.iter().all(Vec::is_empty)
    }

    /// Returns whether the hand holds `card`.
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        card.suit().is_some_and(|suit| {
            self.by_suit[slot(suit)]
                .binary_search_by_key(&rank_key(card), rank_key)
                .is_ok()
        })
    }

    /// The lowest-ranked card of `suit`, if any.
    #[must_use]
    pub fn lowest(&self, suit: Suit) -> Option<Card> {
        self.by_suit[slot(suit)].first().copied()
    }

    /// Iterates the cards in display order: spades, diamonds, clubs,
    /// hearts, ascending rank within each suit.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        SUIT_ORDER
            .into_iter()
            .flat_map(|suit| self.by_suit[slot(suit)].iter().copied())
    }

    /// Iterates the non-empty suit partitions in display order.
    pub fn by_suit(&self) -> impl Iterator<Item = (Suit, &[Card])> + '_ {
        SUIT_ORDER.into_iter().filter_map(|suit| {
            let partition = self.by_suit[slot(suit)].as_slice();
            (!partition.is_empty()).then_some((suit, partition))
        })
    }

    /// The size of the largest suit partition.
    #[must_use]
    pub fn max_suit_count(&self) -> usize {
        self.by_suit.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Creates a cursor over the hand's cards that can be stepped across
    /// separate borrows of the hand.
    #[must_use]
    pub const fn cursor(&self) -> HandCursor {
        HandCursor {
            mark: self.mod_count,
            suit: 0,
            index: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = Card;
    type IntoIter = Box<dyn Iterator<Item = Card> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// A resumable position in a [`Hand`]'s display order.
///
/// Unlike [`Hand::iter`], a cursor does not borrow the hand between steps,
/// so the hand may be handed out mutably in the meantime. The cursor
/// remembers the hand's modification counter and refuses to continue once
/// the hand has changed.
///
/// # Example
///
/// ```
/// use durakrs::{Game, GameOptions};
///
/// let game = Game::new(GameOptions::default(), 1).unwrap();
/// let hand = game.player(0).unwrap().hand();
/// let mut cursor = hand.cursor();
/// while let Some(card) = cursor.next(hand).unwrap() {
///     println!("{card}");
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HandCursor {
    mark: u64,
    suit: usize,
    index: usize,
}

impl HandCursor {
    /// Advances to the next card, or `None` past the end.
    ///
    /// # Errors
    ///
    /// Returns [`HandError::ConcurrentModification`] if `hand` has changed
    /// since this cursor was created.
    pub fn next(&mut self, hand: &Hand) -> Result<Option<Card>, HandError> {
        if self.mark != hand.mod_count {
            return Err(HandError::ConcurrentModification);
        }
        while self.suit < SUIT_ORDER.len() {
            let partition = &hand.by_suit[slot(SUIT_ORDER[self.suit])];
            if let Some(card) = partition.get(self.index) {
                self.index += 1;
                return Ok(Some(*card));
            }
            self.suit += 1;
            self.index = 0;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;

    fn card(code: &str) -> Card {
        Card::from_code(code).unwrap()
    }

    fn hand_of(codes: &[&str]) -> Hand {
        let mut hand = Hand::new();
        for code in codes {
            hand.receive(card(code)).unwrap();
        }
        hand
    }

    #[test]
    fn cards_sort_by_suit_then_rank() {
        let hand = hand_of(&["QH", "2S", "AS", "10D", "JC", "3D"]);
        let order: Vec<String> = hand.iter().map(|c| c.code()).collect();
        assert_eq!(order, ["2S", "AS", "3D", "10D", "JC", "QH"]);
        assert_eq!(hand.len(), 6);
    }

    #[test]
    fn duplicates_and_jokers_are_refused() {
        let mut hand = hand_of(&["QH"]);
        assert_eq!(hand.receive(card("QH")), Err(HandError::DuplicateCard));
        assert_eq!(
            hand.receive(Card::new(Rank::Joker, None).unwrap()),
            Err(HandError::Unsuited)
        );
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn discard_reports_membership() {
        let mut hand = hand_of(&["QH", "2S"]);
        assert!(hand.discard(&card("QH")));
        assert!(!hand.discard(&card("QH")));
        assert!(!hand.contains(&card("QH")));
        assert!(hand.contains(&card("2S")));
    }

    #[test]
    fn suit_partitions_skip_empty_suits() {
        let hand = hand_of(&["QH", "2H", "JC"]);
        let partitions: Vec<(Suit, usize)> = hand
            .by_suit()
            .map(|(suit, cards)| (suit, cards.len()))
            .collect();
        assert_eq!(partitions, [(Suit::Clubs, 1), (Suit::Hearts, 2)]);
        assert_eq!(hand.max_suit_count(), 2);
    }

    #[test]
    fn equality_ignores_mutation_history() {
        let mut churned = hand_of(&["QH", "2S"]);
        let fresh = hand_of(&["2S", "QH"]);
        assert_eq!(churned, fresh);
        churned.receive(card("3S")).unwrap();
        assert_ne!(churned, fresh);
        churned.discard(&card("3S"));
        assert_eq!(churned, fresh);
    }

    #[test]
    fn cursor_walks_display_order() {
        let hand = hand_of(&["QH", "2S", "JC"]);
        let mut cursor = hand.cursor();
        let mut seen = Vec::new();
        while let Some(card) = cursor.next(&hand).unwrap() {
            seen.push(card.code());
        }
        assert_eq!(seen, ["2S", "JC", "QH"]);
        assert_eq!(cursor.next(&hand).unwrap(), None);
    }

    #[test]
    fn cursor_detects_modification() {
        let mut hand = hand_of(&["QH", "2S"]);
        let mut cursor = hand.cursor();
        assert_eq!(cursor.next(&hand).unwrap(), Some(card("2S")));
        hand.receive(card("3S")).unwrap();
        assert_eq!(cursor.next(&hand), Err(HandError::ConcurrentModification));
        // A fresh cursor picks up the new state.
        let mut cursor = hand.cursor();
        assert_eq!(cursor.next(&hand).unwrap(), Some(card("2S")));
        assert_eq!(cursor.next(&hand).unwrap(), Some(card("3S")));
    }
}
