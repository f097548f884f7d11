//! Shuffling and dealing.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::error::DealError;

/// The outcome of a deal: the undealt stock and the dealt hands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal<T> {
    /// Cards withheld from the deal.
    pub stock: Vec<T>,
    /// One dealt hand per requested seat, in seat order.
    pub hands: Vec<Vec<T>>,
}

/// The card-preparation seam used by [`Game::start_with`](crate::Game::start_with).
///
/// [`Dealer`] implements it with seeded randomness; tests and embedders can
/// implement it to script exact deals.
pub trait Dealing {
    /// Shuffles a deck `times` times.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::InvalidShuffleTimes`] if `times` is zero.
    fn shuffle_deck(&mut self, deck: Vec<Card>, times: usize) -> Result<Vec<Card>, DealError>;

    /// Deals `cards_per_hand` cards to each of `hand_count` hands, one card
    /// at a time, leaving the rest at the tail of the deck as the stock.
    ///
    /// # Errors
    ///
    /// Returns a [`DealError`] if the deck cannot be dealt as requested.
    fn deal_deck(
        &mut self,
        deck: Vec<Card>,
        hand_count: usize,
        cards_per_hand: usize,
    ) -> Result<Deal<Card>, DealError>;
}

/// Shuffles and deals decks of arbitrary items.
///
/// A dealer owns its own deterministic random stream; two dealers built from
/// the same seed shuffle identically.
///
/// # Example
///
/// ```
/// use durakrs::{Dealer, DeckFactory};
///
/// let mut dealer = Dealer::new(7);
/// let deck = dealer
///     .shuffle(DeckFactory::new(6, 0).unwrap().generate(), 3)
///     .unwrap();
/// let deal = Dealer::deal_hands(deck, 2, 6).unwrap();
/// assert_eq!(deal.stock.len(), 24);
/// assert_eq!(deal.hands.iter().map(Vec::len).collect::<Vec<_>>(), [6, 6]);
/// ```
#[derive(Debug, Clone)]
pub struct Dealer {
    rng: ChaCha8Rng,
}

impl Dealer {
    /// Creates a dealer with the given random seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffles `deck` with `times` Fisher–Yates passes and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::InvalidShuffleTimes`] if `times` is zero.
    pub fn shuffle<T>(&mut self, mut deck: Vec<T>, times: usize) -> Result<Vec<T>, DealError> {
        if times == 0 {
            return Err(DealError::InvalidShuffleTimes);
        }
        for _ in 0..times {
            for i in (1..deck.len()).rev() {
                let other = self.rng.random_range(0..=i);
                deck.swap(i, other);
            }
        }
        Ok(deck)
    }

    /// Deals `cards_per_hand` cards to each of `hand_count` hands,
    /// `cards_per_batch` cards to a hand at a time, withholding the undealt
    /// remainder as the stock.
    ///
    /// `stock_offset` anchors the stock within the supplied deck: a
    /// non-negative value is the index of the stock's first card, a negative
    /// value locates the stock's *last* card relative to the deck's end
    /// (`-1` puts the stock at the very end). The rest of the deck is dealt
    /// front to back, one batch per hand per pass; cards within a batch
    /// arrive in reverse deck order.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::InvalidHandCount`],
    /// [`DealError::InvalidCardsPerHand`] or
    /// [`DealError::InvalidCardsPerBatch`] for non-positive counts (a batch
    /// larger than a hand is also invalid),
    /// [`DealError::InsufficientCards`] if the deck is smaller than the
    /// hands requested, and [`DealError::InvalidStockOffset`] if the stock
    /// does not fit in the deck at the given offset.
    pub fn deal<T>(
        deck: Vec<T>,
        hand_count: usize,
        cards_per_hand: usize,
        cards_per_batch: usize,
        stock_offset: isize,
    ) -> Result<Deal<T>, DealError> {
        if hand_count == 0 {
            return Err(DealError::InvalidHandCount);
        }
        if cards_per_hand == 0 {
            return Err(DealError::InvalidCardsPerHand);
        }
        if cards_per_batch == 0 || cards_per_batch > cards_per_hand {
            return Err(DealError::InvalidCardsPerBatch);
        }
        let len = deck.len();
        let Some(stock_len) = hand_count
            .checked_mul(cards_per_hand)
            .and_then(|dealt| len.checked_sub(dealt))
        else {
            return Err(DealError::InsufficientCards);
        };

        let mut rest = deck;
        let stock = if stock_len == 0 {
            Vec::new()
        } else if stock_offset < 0 {
            let end = len as isize + stock_offset + 1;
            let start = end - stock_len as isize;
            if start < 0 || end > len as isize {
                return Err(DealError::InvalidStockOffset);
            }
            rest.drain(start as usize..end as usize).collect()
        } else {
            let start = stock_offset as usize;
            let end = start + stock_len;
            if end > len {
                return Err(DealError::InvalidStockOffset);
            }
            rest.drain(start..end).collect()
        };

        // Deal from the back of the reversed remainder so each batch lands
        // in reverse deck order.
        rest.reverse();
        let mut hands: Vec<Vec<T>> = (0..hand_count)
            .map(|_| Vec::with_capacity(cards_per_hand))
            .collect();
        let mut seat = 0;
        while !rest.is_empty() {
            let hand = &mut hands[seat];
            let batch = cards_per_batch.min(cards_per_hand - hand.len());
            hand.extend(rest.drain(rest.len() - batch..));
            seat = (seat + 1) % hand_count;
        }
        Ok(Deal { stock, hands })
    }

    /// Deals single-card batches with the stock at the end of the deck, the
    /// common case for games like Durak.
    ///
    /// # Errors
    ///
    /// Same as [`Dealer::deal`].
    pub fn deal_hands<T>(
        deck: Vec<T>,
        hand_count: usize,
        cards_per_hand: usize,
    ) -> Result<Deal<T>, DealError> {
        Self::deal(deck, hand_count, cards_per_hand, 1, -1)
    }
}

impl Dealing for Dealer {
    fn shuffle_deck(&mut self, deck: Vec<Card>, times: usize) -> Result<Vec<Card>, DealError> {
        self.shuffle(deck, times)
    }

    fn deal_deck(
        &mut self,
        deck: Vec<Card>,
        hand_count: usize,
        cards_per_hand: usize,
    ) -> Result<Deal<Card>, DealError> {
        Self::deal_hands(deck, hand_count, cards_per_hand)
    }
}
