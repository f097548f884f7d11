//! Game configuration.

use crate::deck::DeckFactory;
use crate::error::{ConfigError, DeckError};

/// Settings for a [`Game`](crate::Game).
///
/// Options are assembled with the `with_*` builders and consumed by
/// [`Game::new`](crate::Game::new); once a game holds them they can no
/// longer change.
///
/// # Example
///
/// ```
/// use durakrs::GameOptions;
///
/// let options = GameOptions::default()
///     .with_players(3)
///     .with_lowest_rank(2)
///     .with_loser_defends(true);
/// assert_eq!(options.players(), 3);
/// assert_eq!(options.deck_factory().unwrap().card_count(), 52);
/// options.validate().unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOptions {
    players: usize,
    cards_per_hand: usize,
    lowest_rank: u8,
    loser_defends: bool,
    first_attacker: Option<usize>,
}

impl Default for GameOptions {
    /// A two-player game over the 36-card deck, six cards per hand, with
    /// the seat left of the previous game's loser attacking first.
    fn default() -> Self {
        Self {
            players: 2,
            cards_per_hand: 6,
            lowest_rank: 6,
            loser_defends: false,
            first_attacker: None,
        }
    }
}

impl GameOptions {
    /// Sets the number of seats at the table.
    #[must_use]
    pub const fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    /// Sets the number of cards dealt to each hand.
    #[must_use]
    pub const fn with_cards_per_hand(mut self, cards_per_hand: usize) -> Self {
        self.cards_per_hand = cards_per_hand;
        self
    }

    /// Sets the lowest rank key in the deck (6 gives the usual 36-card
    /// Durak deck, 2 the full 52-card deck).
    #[must_use]
    pub const fn with_lowest_rank(mut self, lowest_rank: u8) -> Self {
        self.lowest_rank = lowest_rank;
        self
    }

    /// When set, the loser of the previous game defends first instead of
    /// attacking first.
    #[must_use]
    pub const fn with_loser_defends(mut self, loser_defends: bool) -> Self {
        self.loser_defends = loser_defends;
        self
    }

    /// Forces the seat that attacks first, overriding the trump-claim and
    /// previous-loser rules.
    #[must_use]
    pub const fn with_first_attacker(mut self, seat: usize) -> Self {
        self.first_attacker = Some(seat);
        self
    }

    /// The number of seats.
    #[must_use]
    pub const fn players(&self) -> usize {
        self.players
    }

    /// The number of cards dealt to each hand.
    #[must_use]
    pub const fn cards_per_hand(&self) -> usize {
        self.cards_per_hand
    }

    /// The lowest rank key in the deck.
    #[must_use]
    pub const fn lowest_rank(&self) -> u8 {
        self.lowest_rank
    }

    /// Whether the previous loser defends first.
    #[must_use]
    pub const fn loser_defends(&self) -> bool {
        self.loser_defends
    }

    /// The forced first attacker, if any.
    #[must_use]
    pub const fn first_attacker(&self) -> Option<usize> {
        self.first_attacker
    }

    /// The factory for this game's deck.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidLowestRank`] if the configured lowest
    /// rank is outside 2..=11.
    pub const fn deck_factory(&self) -> Result<DeckFactory, DeckError> {
        DeckFactory::new(self.lowest_rank, 0)
    }

    /// The inclusive range of player counts the configured deck supports:
    /// at least two, and few enough that a card remains for the trump.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidLowestRank`] if the configured lowest
    /// rank is outside 2..=11.
    pub fn player_count_range(&self) -> Result<(usize, usize), DeckError> {
        let count = self.deck_factory()?.card_count();
        Ok((2, (count - 1) / self.cards_per_hand.max(1)))
    }

    /// The inclusive range of lowest ranks that leave the configured seats
    /// a full hand each plus a trump card.
    #[must_use]
    pub fn lowest_rank_range(&self) -> (u8, u8) {
        let needed = self
            .players
            .checked_mul(self.cards_per_hand)
            .and_then(|cards| cards.checked_add(1));
        // An overflowing demand fits no deck; report an empty range.
        let upper = needed.map_or(0, |cards| {
            (15_isize - cards.div_ceil(4) as isize).clamp(0, 11)
        });
        (2, upper as u8)
    }

    /// Checks that the settings describe a playable game.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cards_per_hand == 0 {
            return Err(ConfigError::InvalidCardsPerHand);
        }
        let (min_players, max_players) = self
            .player_count_range()
            .map_err(|_| ConfigError::InvalidLowestRank)?;
        if self.players < min_players {
            return Err(ConfigError::TooFewPlayers);
        }
        if self.players > max_players {
            return Err(ConfigError::TooManyPlayers);
        }
        let (lowest, highest) = self.lowest_rank_range();
        if self.lowest_rank < lowest || self.lowest_rank > highest {
            return Err(ConfigError::InvalidLowestRank);
        }
        Ok(())
    }
}
