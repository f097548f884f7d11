//! Error types for the crate.

use thiserror::Error;

/// Errors constructing or parsing a [`Card`](crate::Card).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    /// The card code was empty.
    #[error("card code is empty")]
    EmptyCode,
    /// The rank portion of a card code was not recognized.
    #[error("unknown rank code")]
    UnknownRankCode,
    /// The suit portion of a card code was not recognized.
    #[error("unknown suit code")]
    UnknownSuitCode,
    /// A non-joker card was given no suit.
    #[error("a non-joker card must have a suit")]
    MissingSuit,
    /// A joker was given a suit.
    #[error("a joker cannot have a suit")]
    UnexpectedSuit,
}

/// Errors configuring a [`DeckFactory`](crate::DeckFactory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The lowest rank was outside 2..=11.
    #[error("lowest rank must be between 2 and 11")]
    InvalidLowestRank,
}

/// Errors shuffling or dealing a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Fewer than one shuffle pass was requested.
    #[error("shuffle count must be at least 1")]
    InvalidShuffleTimes,
    /// Fewer than one hand was requested.
    #[error("hand count must be at least 1")]
    InvalidHandCount,
    /// Fewer than one card per hand was requested.
    #[error("cards per hand must be at least 1")]
    InvalidCardsPerHand,
    /// Fewer than one card per batch was requested.
    #[error("cards per batch must be at least 1")]
    InvalidCardsPerBatch,
    /// The stock offset points outside the deck.
    #[error("stock offset is outside the deck")]
    InvalidStockOffset,
    /// The deck cannot cover the requested hands.
    #[error("not enough cards to deal the requested hands")]
    InsufficientCards,
}

/// Errors validating game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An empty player roster was supplied.
    #[error("a game needs at least one player slot")]
    NoPlayers,
    /// Fewer players than the game supports.
    #[error("too few players for this game")]
    TooFewPlayers,
    /// More players than the deck can serve.
    #[error("too many players for the configured deck")]
    TooManyPlayers,
    /// The configured lowest rank is outside the usable range.
    #[error("lowest rank is outside the usable range")]
    InvalidLowestRank,
    /// Hands must hold at least one card.
    #[error("cards per hand must be at least 1")]
    InvalidCardsPerHand,
    /// A supplied player is already attached to another game.
    #[error("player is already attached to another game")]
    PlayerAttached,
}

/// Errors mutating a [`Player`](crate::Player).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// The player already sits in a different game.
    #[error("player is attached to a different game")]
    AttachedElsewhere,
    /// The name cannot change while the player is seated.
    #[error("cannot rename a seated player")]
    NameFrozen,
}

/// Errors starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// A round is already being played.
    #[error("a round is already in progress")]
    AlreadyInProgress,
    /// The deal left no stock to take a trump card from.
    #[error("the deal left no trump card")]
    MissingTrump,
    /// The configured first attacker is not a valid seat.
    #[error("first attacker seat is out of range")]
    FirstAttackerOutOfRange,
    /// The dealer could not shuffle or deal the deck.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// The dealer produced a deal this game cannot play: wrong hand count,
    /// duplicate cards, or jokers.
    #[error("the deal is not playable")]
    InvalidDeal,
}

/// Errors attacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttackError {
    /// The seat index is not at the table.
    #[error("no such seat")]
    InvalidSeat,
    /// No round is in progress.
    #[error("no round is in progress")]
    NoTurn,
    /// The defendant cannot attack.
    #[error("the defendant cannot attack")]
    DefendantCannotAttack,
    /// Only the attacker may open a bout.
    #[error("only the attacker may play the first card")]
    NotAttacker,
    /// The seat has already quit this bout.
    #[error("this seat has already quit the bout")]
    AlreadyQuit,
    /// No cards were offered.
    #[error("no cards offered")]
    Empty,
    /// An offered card's rank is not on the table.
    #[error("card rank does not match any card on the table")]
    RankMismatch,
    /// An offered card was already played this game.
    #[error("card was already played")]
    AlreadyPlayed,
    /// An offered card is not in the seat's hand.
    #[error("card is not in this hand")]
    NotInHand,
}

/// Errors defending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DefendError {
    /// The seat index is not at the table.
    #[error("no such seat")]
    InvalidSeat,
    /// No round is in progress.
    #[error("no round is in progress")]
    NoTurn,
    /// Only the defendant may defend.
    #[error("only the defendant may defend")]
    NotDefendant,
    /// The defense was already abandoned this bout.
    #[error("the defense has been abandoned")]
    DefenseAbandoned,
    /// A defending card was already played this game.
    #[error("card was already played")]
    AlreadyPlayed,
    /// A defending card is not in the seat's hand.
    #[error("card is not in this hand")]
    NotInHand,
}

/// Errors quitting a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuitError {
    /// The seat index is not at the table.
    #[error("no such seat")]
    InvalidSeat,
    /// No round is in progress.
    #[error("no round is in progress")]
    NoTurn,
    /// The bout has not been opened yet.
    #[error("no cards have been played this bout")]
    NoCardsPlayed,
}

/// Errors mutating or iterating a [`Hand`](crate::Hand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandError {
    /// The hand changed between cursor steps.
    #[error("hand was modified during iteration")]
    ConcurrentModification,
    /// The hand already holds this card.
    #[error("hand already holds this card")]
    DuplicateCard,
    /// Hands hold suited cards only.
    #[error("hands hold suited cards only")]
    Unsuited,
}
