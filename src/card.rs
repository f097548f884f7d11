//! Card identity and code parsing.

use core::fmt;
use core::str::FromStr;

use crate::error::CardError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Spades.
    Spades,
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Hearts.
    Hearts,
}

impl Suit {
    /// All suits, in deck-generation order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Clubs, Self::Diamonds, Self::Hearts];

    /// Returns the one-character suit code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Spades => 'S',
            Self::Clubs => 'C',
            Self::Diamonds => 'D',
            Self::Hearts => 'H',
        }
    }

    /// Parses a one-character suit code.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::UnknownSuitCode`] if the character is not a
    /// recognized suit code.
    pub const fn from_code(code: char) -> Result<Self, CardError> {
        match code {
            'S' => Ok(Self::Spades),
            'C' => Ok(Self::Clubs),
            'D' => Ok(Self::Diamonds),
            'H' => Ok(Self::Hearts),
            _ => Err(CardError::UnknownSuitCode),
        }
    }
}

/// Card rank.
///
/// `Joker` is a rank of its own; joker cards have no suit and no position
/// in the rank ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// Deuce.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Ace.
    Ace,
    /// Joker.
    Joker,
}

impl Rank {
    /// All suited ranks (jokers excluded), in ascending order.
    pub const SUITED: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Returns the rank's ordering key: 2 through 10 for pip cards, 11–14
    /// for jack through ace. Jokers have no key.
    #[must_use]
    pub const fn key(self) -> Option<u8> {
        match self {
            Self::Two => Some(2),
            Self::Three => Some(3),
            Self::Four => Some(4),
            Self::Five => Some(5),
            Self::Six => Some(6),
            Self::Seven => Some(7),
            Self::Eight => Some(8),
            Self::Nine => Some(9),
            Self::Ten => Some(10),
            Self::Jack => Some(11),
            Self::Queen => Some(12),
            Self::King => Some(13),
            Self::Ace => Some(14),
            Self::Joker => None,
        }
    }

    /// Returns the rank code (`"2"`–`"10"`, `"J"`, `"Q"`, `"K"`, `"A"`,
    /// or `"*"` for a joker).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
            Self::Joker => "*",
        }
    }

    /// Parses a rank code.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::UnknownRankCode`] if the string is not a
    /// recognized rank code.
    pub fn from_code(code: &str) -> Result<Self, CardError> {
        match code {
            "2" => Ok(Self::Two),
            "3" => Ok(Self::Three),
            "4" => Ok(Self::Four),
            "5" => Ok(Self::Five),
            "6" => Ok(Self::Six),
            "7" => Ok(Self::Seven),
            "8" => Ok(Self::Eight),
            "9" => Ok(Self::Nine),
            "10" => Ok(Self::Ten),
            "J" => Ok(Self::Jack),
            "Q" => Ok(Self::Queen),
            "K" => Ok(Self::King),
            "A" => Ok(Self::Ace),
            "*" => Ok(Self::Joker),
            _ => Err(CardError::UnknownRankCode),
        }
    }
}

/// A playing card.
///
/// Cards are immutable values; two cards are equal iff their rank and suit
/// match. A non-joker always has a suit, a joker never does — the
/// constructors enforce this.
///
/// # Example
///
/// ```
/// use durakrs::{Card, Rank, Suit};
///
/// let ten = Card::new(Rank::Ten, Some(Suit::Hearts)).unwrap();
/// assert_eq!(ten.code(), "10H");
/// assert_eq!("10H".parse::<Card>().unwrap(), ten);
/// assert_eq!(Card::joker().code(), "*");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    rank: Rank,
    suit: Option<Suit>,
}

impl Card {
    /// Creates a new card.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::MissingSuit`] for a suitless non-joker and
    /// [`CardError::UnexpectedSuit`] for a suited joker.
    pub const fn new(rank: Rank, suit: Option<Suit>) -> Result<Self, CardError> {
        match (rank, suit) {
            (Rank::Joker, Some(_)) => Err(CardError::UnexpectedSuit),
            (Rank::Joker, None) => Ok(Self { rank, suit }),
            (_, None) => Err(CardError::MissingSuit),
            (_, Some(_)) => Ok(Self { rank, suit }),
        }
    }

    /// Creates a suited card without the joker checks. Callers must pass a
    /// suited rank.
    pub(crate) const fn suited(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    /// Creates a joker.
    #[must_use]
    pub const fn joker() -> Self {
        Self {
            rank: Rank::Joker,
            suit: None,
        }
    }

    /// The card's rank.
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// The card's suit, or `None` for a joker.
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        self.suit
    }

    /// Returns whether this card is a joker.
    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self.rank, Rank::Joker)
    }

    /// Returns the card's textual code, `<rank-code><suit-code>`
    /// (e.g. `"QD"`, `"10H"`, or `"*"` for a joker).
    #[must_use]
    pub fn code(self) -> String {
        self.to_string()
    }

    /// Parses a card from its textual code.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::EmptyCode`] for an empty string,
    /// [`CardError::UnknownRankCode`] / [`CardError::UnknownSuitCode`] for
    /// unrecognized codes, and the constructor errors for codes that break
    /// the suit invariant (e.g. `"Q"` or `"*S"`).
    pub fn from_code(code: &str) -> Result<Self, CardError> {
        let mut chars = code.chars();
        let Some(last) = chars.next_back() else {
            return Err(CardError::EmptyCode);
        };
        let head = chars.as_str();
        if head.is_empty() {
            // A single character is a bare rank code; only the joker is
            // valid without a suit.
            let rank = Rank::from_code(code)?;
            Self::new(rank, None)
        } else {
            let suit = Suit::from_code(last)?;
            let rank = Rank::from_code(head)?;
            Self::new(rank, Some(suit))
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank.code())?;
        if let Some(suit) = self.suit {
            write!(f, "{}", suit.code())?;
        }
        Ok(())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckFactory;

    #[test]
    fn codes_round_trip_for_every_deck_card() {
        let deck = DeckFactory::new(2, 2).unwrap().generate();
        for card in deck {
            assert_eq!(Card::from_code(&card.code()), Ok(card));
        }
    }

    #[test]
    fn malformed_codes_are_rejected() {
        assert_eq!(Card::from_code(""), Err(CardError::EmptyCode));
        assert_eq!(Card::from_code("1H"), Err(CardError::UnknownRankCode));
        assert_eq!(Card::from_code("QX"), Err(CardError::UnknownSuitCode));
        assert_eq!(Card::from_code("Q"), Err(CardError::MissingSuit));
        assert_eq!(Card::from_code("*S"), Err(CardError::UnexpectedSuit));
    }

    #[test]
    fn constructors_enforce_the_suit_invariant() {
        assert_eq!(
            Card::new(Rank::Queen, None),
            Err(CardError::MissingSuit)
        );
        assert_eq!(
            Card::new(Rank::Joker, Some(Suit::Spades)),
            Err(CardError::UnexpectedSuit)
        );
        assert!(Card::joker().is_joker());
    }
}
