//! A rule engine for the Durak card game.
//!
//! The crate provides a [`Game`] type that manages the full round flow:
//! dealing, the attack/defense bout cycle, stock replenishment, and scoring
//! across consecutive games at one table. Deck building and dealing are
//! exposed on their own through [`DeckFactory`] and [`Dealer`], and the
//! [`Dealing`] trait lets embedders script exact deals.
//!
//! # Example
//!
//! ```
//! use durakrs::{Game, GameOptions};
//!
//! let options = GameOptions::default().with_players(2);
//! let mut game = Game::new(options, 42).unwrap();
//! game.start().unwrap();
//! assert!(game.playing());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod card;
pub mod dealer;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod player;
pub mod table;

// Re-export main types
pub use card::{Card, Rank, Suit};
pub use dealer::{Deal, Dealer, Dealing};
pub use deck::DeckFactory;
pub use error::{
    AttackError, CardError, ConfigError, DealError, DeckError, DefendError, HandError,
    PlayerError, QuitError, StartError,
};
pub use game::{Game, Outcome, SeatStats};
pub use hand::{Hand, HandCursor};
pub use options::GameOptions;
pub use player::{Player, PlayerStatus};
pub use table::{GameId, PlayerSetup, Table};
