//! Players and their per-bout status.

use crate::error::PlayerError;
use crate::hand::Hand;
use crate::table::GameId;

/// What a seat is doing in the current bout.
///
/// Derived from the game state on demand; see
/// [`Game::status`](crate::Game::status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerStatus {
    /// The defendant has given up and is waiting to collect the table.
    Collecting,
    /// An attacker has quit the bout.
    Quit,
    /// The seat leading the attack.
    Attacking,
    /// The seat under attack.
    Defending,
    /// Any other seat, or no round in progress.
    Other,
}

/// A participant in a game.
///
/// A player may exist before any game does; seating it at a table attaches
/// it, after which its name is frozen and its hand is managed by the game.
#[derive(Debug, Clone, Default)]
pub struct Player {
    game: Option<GameId>,
    seat: Option<usize>,
    name: Option<String>,
    hand: Hand,
}

impl Player {
    /// Creates an unseated, unnamed player.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unseated player with a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The player's name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Names or renames the player.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::NameFrozen`] once the player is seated at a
    /// table.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), PlayerError> {
        if self.game.is_some() {
            return Err(PlayerError::NameFrozen);
        }
        self.name = Some(name.into());
        Ok(())
    }

    /// The seat this player occupies, if attached.
    #[must_use]
    pub const fn seat(&self) -> Option<usize> {
        self.seat
    }

    /// The game this player is attached to, if any.
    #[must_use]
    pub const fn game(&self) -> Option<GameId> {
        self.game
    }

    /// The player's hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) const fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Seats the player. Idempotent for the same game.
    pub(crate) fn attach(&mut self, game: GameId, seat: usize) -> Result<(), PlayerError> {
        match self.game {
            Some(current) if current != game => Err(PlayerError::AttachedElsewhere),
            _ => {
                self.game = Some(game);
                self.seat = Some(seat);
                Ok(())
            }
        }
    }

    pub(crate) fn detach(&mut self) {
        self.game = None;
        self.seat = None;
    }
}
