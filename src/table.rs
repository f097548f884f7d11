//! The game-agnostic seating framework.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ConfigError;

/// A process-unique game identity.
///
/// Players hold a `GameId` instead of a reference to their game, so a
/// player value can outlive the game without keeping it alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    /// Allocates a fresh identity.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// How a table's seats are populated.
pub enum PlayerSetup<P> {
    /// This many seats, every one filled by the player factory.
    Count(usize),
    /// Explicit seat assignments; `None` entries are filled by the player
    /// factory.
    Roster(Vec<Option<P>>),
}

/// A fixed circle of seated players.
#[derive(Debug, Clone)]
pub struct Table<P> {
    seats: Vec<P>,
}

impl<P> Table<P> {
    /// Seats players according to `setup`, calling `factory` with the seat
    /// number for every seat the setup leaves open.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlayers`] for a setup with no seats.
    pub fn new(
        setup: PlayerSetup<P>,
        mut factory: impl FnMut(usize) -> P,
    ) -> Result<Self, ConfigError> {
        let seats = match setup {
            PlayerSetup::Count(count) => (0..count).map(&mut factory).collect(),
            PlayerSetup::Roster(roster) => roster
                .into_iter()
                .enumerate()
                .map(|(seat, entry)| entry.unwrap_or_else(|| factory(seat)))
                .collect::<Vec<P>>(),
        };
        if seats.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        Ok(Self { seats })
    }

    /// The number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Returns whether the table has no seats. Construction forbids this,
    /// so it only holds for moved-out tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// The player at `seat`, if in range.
    #[must_use]
    pub fn get(&self, seat: usize) -> Option<&P> {
        self.seats.get(seat)
    }

    /// The player at `seat`, mutably.
    pub(crate) fn get_mut(&mut self, seat: usize) -> Option<&mut P> {
        self.seats.get_mut(seat)
    }

    /// Iterates the players in seat order.
    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.seats.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, P> {
        self.seats.iter_mut()
    }

    pub(crate) fn into_inner(self) -> Vec<P> {
        self.seats
    }

    /// The seat following `seat` around the table; `reverse` walks the
    /// other way. Wraps at the ends.
    #[must_use]
    pub fn next_seat(&self, seat: usize, reverse: bool) -> usize {
        let len = self.seats.len();
        if reverse {
            (seat + len - 1) % len
        } else {
            (seat + 1) % len
        }
    }
}

impl<'a, P> IntoIterator for &'a Table<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
