//! The Durak game engine.

mod turn;

use std::collections::HashSet;
use std::fmt;

use log::debug;
use rand::Rng;
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::dealer::{Dealer, Dealing};
use crate::deck::DeckFactory;
use crate::error::{ConfigError, StartError};
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::player::{Player, PlayerStatus};
use crate::table::{GameId, PlayerSetup, Table};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// One seat shed its cards first and one was left holding cards.
    Decided {
        /// The seat that ran out of cards first.
        winner: usize,
        /// The seat left holding cards: the fool.
        fool: usize,
    },
    /// Every seat ran out of cards at once.
    Tie,
}

/// Win/loss tallies for one seat across the games played at this table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatStats {
    /// Games this seat won.
    pub wins: u32,
    /// Games this seat lost.
    pub losses: u32,
}

/// A table of Durak players and the state of their current game.
///
/// A game is constructed once, then [`start`](Game::start)ed any number of
/// times; each round runs through [`attack`](Game::attack),
/// [`defend`](Game::defend) and [`quit_turn`](Game::quit_turn) until
/// [`playing`](Game::playing) turns false and [`result`](Game::result)
/// reports the outcome.
///
/// # Example
///
/// ```
/// use durakrs::{Game, GameOptions};
///
/// let mut game = Game::new(GameOptions::default(), 42).unwrap();
/// game.start().unwrap();
/// assert!(game.playing());
/// assert_eq!(game.player(0).unwrap().hand().len(), 6);
/// assert_eq!(game.stock_count(), 24);
/// ```
pub struct Game {
    id: GameId,
    options: GameOptions,
    deck: DeckFactory,
    table: Table<Player>,
    rng: ChaCha8Rng,
    attacker: Option<usize>,
    defendant: Option<usize>,
    cards_on_table: Vec<(Card, Option<Card>)>,
    discarded: HashSet<Card>,
    quits: Vec<bool>,
    stock: Vec<Card>,
    trump_card: Option<Card>,
    cards_defending: usize,
    turn: usize,
    candidate_winner: Option<usize>,
    last_outcome: Option<Outcome>,
    stats: Vec<SeatStats>,
    games_played: u64,
    on_game_over: Option<Box<dyn FnMut(&Outcome)>>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("attacker", &self.attacker)
            .field("defendant", &self.defendant)
            .field("cards_on_table", &self.cards_on_table)
            .field("stock", &self.stock.len())
            .field("trump_card", &self.trump_card)
            .field("turn", &self.turn)
            .field("games_played", &self.games_played)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Creates a game with freshly made, unnamed players.
    ///
    /// `seed` fixes the game's random stream; the same seed, options and
    /// moves replay the same games.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the options do not describe a playable
    /// game.
    pub fn new(options: GameOptions, seed: u64) -> Result<Self, ConfigError> {
        Self::with_factory(options, seed, |_| Player::new())
    }

    /// Creates a game whose players come from `factory`, called once per
    /// seat.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the options do not describe a playable
    /// game or a produced player already sits elsewhere.
    pub fn with_factory(
        options: GameOptions,
        seed: u64,
        factory: impl FnMut(usize) -> Player,
    ) -> Result<Self, ConfigError> {
        Self::build(options, seed, PlayerSetup::Count(options.players()), factory)
    }

    /// Creates a game from an explicit roster; `None` seats are filled
    /// with fresh players. The roster's length overrides the player count
    /// in `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlayers`] for an empty roster,
    /// [`ConfigError::PlayerAttached`] if a supplied player already sits at
    /// another table, and the usual option validation errors.
    pub fn with_players(
        options: GameOptions,
        seed: u64,
        roster: Vec<Option<Player>>,
    ) -> Result<Self, ConfigError> {
        let options = options.with_players(roster.len());
        Self::build(options, seed, PlayerSetup::Roster(roster), |_| Player::new())
    }

    fn build(
        options: GameOptions,
        seed: u64,
        setup: PlayerSetup<Player>,
        factory: impl FnMut(usize) -> Player,
    ) -> Result<Self, ConfigError> {
        let mut table = Table::new(setup, factory)?;
        options.validate()?;
        let deck = options
            .deck_factory()
            .map_err(|_| ConfigError::InvalidLowestRank)?;
        let id = GameId::next();
        for (seat, player) in table.iter_mut().enumerate() {
            player
                .attach(id, seat)
                .map_err(|_| ConfigError::PlayerAttached)?;
        }
        let players = table.len();
        Ok(Self {
            id,
            options,
            deck,
            table,
            rng: ChaCha8Rng::seed_from_u64(seed),
            attacker: None,
            defendant: None,
            cards_on_table: Vec::new(),
            discarded: HashSet::new(),
            quits: vec![false; players],
            stock: Vec::new(),
            trump_card: None,
            cards_defending: 0,
            turn: 0,
            candidate_winner: None,
            last_outcome: None,
            stats: vec![SeatStats::default(); players],
            games_played: 0,
            on_game_over: None,
        })
    }

    /// This game's identity.
    #[must_use]
    pub const fn id(&self) -> GameId {
        self.id
    }

    /// The frozen settings this game plays by.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Starts a round with a dealer seeded from this game's random stream.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::AlreadyInProgress`] while a round is being
    /// played, or [`StartError::FirstAttackerOutOfRange`] for a bad
    /// first-attacker option.
    pub fn start(&mut self) -> Result<(), StartError> {
        let mut dealer = Dealer::new(self.rng.next_u64());
        self.start_with(&mut dealer)
    }

    /// Starts a round with the supplied dealer: shuffles a fresh deck three
    /// times, deals the hands, pulls the trump card and sets up the first
    /// bout.
    ///
    /// The first attacker is the seat from
    /// [`GameOptions::with_first_attacker`] if set; otherwise, in the first
    /// game (and after a tie), the seat holding the lowest trump, or a
    /// random seat when no trumps were dealt; otherwise the seat is derived
    /// from the previous loser per [`GameOptions::with_loser_defends`].
    ///
    /// # Errors
    ///
    /// As [`Game::start`], plus any [`DealError`](crate::DealError) from
    /// the dealer and [`StartError::InvalidDeal`] for a deal this game
    /// cannot play.
    pub fn start_with(&mut self, dealer: &mut dyn Dealing) -> Result<(), StartError> {
        if self.attacker.is_some() {
            return Err(StartError::AlreadyInProgress);
        }
        let players = self.table.len();
        let deck = dealer.shuffle_deck(self.deck.generate(), 3)?;
        let deal = dealer.deal_deck(deck, players, self.options.cards_per_hand())?;
        if deal.hands.len() != players {
            return Err(StartError::InvalidDeal);
        }

        // The trump stays at the bottom of the stock: draws pop from the
        // back, so it is handed out last.
        let mut stock = deal.stock;
        let Some(&trump) = stock.first() else {
            return Err(StartError::MissingTrump);
        };
        let Some(trump_suit) = trump.suit() else {
            return Err(StartError::InvalidDeal);
        };
        stock[1..].reverse();

        for (seat, cards) in deal.hands.into_iter().enumerate() {
            let Some(player) = self.table.get_mut(seat) else {
                return Err(StartError::InvalidDeal);
            };
            *player.hand_mut() = Hand::new();
            for card in cards {
                if player.hand_mut().receive(card).is_err() {
                    return Err(StartError::InvalidDeal);
                }
            }
        }

        let attacker = if let Some(seat) = self.options.first_attacker() {
            if seat >= players {
                return Err(StartError::FirstAttackerOutOfRange);
            }
            seat
        } else if let Some(Outcome::Decided { fool, .. }) = self.last_outcome {
            // The fool opens the next game as defendant or attacker,
            // depending on the loser_defends option.
            self.table.next_seat(fool, self.options.loser_defends())
        } else {
            // First game, or the previous one was a tie: the lowest trump
            // dealt claims the first attack.
            let claim = self
                .table
                .iter()
                .enumerate()
                .filter_map(|(seat, player)| {
                    let low = player.hand().lowest(trump_suit)?;
                    Some((low.rank().key()?, seat))
                })
                .min_by_key(|&(key, _)| key);
            match claim {
                Some((_, seat)) => seat,
                None => self.rng.random_range(0..players),
            }
        };

        self.stock = stock;
        self.trump_card = Some(trump);
        self.cards_on_table.clear();
        self.discarded.clear();
        self.quits.iter_mut().for_each(|quit| *quit = false);
        self.turn = 0;
        self.cards_defending = self.options.cards_per_hand();
        self.candidate_winner = None;
        self.attacker = Some(attacker);
        self.defendant = Some(self.table.next_seat(attacker, false));
        debug!(
            "game {:?} bout 1: trump {trump}, seat {attacker} attacks",
            self.id
        );
        Ok(())
    }

    /// Whether a round is in progress.
    #[must_use]
    pub const fn playing(&self) -> bool {
        self.attacker.is_some()
    }

    /// The attack and defense cards played so far this bout, in the order
    /// the attacks were laid.
    #[must_use]
    pub fn cards_on_table(&self) -> &[(Card, Option<Card>)] {
        &self.cards_on_table
    }

    /// The number of attacking cards played this bout.
    #[must_use]
    pub fn pairs_on_table(&self) -> usize {
        self.cards_on_table.len()
    }

    /// Cards left in the stock, the trump card included.
    #[must_use]
    pub fn stock_count(&self) -> usize {
        self.stock.len()
    }

    /// The trump card, once a round has been started.
    #[must_use]
    pub const fn trump_card(&self) -> Option<Card> {
        self.trump_card
    }

    /// The seat currently leading the attack.
    #[must_use]
    pub const fn attacker(&self) -> Option<usize> {
        self.attacker
    }

    /// The seat currently defending.
    #[must_use]
    pub const fn defendant(&self) -> Option<usize> {
        self.defendant
    }

    /// The outcome of the last finished game, or `None` before one ends.
    #[must_use]
    pub const fn result(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Per-seat win/loss tallies.
    #[must_use]
    pub fn stats(&self) -> &[SeatStats] {
        &self.stats
    }

    /// How many games this table has finished.
    #[must_use]
    pub const fn games_played(&self) -> u64 {
        self.games_played
    }

    /// What `seat` is doing in the current bout, or `None` for a seat that
    /// is not at the table.
    #[must_use]
    pub fn status(&self, seat: usize) -> Option<PlayerStatus> {
        self.table.get(seat)?;
        let quit = self.quits.get(seat).copied().unwrap_or(false);
        Some(if self.defendant == Some(seat) && quit {
            PlayerStatus::Collecting
        } else if quit {
            PlayerStatus::Quit
        } else if self.attacker == Some(seat) {
            PlayerStatus::Attacking
        } else if self.defendant == Some(seat) {
            PlayerStatus::Defending
        } else {
            PlayerStatus::Other
        })
    }

    /// The player at `seat`, if any.
    #[must_use]
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.table.get(seat)
    }

    /// Iterates the players in seat order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.table.iter()
    }

    /// Registers a callback invoked after each game ends, once the built-in
    /// bookkeeping (result, stats, games-played counter) has run.
    pub fn set_game_over_hook(&mut self, hook: impl FnMut(&Outcome) + 'static) {
        self.on_game_over = Some(Box::new(hook));
    }

    /// Dissolves the table and releases its players, detached and keeping
    /// whatever cards they hold.
    ///
    /// # Errors
    ///
    /// Refuses while a round is in progress, handing the game back.
    pub fn into_players(self) -> Result<Vec<Player>, Self> {
        if self.playing() {
            return Err(self);
        }
        let mut players = self.table.into_inner();
        for player in &mut players {
            player.detach();
        }
        Ok(players)
    }

    fn game_over(&mut self, outcome: Outcome) {
        self.games_played += 1;
        self.last_outcome = Some(outcome);
        debug!(
            "game {:?} over after bout {}: {outcome:?}",
            self.id,
            self.turn + 1
        );
        if let Some(mut hook) = self.on_game_over.take() {
            hook(&outcome);
            self.on_game_over = Some(hook);
        }
    }
}
