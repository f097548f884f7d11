//! Attack, defense and bout resolution.

use log::{debug, trace};

use crate::card::Card;
use crate::error::{AttackError, DefendError, QuitError};
use crate::game::{Game, Outcome};

impl Game {
    /// Plays attacking cards from `seat`'s hand.
    ///
    /// Opening a bout requires the attacker and cards of one rank; joining
    /// an open bout is allowed for any non-defendant that has not quit, with
    /// cards whose ranks are already on the table. Cards are accepted until
    /// the bout's card limit is met, so the returned accepted cards may be
    /// fewer than offered (possibly none). Accepted cards leave the hand; a
    /// seat that empties its hand quits the bout automatically.
    ///
    /// # Errors
    ///
    /// Returns an [`AttackError`] naming the violated rule; the game state
    /// is unchanged on error.
    pub fn attack(&mut self, seat: usize, cards: &[Card]) -> Result<Vec<Card>, AttackError> {
        let Some(player) = self.table.get(seat) else {
            return Err(AttackError::InvalidSeat);
        };
        for card in cards {
            if !player.hand().contains(card) {
                return Err(AttackError::NotInHand);
            }
        }
        let (Some(attacker), Some(defendant)) = (self.attacker, self.defendant) else {
            return Err(AttackError::NoTurn);
        };
        if defendant == seat {
            return Err(AttackError::DefendantCannotAttack);
        }
        if self.cards_on_table.is_empty() && seat != attacker {
            return Err(AttackError::NotAttacker);
        }
        if self.quits[seat] {
            return Err(AttackError::AlreadyQuit);
        }
        if cards.is_empty() {
            return Err(AttackError::Empty);
        }
        if self.cards_on_table.is_empty() {
            let first = cards[0];
            if cards.iter().any(|card| card.rank() != first.rank()) {
                return Err(AttackError::RankMismatch);
            }
        } else {
            for card in cards {
                let on_table = self.cards_on_table.iter().any(|(attack, defense)| {
                    attack.rank() == card.rank()
                        || defense.is_some_and(|defense| defense.rank() == card.rank())
                });
                if !on_table {
                    return Err(AttackError::RankMismatch);
                }
            }
        }

        let mut laid: Vec<Card> = Vec::new();
        for &card in cards {
            if self.card_limit_reached() {
                break;
            }
            if self.played(&card) {
                // Undo this call's cards before reporting the duplicate.
                self.cards_on_table.retain(|(attack, _)| !laid.contains(attack));
                return Err(AttackError::AlreadyPlayed);
            }
            self.cards_on_table.push((card, None));
            laid.push(card);
        }

        // With the stock gone, the first seat to shed its whole hand is the
        // winner if the game ends. Checked before the hand shrinks.
        if self.stock.is_empty()
            && self.candidate_winner.is_none()
            && laid.len() == player.hand().len()
        {
            self.candidate_winner = Some(seat);
        }

        let Some(player) = self.table.get_mut(seat) else {
            return Err(AttackError::InvalidSeat);
        };
        for card in &laid {
            player.hand_mut().discard(card);
        }
        trace!("seat {seat} attacked with {laid:?}");
        if self
            .table
            .get(seat)
            .is_some_and(|player| player.hand().is_empty())
        {
            self.quit_turn_inner(seat);
        }
        Ok(laid)
    }

    /// Plays defending cards from the defendant's hand.
    ///
    /// Each pair beats an attacking card on the table with a card from the
    /// hand. Pairs that do not apply are skipped without error: an attack
    /// card not on the table or already beaten, or a defense that does not
    /// beat its target (same suit requires a higher rank, a different suit
    /// must be a trump). Accepted cards leave the hand; the bout ends
    /// automatically once every card on the table is beaten and either the
    /// card limit is met or every other seat has quit.
    ///
    /// # Errors
    ///
    /// Returns a [`DefendError`] naming the violated rule. On error the
    /// whole call is rolled back, including pairs accepted earlier in it.
    pub fn defend(&mut self, seat: usize, pairs: &[(Card, Card)]) -> Result<Vec<Card>, DefendError> {
        let Some(player) = self.table.get(seat) else {
            return Err(DefendError::InvalidSeat);
        };
        for (_, defense) in pairs {
            if !player.hand().contains(defense) {
                return Err(DefendError::NotInHand);
            }
        }
        if self.attacker.is_none() || self.defendant.is_none() {
            return Err(DefendError::NoTurn);
        }
        if self.defendant != Some(seat) {
            return Err(DefendError::NotDefendant);
        }
        if self.quits[seat] {
            return Err(DefendError::DefenseAbandoned);
        }

        let trump_suit = self.trump_card.and_then(Card::suit);
        let saved = self.cards_on_table.clone();
        let mut laid: Vec<Card> = Vec::new();
        for &(target, defense) in pairs {
            let Some(slot) = self
                .cards_on_table
                .iter()
                .position(|(attack, beaten)| *attack == target && beaten.is_none())
            else {
                continue;
            };
            if self.played(&defense) {
                self.cards_on_table = saved;
                return Err(DefendError::AlreadyPlayed);
            }
            if defense.suit() != target.suit() {
                // Only a trump beats across suits.
                if defense.suit() != trump_suit {
                    continue;
                }
            } else if rank_key(&defense) <= rank_key(&target) {
                continue;
            }
            self.cards_on_table[slot].1 = Some(defense);
            laid.push(defense);
        }

        let Some(player) = self.table.get_mut(seat) else {
            return Err(DefendError::InvalidSeat);
        };
        for card in &laid {
            player.hand_mut().discard(card);
        }
        trace!("seat {seat} defended with {laid:?}");

        let all_beaten = self
            .cards_on_table
            .iter()
            .all(|(_, defense)| defense.is_some());
        let others_quit = (0..self.table.len())
            .filter(|&other| other != seat)
            .all(|other| self.quits[other]);
        if !self.cards_on_table.is_empty()
            && all_beaten
            && (self.card_limit_reached() || others_quit)
        {
            self.quit_turn_inner(seat);
        }
        Ok(laid)
    }

    /// Withdraws `seat` from the current bout.
    ///
    /// An attacker that quits may not throw in more cards this bout. The
    /// defendant quitting with unbeaten cards on the table abandons the
    /// defense and will collect the table once everyone has quit; with
    /// everything beaten this is a no-op unless the card limit is reached,
    /// in which case the bout ends. The last quit resolves the bout:
    /// either the defendant collects the table, or the cards are discarded
    /// and the defendant leads the next bout. Resolution replenishes hands
    /// from the stock (former attacker first, then the other seats in
    /// order, the former defendant last) and may end the game.
    ///
    /// # Errors
    ///
    /// Returns a [`QuitError`] if no bout is open or no cards have been
    /// played yet.
    pub fn quit_turn(&mut self, seat: usize) -> Result<(), QuitError> {
        if self.table.get(seat).is_none() {
            return Err(QuitError::InvalidSeat);
        }
        if self.attacker.is_none() || self.defendant.is_none() {
            return Err(QuitError::NoTurn);
        }
        if self.cards_on_table.is_empty() {
            return Err(QuitError::NoCardsPlayed);
        }
        self.quit_turn_inner(seat);
        Ok(())
    }

    /// Caps each bout at the smaller of the hand size and the cards the
    /// defendant held when the bout began, less one on the game's first
    /// bout.
    fn card_limit_reached(&self) -> bool {
        let limit = self.options.cards_per_hand().min(self.cards_defending)
            - usize::from(self.turn == 0);
        self.cards_on_table.len() >= limit
    }

    /// Whether `card` is out of play for this game: on the table, in the
    /// discard pile, or still in the stock.
    fn played(&self, card: &Card) -> bool {
        self.cards_on_table
            .iter()
            .any(|(attack, defense)| attack == card || defense.as_ref() == Some(card))
            || self.discarded.contains(card)
            || self.stock.contains(card)
    }

    fn quit_turn_inner(&mut self, seat: usize) {
        let (Some(old_attacker), Some(old_defendant)) = (self.attacker, self.defendant) else {
            return;
        };
        let unbeaten = self
            .cards_on_table
            .iter()
            .any(|(_, defense)| defense.is_none());
        if seat != old_defendant || unbeaten {
            self.quits[seat] = true;
        }

        if unbeaten && self.quits.iter().all(|&quit| quit) {
            // Abandoned defense: the defendant takes everything played.
            let table: Vec<Card> = self
                .cards_on_table
                .drain(..)
                .flat_map(|(attack, defense)| [Some(attack), defense])
                .flatten()
                .collect();
            if let Some(player) = self.table.get_mut(old_defendant) {
                for card in table {
                    // Table cards cannot collide with cards in a hand.
                    let _ = player.hand_mut().receive(card);
                }
            }
            debug!("seat {old_defendant} collected the table");
            self.attacker = Some(self.table.next_seat(old_defendant, false));
            self.defendant = None;
        } else if !unbeaten
            && (self.card_limit_reached()
                || (0..self.table.len())
                    .filter(|&other| other != old_defendant)
                    .all(|other| self.quits[other]))
        {
            // Beaten bout: everything played goes to the discard pile and
            // the defendant leads the next bout.
            for (attack, defense) in self.cards_on_table.drain(..) {
                self.discarded.insert(attack);
                if let Some(defense) = defense {
                    self.discarded.insert(defense);
                }
            }
            self.attacker = Some(old_defendant);
            self.defendant = None;
        }

        if self.defendant.is_some() {
            return;
        }
        // The bout is over: refill hands and pick the next pairing.
        self.quits.iter_mut().for_each(|quit| *quit = false);
        self.replenish(old_attacker);
        let mut index = old_defendant;
        while index != old_attacker {
            if index != old_defendant {
                self.replenish(index);
            }
            index = self.table.next_seat(index, false);
        }
        self.replenish(old_defendant);

        let Some(start) = self.attacker else {
            return;
        };
        let mut next = start;
        while self.hand_empty(next) {
            next = self.table.next_seat(next, false);
            if next == start {
                break;
            }
        }
        if self.hand_empty(next) {
            self.attacker = None;
            self.game_over(Outcome::Tie);
            return;
        }
        self.attacker = Some(next);
        let attacker = next;
        loop {
            next = self.table.next_seat(next, false);
            if !self.hand_empty(next) {
                break;
            }
        }
        if attacker == next {
            // Only one seat holds cards: the game is decided.
            let fool = next;
            let winner = self
                .candidate_winner
                .unwrap_or_else(|| self.table.next_seat(fool, false));
            self.stats[fool].losses += 1;
            self.stats[winner].wins += 1;
            self.attacker = None;
            self.game_over(Outcome::Decided { winner, fool });
        } else {
            self.defendant = Some(next);
            self.cards_defending = self.table.get(next).map_or(0, |p| p.hand().len());
            self.turn += 1;
            debug!(
                "bout {}: seat {attacker} attacks seat {next}",
                self.turn + 1
            );
        }
    }

    fn hand_empty(&self, seat: usize) -> bool {
        self.table
            .get(seat)
            .is_none_or(|player| player.hand().is_empty())
    }

    /// Tops up a hand from the stock, drawing from the back; the trump card
    /// at the front goes last. Records the first seat to empty its hand
    /// after the stock runs dry as the potential winner.
    fn replenish(&mut self, seat: usize) {
        let cards_per_hand = self.options.cards_per_hand();
        let Some(player) = self.table.get_mut(seat) else {
            return;
        };
        while player.hand().len() < cards_per_hand {
            let Some(card) = self.stock.pop() else {
                break;
            };
            // Stock cards cannot collide with cards in a hand.
            let _ = player.hand_mut().receive(card);
        }
        if player.hand().is_empty() && self.candidate_winner.is_none() {
            self.candidate_winner = Some(seat);
        }
    }
}

// Defense comparisons never see jokers; hands refuse them.
fn rank_key(card: &Card) -> u8 {
    card.rank().key().unwrap_or(0)
}
